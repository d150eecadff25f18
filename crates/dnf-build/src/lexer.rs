//! Starlark tokenizer
//!
//! Produces a flat token stream for the statement splitter and the
//! expression parser. Newlines are only emitted outside of brackets, so
//! every `Newline` token ends a logical line.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident,
    Number,
    String,
    Op,
    Comment,
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Source spelling of the token
    pub text: String,
    /// Decoded value for strings, the spelling for everything else
    pub value: String,
    /// Byte range in the source
    pub start: usize,
    pub end: usize,
    /// 1-based line of the first and last character
    pub line: usize,
    pub end_line: usize,
    /// 0-based byte column of the first character
    pub col: usize,
}

impl Token {
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == keyword
    }
}

/// Operators, longest first so the greedy match is correct
const OPERATORS: &[&str] = &[
    "**=", "//=", "<<=", ">>=", "==", "!=", "<=", ">=", "//", "**", "<<", ">>", "+=", "-=", "*=",
    "/=", "%=", "&=", "|=", "^=", "->", "+", "-", "*", "/", "%", "<", ">", "=", "(", ")", "[",
    "]", "{", "}", ",", ".", ":", ";", "|", "&", "^", "~",
];

/// Tokenize `src`. `path` is only used in error messages.
pub(crate) fn tokenize(path: &str, src: &str) -> Result<Vec<Token>> {
    Lexer::new(path, src).run()
}

struct Lexer<'a> {
    path: &'a str,
    src: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
    /// Open brackets: (char, line, col)
    brackets: Vec<(char, usize, usize)>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(path: &'a str, src: &'a str) -> Self {
        Self {
            path,
            src,
            pos: 0,
            line: 1,
            line_start: 0,
            brackets: Vec::new(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\r' | '\x0c' => self.advance(),
                '\\' if self.rest().starts_with("\\\n") || self.rest().starts_with("\\\r\n") => {
                    // Explicit line joining
                    self.advance();
                    if self.peek_char() == Some('\r') {
                        self.advance();
                    }
                    self.advance();
                }
                '\n' => {
                    if self.brackets.is_empty() {
                        let start = self.pos;
                        self.push(TokenKind::Newline, start, start + 1, String::new());
                    }
                    self.advance();
                }
                '#' => self.lex_comment(),
                '"' | '\'' => self.lex_string(self.pos, false)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident()?,
                c if c.is_ascii_digit() => self.lex_number(),
                '.' if self.peek_nth(1).is_some_and(|n| n.is_ascii_digit()) => self.lex_number(),
                _ => self.lex_operator()?,
            }
        }

        if let Some(&(open, line, col)) = self.brackets.last() {
            return Err(Error::parse(
                self.path,
                line,
                col + 1,
                format!("unclosed '{open}'"),
            ));
        }

        let end = self.src.len();
        self.push(TokenKind::Eof, end, end, String::new());
        Ok(self.tokens)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.line_start = self.pos;
            }
        }
    }

    fn col_of(&self, offset: usize) -> usize {
        // Only valid for offsets on the current line
        offset - self.line_start
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        Error::parse(self.path, self.line, self.col_of(self.pos) + 1, message)
    }

    /// Push a token that started on `start_line` at `start_col`
    fn push_spanning(
        &mut self,
        kind: TokenKind,
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        value: String,
    ) {
        let text = self.src[start..end].to_string();
        let value = if kind == TokenKind::String {
            value
        } else {
            text.clone()
        };
        self.tokens.push(Token {
            kind,
            text,
            value,
            start,
            end,
            line: start_line,
            end_line: self.line,
            col: start_col,
        });
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize, value: String) {
        let col = self.col_of(start);
        self.push_spanning(kind, start, end, self.line, col, value);
    }

    fn lex_comment(&mut self) {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        let end = start + self.src[start..self.pos].trim_end().len();
        self.push(TokenKind::Comment, start, end, String::new());
    }

    fn lex_ident(&mut self) -> Result<()> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let word = &self.src[start..self.pos];
        let is_prefix = matches!(
            word.to_ascii_lowercase().as_str(),
            "r" | "b" | "rb" | "br"
        );
        if is_prefix && matches!(self.peek_char(), Some('"') | Some('\'')) {
            let raw = word.to_ascii_lowercase().contains('r');
            return self.lex_string(start, raw);
        }

        self.push(TokenKind::Ident, start, self.pos, String::new());
        Ok(())
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        let mut prev = '\0';
        while let Some(c) = self.peek_char() {
            let exponent_sign = (c == '+' || c == '-') && matches!(prev, 'e' | 'E');
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || exponent_sign {
                prev = c;
                self.advance();
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start, self.pos, String::new());
    }

    /// Lex a string literal; `start` includes any prefix already consumed
    fn lex_string(&mut self, start: usize, raw: bool) -> Result<()> {
        let start_line = self.line;
        let start_col = self.col_of(start);
        let unterminated = |lexer: &Self| {
            Error::parse(lexer.path, start_line, start_col + 1, "unterminated string")
        };

        let quote = self.peek_char().ok_or_else(|| unterminated(self))?;
        let triple: String = std::iter::repeat_n(quote, 3).collect();
        let is_triple = self.rest().starts_with(&triple);
        for _ in 0..if is_triple { 3 } else { 1 } {
            self.advance();
        }

        let mut value = String::new();
        loop {
            let Some(c) = self.peek_char() else {
                return Err(unterminated(self));
            };
            match c {
                '\n' if !is_triple => return Err(unterminated(self)),
                c if c == quote => {
                    if !is_triple {
                        self.advance();
                        break;
                    }
                    if self.rest().starts_with(&triple) {
                        for _ in 0..3 {
                            self.advance();
                        }
                        break;
                    }
                    value.push(c);
                    self.advance();
                }
                '\\' => {
                    self.advance();
                    let Some(escaped) = self.peek_char() else {
                        return Err(unterminated(self));
                    };
                    if raw {
                        value.push('\\');
                        value.push(escaped);
                        self.advance();
                        continue;
                    }
                    self.advance();
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '0' => value.push('\0'),
                        '\\' | '\'' | '"' => value.push(escaped),
                        '\n' => {}
                        'x' => {
                            let hex: String = self.rest().chars().take(2).collect();
                            match u8::from_str_radix(&hex, 16) {
                                Ok(byte) if hex.len() == 2 => {
                                    value.push(char::from(byte));
                                    self.advance();
                                    self.advance();
                                }
                                _ => return Err(self.error_here("invalid \\x escape")),
                            }
                        }
                        other => {
                            value.push('\\');
                            value.push(other);
                        }
                    }
                }
                c => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        self.push_spanning(
            TokenKind::String,
            start,
            self.pos,
            start_line,
            start_col,
            value,
        );
        Ok(())
    }

    fn lex_operator(&mut self) -> Result<()> {
        let start = self.pos;
        let Some(op) = OPERATORS.iter().find(|op| self.rest().starts_with(**op)) else {
            let c = self.peek_char().unwrap_or('\0');
            return Err(self.error_here(format!("unexpected character {c:?}")));
        };

        match *op {
            "(" | "[" | "{" => {
                let open = op.chars().next().unwrap_or('(');
                self.brackets.push((open, self.line, self.col_of(start)));
            }
            ")" | "]" | "}" => {
                let close = op.chars().next().unwrap_or(')');
                let expected = match self.brackets.last() {
                    Some(('(', ..)) => ')',
                    Some(('[', ..)) => ']',
                    Some(('{', ..)) => '}',
                    _ => return Err(self.error_here(format!("unexpected '{close}'"))),
                };
                if close != expected {
                    return Err(self.error_here(format!(
                        "unexpected '{close}', expected '{expected}'"
                    )));
                }
                self.brackets.pop();
            }
            _ => {}
        }

        for _ in 0..op.len() {
            self.advance();
        }
        self.push(TokenKind::Op, start, self.pos, String::new());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize("BUILD", src)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn values(src: &str) -> Vec<String> {
        tokenize("BUILD", src)
            .unwrap()
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.value)
            .collect()
    }

    #[test]
    fn newlines_inside_brackets_are_joined() {
        use TokenKind::*;
        assert_eq!(
            kinds("rpm(\n  name = 'a',\n)\n"),
            vec![Ident, Op, Ident, Op, String, Op, Op, Newline, Eof]
        );
    }

    #[test]
    fn comments_keep_their_text_and_line() {
        let tokens = tokenize("BUILD", "x = 1  # trailing   \n# own line\n").unwrap();
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Comment)
            .map(|t| (t.text.as_str(), t.line))
            .collect();
        assert_eq!(comments, vec![("# trailing", 1), ("# own line", 2)]);
    }

    #[test]
    fn string_escapes_are_decoded() {
        assert_eq!(
            values(r#""a\"b" 'c\n' r"d\e" "\x41""#),
            vec!["a\"b", "c\n", "d\\e", "A"]
        );
    }

    #[test]
    fn triple_quoted_strings_span_lines() {
        let tokens = tokenize("BUILD", "\"\"\"one\ntwo\"\"\"\nx").unwrap();
        assert_eq!(tokens[0].value, "one\ntwo");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].end_line, 2);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn greedy_operators() {
        assert_eq!(values("a//=b != c"), vec!["a", "//=", "b", "!=", "c"]);
    }

    #[test]
    fn unterminated_string_is_error() {
        let err = tokenize("WORKSPACE", "rpm(name = \"abc)\n").unwrap_err();
        assert!(matches!(
            err,
            Error::ParseError { line: 1, column: 12, .. }
        ));
    }

    #[test]
    fn unclosed_bracket_is_error() {
        let err = tokenize("BUILD", "rpm(\n  name = 'x',\n").unwrap_err();
        assert!(err.to_string().contains("unclosed '('"));
    }

    #[test]
    fn mismatched_bracket_is_error() {
        let err = tokenize("BUILD", "x = [1, 2)\n").unwrap_err();
        assert!(err.to_string().contains("expected ']'"));
    }

    #[test]
    fn unknown_character_is_error() {
        assert!(tokenize("BUILD", "x = $\n").is_err());
    }
}
