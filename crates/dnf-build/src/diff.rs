//! Line diffs between two renderings of a document

use similar::TextDiff;

/// Render a unified diff with three lines of context. Returns an empty
/// string when the texts are identical.
pub fn unified(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    if old == new {
        return String::new();
    }
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(old_label, new_label)
        .to_string()
}
