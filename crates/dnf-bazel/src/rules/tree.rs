//! View over an `rpmtree` rule in a BUILD file

use super::view::RuleView;
use dnf_build::Rule;
use std::ops::{Deref, DerefMut};

/// Kind of the bundle rule in BUILD files
pub const RPMTREE_KIND: &str = "rpmtree";

/// View of an `rpmtree(name, rpms, files)` rule
#[derive(Debug)]
pub struct RpmTree<'a> {
    view: RuleView<'a>,
}

impl<'a> RpmTree<'a> {
    pub fn new(rule: &'a mut Rule) -> Self {
        Self {
            view: RuleView::new(rule),
        }
    }

    /// Labels of the bundled `rpm` repositories
    pub fn rpms(&self) -> Vec<String> {
        self.view.get_list("rpms")
    }

    pub fn set_rpms<I, S>(&mut self, rpms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view.set_list("rpms", rpms);
    }

    pub fn files(&self) -> Vec<String> {
        self.view.get_list("files")
    }

    pub fn set_files<I, S>(&mut self, files: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view.set_list("files", files);
    }
}

impl<'a> Deref for RpmTree<'a> {
    type Target = RuleView<'a>;

    fn deref(&self) -> &Self::Target {
        &self.view
    }
}

impl DerefMut for RpmTree<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lists_keep_given_order() {
        let mut rule = Rule::new(RPMTREE_KIND);
        let mut tree = RpmTree::new(&mut rule);
        tree.set_name("sandbox");
        tree.set_rpms(["@foo//rpm", "@bar//rpm"]);
        tree.set_files(["/z", "/a"]);

        assert_eq!(tree.name(), "sandbox");
        assert_eq!(tree.rpms(), vec!["@foo//rpm", "@bar//rpm"]);
        assert_eq!(tree.files(), vec!["/z", "/a"]);
    }
}
