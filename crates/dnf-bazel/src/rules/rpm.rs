//! View over an `rpm` rule in a WORKSPACE file

use super::view::RuleView;
use crate::package::url_join;
use dnf_build::Rule;
use std::ops::{Deref, DerefMut};

/// Kind of the per-package rule in WORKSPACE files
pub const RPM_KIND: &str = "rpm";

/// View of an `rpm(name, sha256, urls)` rule
#[derive(Debug)]
pub struct RpmRule<'a> {
    view: RuleView<'a>,
}

impl<'a> RpmRule<'a> {
    pub fn new(rule: &'a mut Rule) -> Self {
        Self {
            view: RuleView::new(rule),
        }
    }

    pub fn sha256(&self) -> Option<&str> {
        self.view.get_scalar("sha256")
    }

    pub fn set_sha256(&mut self, sha256: impl Into<String>) {
        self.view.set_scalar("sha256", sha256);
    }

    pub fn urls(&self) -> Vec<String> {
        self.view.get_list("urls")
    }

    /// Set `urls` to `href` on each mirror, in mirror order
    pub fn set_urls(&mut self, mirrors: &[String], href: &str) {
        self.view
            .set_list("urls", mirrors.iter().map(|mirror| url_join(mirror, href)));
    }
}

impl<'a> Deref for RpmRule<'a> {
    type Target = RuleView<'a>;

    fn deref(&self) -> &Self::Target {
        &self.view
    }
}

impl DerefMut for RpmRule<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.view
    }
}
