//! Identifiers shared by the catalog, the presentation engine and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level block of the page, in document order.
///
/// The order of the variants is the order of the page: the composition root
/// iterates [`crate::page::PAGE_ORDER`], which lists them in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Header,
    Hero,
    Services,
    About,
    Contacts,
    Footer,
}

impl Section {
    /// In-page fragment id of the section, if it is a scroll target.
    pub const fn anchor(self) -> Option<&'static str> {
        match self {
            Section::Hero => Some("hero"),
            Section::Services => Some("services"),
            Section::About => Some("about"),
            Section::Contacts => Some("contacts"),
            Section::Header | Section::Footer => None,
        }
    }

    /// Sections reachable from the navigation menu.
    pub const NAVIGABLE: [Section; 3] = [Section::Services, Section::About, Section::Contacts];

    /// Resolve a navigation anchor (`services`, `#about`, ...) to its section.
    pub fn from_nav_anchor(anchor: &str) -> Option<Section> {
        let anchor = anchor.trim_start_matches('#');
        Self::NAVIGABLE
            .into_iter()
            .find(|s| s.anchor() == Some(anchor))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Header => "Header",
            Section::Hero => "Hero",
            Section::Services => "Services",
            Section::About => "About",
            Section::Contacts => "Contacts",
            Section::Footer => "Footer",
        };
        f.write_str(name)
    }
}

/// Stable key of an element watched by the viewport observer and animated
/// by the reveal animator (`services-grid`, `about-text`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
