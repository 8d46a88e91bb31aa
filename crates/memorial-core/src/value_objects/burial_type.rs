//! Burial type - the kind of plot a record refers to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of burial plot
///
/// The wire and storage form keeps the labels cemetery staff already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurialType {
    #[serde(rename = "Terra")]
    Ground,
    #[serde(rename = "Laje")]
    Slab,
    #[serde(rename = "Gaveta")]
    Drawer,
    #[serde(rename = "Jazigo")]
    Mausoleum,
    #[serde(rename = "Capela")]
    Chapel,
}

impl BurialType {
    pub const ALL: [Self; 5] = [
        Self::Ground,
        Self::Slab,
        Self::Drawer,
        Self::Mausoleum,
        Self::Chapel,
    ];

    /// Storage label
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ground => "Terra",
            Self::Slab => "Laje",
            Self::Drawer => "Gaveta",
            Self::Mausoleum => "Jazigo",
            Self::Chapel => "Capela",
        }
    }

    /// Parse a storage label, case-insensitively
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for BurialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
