use serde::{Deserialize, Serialize};

use crate::code::Level;

/// A single region record: a dot-delimited hierarchical code plus a display name.
///
/// The segment count of `code` tells the hierarchy level, e.g. `"11"` is a
/// province and `"11.01.01.2001"` is a village.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

impl Region {
    /// Hierarchy level derived from the code's segment count.
    pub fn level(&self) -> Option<Level> {
        Level::from_code(&self.code)
    }
}

/// Grouped result of a cross-kind search. Every field is present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub provinces: Vec<Region>,
    #[serde(default)]
    pub districts: Vec<Region>,
    #[serde(default)]
    pub subdistricts: Vec<Region>,
    #[serde(default)]
    pub villages: Vec<Region>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
            && self.districts.is_empty()
            && self.subdistricts.is_empty()
            && self.villages.is_empty()
    }
}
