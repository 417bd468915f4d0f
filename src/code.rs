//! Utilities for the dot-delimited hierarchical region code
//! (`"11"`, `"11.01"`, `"11.01.01"`, `"11.01.01.2001"`).

/// Hierarchy level of a region, derived from its code's segment count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Province,
    District,
    Subdistrict,
    Village,
}

impl Level {
    pub fn from_segments(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Province),
            2 => Some(Self::District),
            3 => Some(Self::Subdistrict),
            4 => Some(Self::Village),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_segments(split(code).len())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::District => "district",
            Self::Subdistrict => "subdistrict",
            Self::Village => "village",
        }
    }
}

/// Join code segments with dots, skipping empty segments.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Split a code into its segments. An empty code yields no segments.
pub fn split(code: &str) -> Vec<&str> {
    code.split('.').filter(|s| !s.is_empty()).collect()
}

/// A code broken into its per-level segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCode {
    pub province: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub village: Option<String>,
}

/// Parse a code into its per-level segments. Segments beyond the fourth are ignored.
pub fn parse(code: &str) -> ParsedCode {
    let mut segments = split(code).into_iter();
    ParsedCode {
        province: segments.next().map(str::to_string),
        district: segments.next().map(str::to_string),
        subdistrict: segments.next().map(str::to_string),
        village: segments.next().map(str::to_string),
    }
}
