//! Key/path resolution.
//!
//! Every operation maps to a backend-agnostic *logical key* (e.g.
//! `districts/11`). The key doubles as the cache key and, combined with the
//! backend mode, resolves to the URL path: the static mirror serves the same
//! tree as pre-rendered files, so its paths are the key plus a `.json` suffix,
//! while the dynamic API uses the key verbatim.

use url::form_urlencoded;

use crate::code::Level;
use crate::error::{RegionsError, Result};

/// Which backing store a request resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Live query-capable API.
    Dynamic,
    /// Pre-rendered JSON snapshot; no search endpoints.
    Static,
}

/// Resolve a logical key to the URL path for the given mode.
pub fn url_path(key: &str, mode: Mode) -> String {
    match mode {
        Mode::Dynamic => key.to_string(),
        Mode::Static => format!("{key}.json"),
    }
}

/// Reject a missing or blank region code before any network activity.
pub fn accept_code(code: &str) -> Result<&str> {
    if code.trim().is_empty() {
        return Err(RegionsError::RequireCode);
    }
    Ok(code)
}

/// Reject a missing or blank search name before any network activity.
pub fn accept_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(RegionsError::RequireName);
    }
    Ok(name)
}

fn name_query(name: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("name", name)
        .finish()
}

pub fn provinces() -> String {
    "provinces".to_string()
}

pub fn province(code: &str) -> String {
    format!("province/{code}")
}

pub fn districts(province_code: &str) -> String {
    format!("districts/{province_code}")
}

pub fn district(code: &str) -> String {
    format!("district/{code}")
}

pub fn subdistricts(district_code: &str) -> String {
    format!("subdistricts/{district_code}")
}

pub fn subdistrict(code: &str) -> String {
    format!("subdistrict/{code}")
}

pub fn villages(subdistrict_code: &str) -> String {
    format!("villages/{subdistrict_code}")
}

pub fn village(code: &str) -> String {
    format!("village/{code}")
}

/// Key for a single record of the given level, e.g. `province/11`.
pub fn by_level(level: Level, code: &str) -> String {
    format!("{}/{code}", level.as_str())
}

pub fn search(name: &str) -> String {
    format!("search?{}", name_query(name))
}

pub fn search_provinces(name: &str) -> String {
    format!("search/provinces?{}", name_query(name))
}

pub fn search_districts(name: &str) -> String {
    format!("search/districts?{}", name_query(name))
}

pub fn search_subdistricts(name: &str) -> String {
    format!("search/subdistricts?{}", name_query(name))
}

pub fn search_villages(name: &str) -> String {
    format!("search/villages?{}", name_query(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_mode_agnostic() {
        assert_eq!(provinces(), "provinces");
        assert_eq!(province("11"), "province/11");
        assert_eq!(districts("11"), "districts/11");
        assert_eq!(village("11.01.01.2001"), "village/11.01.01.2001");
    }

    #[test]
    fn static_paths_carry_json_suffix() {
        assert_eq!(url_path("provinces", Mode::Static), "provinces.json");
        assert_eq!(url_path("province/11", Mode::Static), "province/11.json");
        assert_eq!(url_path("province/11", Mode::Dynamic), "province/11");
    }

    #[test]
    fn search_names_are_percent_encoded() {
        assert_eq!(search_villages("a"), "search/villages?name=a");
        assert_eq!(search("kota baru"), "search?name=kota+baru");
    }

    #[test]
    fn by_level_matches_single_record_keys() {
        assert_eq!(by_level(Level::Province, "11"), province("11"));
        assert_eq!(by_level(Level::District, "11.01"), district("11.01"));
    }

    #[test]
    fn blank_arguments_are_rejected() {
        assert!(matches!(accept_code(""), Err(RegionsError::RequireCode)));
        assert!(matches!(accept_code("  "), Err(RegionsError::RequireCode)));
        assert!(matches!(accept_name(""), Err(RegionsError::RequireName)));
        assert_eq!(accept_code("11").unwrap(), "11");
    }
}
