//! Client-side parameter checks.
//!
//! Failing early here gives the caller a precise `InvalidParameter` instead
//! of whatever the server makes of an empty path segment.

use reqwest::Url;

use crate::core::error::{EgeriaError, Result};

fn require_non_blank<'a>(parameter: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EgeriaError::invalid(parameter, "must not be empty"));
    }
    Ok(trimmed)
}

pub fn validate_guid(parameter: &str, guid: &str) -> Result<()> {
    let guid = require_non_blank(parameter, guid)?;
    if guid.contains(char::is_whitespace) {
        return Err(EgeriaError::invalid(parameter, "a GUID must not contain whitespace"));
    }
    Ok(())
}

pub fn validate_name(parameter: &str, name: &str) -> Result<()> {
    require_non_blank(parameter, name).map(|_| ())
}

pub fn validate_user_id(user_id: &str) -> Result<()> {
    require_non_blank("user_id", user_id).map(|_| ())
}

/// Parse a platform URL. Only `http` and `https` are accepted.
pub fn validate_url(url: &str) -> Result<Url> {
    let url = require_non_blank("platform_url", url)?;
    let parsed = Url::parse(url).map_err(|e| EgeriaError::invalid("platform_url", e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(EgeriaError::invalid(
            "platform_url",
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// `None` means "match everything": `*`, empty and blank strings all map to it.
pub fn normalize_search_string(search: Option<&str>) -> Option<String> {
    let s = search?.trim();
    if s.is_empty() || s == "*" {
        None
    } else {
        Some(s.to_string())
    }
}

/// Build a qualified name of the form `[qualifier::]Type::Display-Name[::version]`.
pub fn qualified_name(
    type_name: &str,
    display_name: &str,
    local_qualifier: Option<&str>,
    version: Option<&str>,
) -> Result<String> {
    let type_name = require_non_blank("type_name", type_name)?;
    let display_name = require_non_blank("display_name", display_name)?;
    let display = display_name.split_whitespace().collect::<Vec<_>>().join("-");

    let mut name = format!("{type_name}::{display}");
    if let Some(q) = local_qualifier.map(str::trim).filter(|q| !q.is_empty()) {
        name = format!("{q}::{name}");
    }
    if let Some(v) = version.map(str::trim).filter(|v| !v.is_empty()) {
        name.push_str("::");
        name.push_str(v);
    }
    Ok(name)
}
