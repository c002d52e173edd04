//! Scalar decoding helpers for vendor XML.
//!
//! The vendor is loose with scalars: booleans arrive as `true`, `True` or
//! `TRUE`, and numeric attributes or elements are sometimes present but
//! empty (`<ID />`, `ChargedAmount=""`). Fields decoded with these helpers
//! treat an empty value as zero or `false`. Identifying fields stay on the
//! plain serde impls so a wrong path still fails loudly.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::{Deserializer, Error};
use serde::Deserialize;

/// Accepts `1`, `t`, `T`, `true`, `True`, `TRUE` and their `false`
/// counterparts. Empty is `false`.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "" | "0" | "f" | "F" | "false" | "False" | "FALSE" => Some(false),
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Some(true),
        _ => None,
    }
}

pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_bool(&raw).ok_or_else(|| D::Error::custom(format!("invalid boolean {raw:?}")))
}

/// Parse a number, mapping an empty value to `T::default()`.
pub(crate) fn zero_if_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed
        .parse()
        .map_err(|e| D::Error::custom(format!("invalid number {raw:?}: {e}")))
}
