//! Language codes.
//!
//! A [`LanguageCode`] is a small subset of BCP 47: a two or three letter primary subtag,
//! an optional four letter script, an optional region (two letters or three digits) and
//! optional variants. Either `-` or `_` separates subtags. Parsing normalizes case, so
//! `EN_us` and `en-US` are the same code.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Error returned when a string is not a recognizable language code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid language code: '{0}'")]
pub struct LanguageParseError(pub String);

/// A normalized language code such as `en`, `da-DK` or `zh-Hans-CN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Returns the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of the parser within the subtag sequence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    /// Primary subtag consumed.
    Primary,
    /// Script subtag consumed.
    Script,
    /// Region subtag consumed.
    Region,
    /// One or more variants consumed.
    Variant,
}

impl FromStr for LanguageCode {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = || LanguageParseError(s.to_string());
        let mut subtags = s.trim().split(['-', '_']);

        let primary = subtags.next().ok_or_else(fail)?;
        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(fail());
        }

        let mut parts = vec![primary.to_ascii_lowercase()];
        let mut stage = Stage::Primary;

        for subtag in subtags {
            let alpha = subtag.chars().all(|c| c.is_ascii_alphabetic());
            let digits = subtag.chars().all(|c| c.is_ascii_digit());
            let alnum = subtag.chars().all(|c| c.is_ascii_alphanumeric());

            if stage < Stage::Script && subtag.len() == 4 && alpha {
                parts.push(titlecase(subtag));
                stage = Stage::Script;
            } else if stage < Stage::Region
                && ((subtag.len() == 2 && alpha) || (subtag.len() == 3 && digits))
            {
                parts.push(subtag.to_ascii_uppercase());
                stage = Stage::Region;
            } else if is_variant(subtag, alnum) {
                parts.push(subtag.to_ascii_lowercase());
                stage = Stage::Variant;
            } else {
                return Err(fail());
            }
        }

        Ok(Self(parts.join("-")))
    }
}

/// Variants are 5-8 alphanumerics, or 4 starting with a digit.
fn is_variant(subtag: &str, alnum: bool) -> bool {
    alnum
        && match subtag.len() {
            5..=8 => true,
            4 => subtag.starts_with(|c: char| c.is_ascii_digit()),
            _ => false,
        }
}

/// Uppercases the first letter and lowercases the rest.
fn titlecase(subtag: &str) -> String {
    let lower = subtag.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => lower,
    }
}
