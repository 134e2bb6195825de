//! Version string validation and comparison.
//!
//! Versions are dot-separated non-negative integers. Comparison walks components left to
//! right, padding the shorter side with `"0"`, and compares each pair of components as
//! strings. This keeps the ordering libsodium.js tooling has always used, which means a
//! multi-digit component can sort below a single-digit one (`"10" < "9"`).

use crate::error::VersionError;
use std::cmp::Ordering;

/// Oldest libsodium.js release whose corpus layout is understood.
pub const MINIMUM_VERSION: &str = "0.7.3";

/// Whether `version` is one or more dot-separated runs of ASCII digits.
pub fn is_well_formed(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

/// Compare two version strings.
///
/// Returns `None` when either side is malformed.
pub fn compare_versions(a: &str, b: &str) -> Option<Ordering> {
    if !is_well_formed(a) || !is_well_formed(b) {
        return None;
    }

    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or("0");
        let r = right.get(i).copied().unwrap_or("0");
        match l.cmp(r) {
            Ordering::Equal => continue,
            other => return Some(other),
        }
    }

    Some(Ordering::Equal)
}

/// Reject versions that are malformed or older than `minimum`.
pub fn check_version(version: &str, minimum: &str) -> Result<(), VersionError> {
    match compare_versions(version, minimum) {
        None => {
            if is_well_formed(version) {
                Err(VersionError::Malformed(minimum.to_string()))
            } else {
                Err(VersionError::Malformed(version.to_string()))
            }
        }
        Some(Ordering::Less) => Err(VersionError::BelowMinimum {
            version: version.to_string(),
            minimum: minimum.to_string(),
        }),
        Some(_) => Ok(()),
    }
}
