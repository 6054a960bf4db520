//! Version comparison
//!
//! Registry versions are compared as semver when both sides parse, and
//! with a dotted numeric comparison otherwise.

use semver::Version;
use std::cmp::Ordering;

/// Compare two version strings, preferring semver rules
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_semver(a), parse_semver(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        _ => compare_numeric(a, b),
    }
}

/// Returns true if `latest` is strictly newer than `declared`
pub fn is_newer(latest: &str, declared: &str) -> bool {
    compare_versions(latest, declared) == Ordering::Greater
}

fn parse_semver(s: &str) -> Option<Version> {
    let s = s.trim();
    Version::parse(s.strip_prefix('v').unwrap_or(s)).ok()
}

/// Dotted numeric comparison; non-numeric parts are ignored
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let parse_parts = |s: &str| -> Vec<u64> {
        let s = s.strip_prefix('v').unwrap_or(s);
        s.split(['.', '-']).filter_map(|p| p.parse().ok()).collect()
    };

    let parts_a = parse_parts(a);
    let parts_b = parse_parts(b);

    for (pa, pb) in parts_a.iter().zip(parts_b.iter()) {
        match pa.cmp(pb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    // If all common parts are equal, the longer version is greater
    parts_a.len().cmp(&parts_b.len())
}
