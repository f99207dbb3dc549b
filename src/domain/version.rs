//! Version grammar, classification, and ordering.
//!
//! The product ships two parallel release tracks sharing one numbering
//! scheme: open-source versions are tagged `v0.{major}.{minor}[.{patch}]`
//! and enterprise versions `v1.{major}.{minor}[.{patch}]`, optionally
//! carrying an `-RC1`/`-alpha`/`-beta` pre-release suffix. Everything in
//! this crate that accepts a version string validates it here first.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RelkitError, Result};

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(v0|v1)\.(\d|\.){3,}(-(RC|rc|alpha|beta))*\d*$").unwrap());

static COMMIT_HASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[0-9a-f]{40}$").unwrap());

static ENTERPRISE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^v1\.").unwrap());

static PRERELEASE_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)rc|alpha|beta").unwrap());

// strips "-rc1", "-alpha2" and similar trailing suffixes wholesale
static PRERELEASE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)-\w.+").unwrap());

static RC_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)-rc\d+").unwrap());

static EDITION_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^.]+\.").unwrap());

static SORT_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v?[01]\.").unwrap());

/// Release track a version string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    /// Open-source track, `v0.x` numbering
    Oss,
    /// Enterprise track, `v1.x` numbering
    Ee,
}

impl FromStr for Edition {
    type Err = RelkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "oss" => Ok(Edition::Oss),
            "ee" => Ok(Edition::Ee),
            other => Err(RelkitError::config(format!("Unknown edition: {}", other))),
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Oss => write!(f, "oss"),
            Edition::Ee => write!(f, "ee"),
        }
    }
}

/// Classification of a version string by specificity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Invalid,
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseType::Major => write!(f, "major"),
            ReleaseType::Minor => write!(f, "minor"),
            ReleaseType::Patch => write!(f, "patch"),
            ReleaseType::Invalid => write!(f, "invalid"),
        }
    }
}

/// Check whether a string matches the version grammar.
///
/// This is the sole gate: every other operation over version strings
/// calls it (directly or transitively) before deriving anything.
pub fn is_valid_version_string(version: &str) -> bool {
    VERSION_RE.is_match(version)
}

/// Check whether a string is a full 40-character hex commit hash.
pub fn is_valid_commit_hash(hash: &str) -> bool {
    COMMIT_HASH_RE.is_match(hash)
}

/// Classify a version string as major, minor, or patch.
///
/// The classification counts dot-separated components after stripping
/// any pre-release suffix and one trailing `.0` (majors are tagged with
/// a trailing `.0`, so `v0.50.0` classifies as major while `v0.50.1`
/// classifies as minor).
pub fn version_type(version: &str) -> Result<ReleaseType> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }

    let stripped = PRERELEASE_SUFFIX_RE.replace_all(version, "");
    let trimmed = stripped.strip_suffix(".0").unwrap_or(&stripped);

    match trimmed.split('.').count() {
        2 => Ok(ReleaseType::Major), // x.88
        3 => Ok(ReleaseType::Minor), // x.88.2
        4 => Ok(ReleaseType::Patch), // x.88.2.3
        _ => Ok(ReleaseType::Invalid),
    }
}

/// Check whether a version string is on the enterprise track.
///
/// Only inspects the leading `v1.` token; does not revalidate the full
/// grammar.
pub fn is_enterprise_version(version: &str) -> bool {
    ENTERPRISE_PREFIX_RE.is_match(version)
}

/// Check whether a version string is a valid pre-release (rc/alpha/beta).
pub fn is_pre_release_version(version: &str) -> bool {
    is_valid_version_string(version) && PRERELEASE_MARKER_RE.is_match(version)
}

/// Check whether a version string names a patch release (e.g. v0.50.20.1).
pub fn is_patch_version(version: &str) -> Result<bool> {
    Ok(version_type(version)? == ReleaseType::Patch)
}

struct VersionParts {
    major: String,
    minor: String,
}

fn version_parts(version: &str) -> VersionParts {
    let body = EDITION_TOKEN_RE.replace(version, "");
    let body = RC_SUFFIX_RE.replace(&body, "");
    let mut parts = body.split('.');

    VersionParts {
        major: parts.next().unwrap_or_default().to_string(),
        minor: parts
            .next()
            .filter(|p| !p.is_empty())
            .unwrap_or("0")
            .to_string(),
    }
}

/// Extract the major component of a version string (e.g. "v0.50.1" -> "50").
pub fn major_version(version: &str) -> String {
    version_parts(version).major
}

/// Extract the minor component of a version string, defaulting to "0".
pub fn minor_version(version: &str) -> String {
    version_parts(version).minor
}

/// Total-order comparator over version strings.
///
/// Strips the edition prefix and compares (major, minor, patch)
/// numerically, with a missing or non-numeric component comparing as 0.
/// Suitable for sorting mixed OSS/EE tag lists: the two editions of the
/// same release compare equal.
pub fn version_sort(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

fn sort_key(version: &str) -> (u64, u64, u64) {
    let normalized = SORT_PREFIX_RE.replace(version, "");
    let mut parts = normalized.split('.');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(0)
    };

    (next(), next(), next())
}
