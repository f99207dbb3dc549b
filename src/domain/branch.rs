//! Release-branch naming.
//!
//! Each major version line lives on a branch named `release-x.{major}.x`
//! (the leading `x` stands in for the edition digit).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::version::{is_valid_version_string, major_version};
use crate::error::{RelkitError, Result};

static RELEASE_BRANCH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"release-x\.(\d+)\.x$").unwrap());

/// Check whether a branch name looks like a release branch.
pub fn is_release_branch(branch_name: &str) -> bool {
    branch_name.starts_with("release-x.")
}

/// The release branch for a version (e.g. "v0.50.1" -> "release-x.50.x").
pub fn release_branch(version: &str) -> Result<String> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }
    Ok(format!("release-x.{}.x", major_version(version)))
}

/// Extract the major version number from a release branch name.
pub fn major_version_number_from_release_branch(branch: &str) -> Result<u32> {
    let captures = RELEASE_BRANCH_RE
        .captures(branch)
        .ok_or_else(|| RelkitError::invalid_branch(branch))?;

    captures[1]
        .parse::<u32>()
        .map_err(|_| RelkitError::invalid_branch(branch))
}

/// The canonical version a release branch tracks
/// (e.g. "release-x.50.x" -> "v0.50.0").
pub fn version_from_release_branch(branch: &str) -> Result<String> {
    let major = major_version_number_from_release_branch(branch)?;
    Ok(format!("v0.{}.0", major))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_release_branch() {
        assert!(is_release_branch("release-x.50.x"));
        assert!(!is_release_branch("master"));
        assert!(!is_release_branch("feature/release-x.50.x"));
    }

    #[test]
    fn test_release_branch() {
        assert_eq!(release_branch("v0.50.1").unwrap(), "release-x.50.x");
        assert_eq!(release_branch("v1.50.1.2").unwrap(), "release-x.50.x");
    }

    #[test]
    fn test_release_branch_invalid_version() {
        assert!(release_branch("50.1").is_err());
    }

    #[test]
    fn test_major_version_number_from_release_branch() {
        assert_eq!(
            major_version_number_from_release_branch("release-x.50.x").unwrap(),
            50
        );
    }

    #[test]
    fn test_major_version_number_invalid_branch() {
        for branch in ["release-50", "release-x.50", "release-x.x.x", ""] {
            let err = major_version_number_from_release_branch(branch).unwrap_err();
            assert!(err.to_string().starts_with("Invalid release branch"));
        }
    }

    #[test]
    fn test_version_from_release_branch() {
        assert_eq!(
            version_from_release_branch("release-x.50.x").unwrap(),
            "v0.50.0"
        );
        assert!(version_from_release_branch("trunk").is_err());
    }
}
