//! Derivation of related version strings.
//!
//! Given one validated version string, these functions produce its
//! sibling edition, floating `.x` wildcard tags, milestone names, and
//! next-version candidates. All functions are pure; malformed input
//! fails fast with [`RelkitError::InvalidVersionString`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::version::{
    is_enterprise_version, is_pre_release_version, is_valid_version_string, version_type, Edition,
    ReleaseType,
};
use crate::error::{RelkitError, Result};

static EDITION_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(v0|v1)\.").unwrap());

static DASH_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"-.+").unwrap());

static MILESTONE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.-]").unwrap());

/// Rewrite a version string onto the open-source track (`v0.` prefix).
pub fn oss_version(version: &str) -> Result<String> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }
    Ok(EDITION_PREFIX_RE.replace(version, "v0.").into_owned())
}

/// Rewrite a version string onto the enterprise track (`v1.` prefix).
pub fn enterprise_version(version: &str) -> Result<String> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }
    Ok(EDITION_PREFIX_RE.replace(version, "v1.").into_owned())
}

/// Rewrite a version string onto the requested track.
pub fn canonical_version(version: &str, edition: Edition) -> Result<String> {
    match edition {
        Edition::Ee => enterprise_version(version),
        Edition::Oss => oss_version(version),
    }
}

/// Strip the edition prefix entirely (e.g. "v0.88.0" -> "88.0").
pub fn generic_version(version: &str) -> Result<String> {
    let oss = oss_version(version)?;
    Ok(oss.trim_start_matches("v0.").to_string())
}

/// Truncate a version to its first `n + 1` components and append `.x`.
///
/// Any `-suffix` is ignored. Used to build floating wildcard tags like
/// `v0.23.x` (n = 1) or `v0.23.4.x` (n = 2).
pub fn dot_xs(version: &str, n: usize) -> String {
    let base = DASH_SUFFIX_RE.replace(version, "");
    let pieces: Vec<&str> = base.split('.').collect();
    let keep = pieces.len().min(n + 1);

    format!("{}.x", pieces[..keep].join("."))
}

/// The floating wildcard tag for a version: 1-level for majors,
/// 2-level for minors and patches.
pub fn dot_x_version(version: &str) -> Result<String> {
    if version_type(version)? == ReleaseType::Major {
        Ok(dot_xs(version, 1))
    } else {
        Ok(dot_xs(version, 2))
    }
}

/// The auxiliary floating tags to also point at a release.
///
/// Always includes the 1-level wildcard for both editions
/// (e.g. v0.23.x / v1.23.x); non-major releases additionally get the
/// 2-level pair (e.g. v0.23.4.x / v1.23.4.x).
pub fn extra_tags_for_version(version: &str) -> Result<Vec<String>> {
    let oss = oss_version(version)?;
    let ee = enterprise_version(version)?;

    let mut tags = vec![dot_xs(&oss, 1), dot_xs(&ee, 1)];

    if version_type(version)? == ReleaseType::Major {
        return Ok(tags);
    }

    tags.push(dot_xs(&oss, 2));
    tags.push(dot_xs(&ee, 2));
    Ok(tags)
}

/// The milestone name for a version.
///
/// Milestones carry no `v` prefix and no `.0` suffix: "0.50" for a
/// major, "0.50.3" for a minor.
pub fn milestone_name(version: &str) -> Result<String> {
    let oss = oss_version(version)?;
    let mut parts = MILESTONE_SPLIT_RE.split(&oss);
    let _prefix = parts.next();
    let major = parts.next().unwrap_or_default().to_string();
    let minor = parts.next().unwrap_or_default().to_string();

    if minor.parse::<u64>().map(|m| m != 0).unwrap_or(false) {
        Ok(format!("0.{}.{}", major, minor))
    } else {
        Ok(format!("0.{}", major))
    }
}

/// Whether a version is eligible for automatic milestone assignment.
///
/// Patch releases (4 dot-parts) are shipped rarely and never get an
/// auto-set milestone.
pub fn ignore_patches(version: &str) -> bool {
    version.split('.').count() < 4
}

/// The candidate versions that can follow a release.
///
/// Pre-releases and patches have no next versions. A minor release has
/// exactly one (the next minor); a major release has two: the x.1 minor
/// within the same major and the next .0 major.
pub fn next_versions(version: &str) -> Result<Vec<String>> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }

    if is_pre_release_version(version) || version_type(version)? == ReleaseType::Patch {
        return Ok(vec![]);
    }

    let edition_prefix = if is_enterprise_version(version) {
        "v1."
    } else {
        "v0."
    };

    let body = EDITION_PREFIX_RE.replace(version, "");
    let mut parts = body.split('.');
    let major: u64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let minor: u64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);

    match version_type(version)? {
        ReleaseType::Minor => Ok(vec![format!("{}{}.{}", edition_prefix, major, minor + 1)]),
        ReleaseType::Major => Ok(vec![
            format!("{}{}.1", edition_prefix, major),
            format!("{}{}.0", edition_prefix, major + 1),
        ]),
        _ => Ok(vec![]),
    }
}

/// The next patch version after a release, OSS-prefixed.
///
/// Missing minor/patch components default to 0; the first pre-release
/// suffix segment is reattached (v0.50.2-rc1 -> v0.50.2.1-rc1).
pub fn find_next_patch_version(version: &str) -> Result<String> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }

    let (main_version, suffix) = match version.split_once('-') {
        Some((main, rest)) => (main, rest.split('-').next()),
        None => (version, None),
    };

    let body = EDITION_PREFIX_RE.replace(main_version, "");
    let mut parts = body.split('.');
    let mut next = || {
        parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .unwrap_or(0)
    };
    let (major, minor, patch) = (next(), next(), next());

    let base = format!("v0.{}.{}.{}", major, minor, patch + 1);

    Ok(match suffix {
        Some(suffix) => format!("{}-{}", base, suffix),
        None => base,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oss_version() {
        assert_eq!(oss_version("v1.50.1").unwrap(), "v0.50.1");
        assert_eq!(oss_version("v0.50.1").unwrap(), "v0.50.1");
    }

    #[test]
    fn test_enterprise_version() {
        assert_eq!(enterprise_version("v0.50.1").unwrap(), "v1.50.1");
        assert_eq!(enterprise_version("v1.50.1").unwrap(), "v1.50.1");
    }

    #[test]
    fn test_canonical_version_dispatch() {
        assert_eq!(
            canonical_version("v1.50.1", Edition::Oss).unwrap(),
            "v0.50.1"
        );
        assert_eq!(
            canonical_version("v0.50.1", Edition::Ee).unwrap(),
            "v1.50.1"
        );
    }

    #[test]
    fn test_canonical_version_idempotent() {
        let once = canonical_version("v1.50.1", Edition::Oss).unwrap();
        let twice = canonical_version(&once, Edition::Oss).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_generic_version() {
        assert_eq!(generic_version("v0.88.0").unwrap(), "88.0");
        assert_eq!(generic_version("v1.88.0").unwrap(), "88.0");
    }

    #[test]
    fn test_transform_rejects_invalid() {
        assert!(oss_version("1.2.3").is_err());
        assert!(enterprise_version("v2.0").is_err());
        assert!(generic_version("").is_err());
    }

    #[test]
    fn test_dot_xs() {
        assert_eq!(dot_xs("v0.23.4", 1), "v0.23.x");
        assert_eq!(dot_xs("v0.23.4", 2), "v0.23.4.x");
        assert_eq!(dot_xs("v0.23.4-RC1", 2), "v0.23.4.x");
    }

    #[test]
    fn test_dot_x_version() {
        assert_eq!(dot_x_version("v0.50.0").unwrap(), "v0.50.x");
        assert_eq!(dot_x_version("v0.50.3").unwrap(), "v0.50.3.x");
    }

    #[test]
    fn test_extra_tags_for_minor_version() {
        let tags = extra_tags_for_version("v0.50.3").unwrap();
        assert_eq!(tags, vec!["v0.50.x", "v1.50.x", "v0.50.3.x", "v1.50.3.x"]);
    }

    #[test]
    fn test_extra_tags_for_major_version() {
        let tags = extra_tags_for_version("v0.50.0").unwrap();
        assert_eq!(tags, vec!["v0.50.x", "v1.50.x"]);
    }

    #[test]
    fn test_milestone_name_major() {
        assert_eq!(milestone_name("v0.50.0").unwrap(), "0.50");
        assert_eq!(milestone_name("v1.50.0").unwrap(), "0.50");
    }

    #[test]
    fn test_milestone_name_minor() {
        assert_eq!(milestone_name("v0.50.3").unwrap(), "0.50.3");
        assert_eq!(milestone_name("v0.50.3-RC1").unwrap(), "0.50.3");
    }

    #[test]
    fn test_ignore_patches() {
        assert!(ignore_patches("v0.50.3"));
        assert!(!ignore_patches("v0.50.3.1"));
    }

    #[test]
    fn test_next_versions_major() {
        assert_eq!(
            next_versions("v0.50.0").unwrap(),
            vec!["v0.50.1", "v0.51.0"]
        );
        assert_eq!(
            next_versions("v1.50.0").unwrap(),
            vec!["v1.50.1", "v1.51.0"]
        );
    }

    #[test]
    fn test_next_versions_minor() {
        assert_eq!(next_versions("v0.50.3").unwrap(), vec!["v0.50.4"]);
    }

    #[test]
    fn test_next_versions_keeps_edition() {
        assert_eq!(next_versions("v1.50.3").unwrap(), vec!["v1.50.4"]);
    }

    #[test]
    fn test_next_versions_patch_and_prerelease_are_empty() {
        assert!(next_versions("v0.50.3.1").unwrap().is_empty());
        assert!(next_versions("v0.50.3-RC1").unwrap().is_empty());
    }

    #[test]
    fn test_next_versions_invalid() {
        assert!(next_versions("v2.50").is_err());
    }

    #[test]
    fn test_find_next_patch_version() {
        assert_eq!(find_next_patch_version("v0.50.2").unwrap(), "v0.50.2.1");
        assert_eq!(find_next_patch_version("v0.50.2.3").unwrap(), "v0.50.2.4");
    }

    #[test]
    fn test_find_next_patch_version_keeps_suffix() {
        assert_eq!(
            find_next_patch_version("v0.50.2-rc1").unwrap(),
            "v0.50.2.1-rc1"
        );
    }

    #[test]
    fn test_find_next_patch_version_keeps_first_suffix_segment_only() {
        assert_eq!(
            find_next_patch_version("v0.50.2-rc-beta1").unwrap(),
            "v0.50.2.1-rc"
        );
    }

    #[test]
    fn test_find_next_patch_version_defaults_missing_components() {
        // three-digit majors are the shortest valid single-component form
        assert_eq!(find_next_patch_version("v0.500").unwrap(), "v0.500.0.1");
    }

    #[test]
    fn test_find_next_patch_version_invalid() {
        assert!(find_next_patch_version("1.2.3").is_err());
    }
}
