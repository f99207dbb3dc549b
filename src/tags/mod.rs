//! Tag listing and release resolution.
//!
//! The [TagSource] trait abstracts the paginated ref-listing capability
//! of a source-control host. The concrete implementations include:
//!
//! - [github::GithubTagSource]: the GitHub REST API over `reqwest`
//! - [mock::MockTagSource]: an in-memory implementation for testing
//!
//! Resolution itself is a pure filter/sort over the fetched refs, so
//! most code should depend on the trait rather than a concrete source.

pub mod github;
pub mod mock;

pub use github::GithubTagSource;
pub use mock::MockTagSource;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::branch::major_version_number_from_release_branch;
use crate::domain::transform::find_next_patch_version;
use crate::domain::version::{
    is_patch_version, is_pre_release_version, major_version, version_sort,
};
use crate::error::{RelkitError, Result};

static SDK_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"embedding-sdk-(0\.\d+\.\d+(-\w+)?)$").unwrap());

static SDK_PRERELEASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+\.\d+\.\d+-\w+)$").unwrap());

/// SDK pre-release identifiers that still count as releases
const ALLOWED_SDK_PRERELEASE_IDENTIFIERS: &[&str] = &["nightly"];

/// An external version-control ref, e.g. `refs/tags/v0.50.1`.
///
/// Tags are externally owned and immutable; this crate only reads and
/// ranks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

impl TagRef {
    /// Create a tag ref from a string
    pub fn new(ref_name: impl Into<String>) -> Self {
        TagRef {
            ref_name: ref_name.into(),
        }
    }

    /// The tag name with any `refs/tags/` prefix stripped
    pub fn name(&self) -> &str {
        self.ref_name
            .strip_prefix("refs/tags/")
            .unwrap_or(&self.ref_name)
    }
}

/// Paginated ref-listing capability of a source-control host.
///
/// A single read: all refs under `refs/{ref_prefix}` for a repository,
/// fetched to exhaustion before returning. Implementations propagate
/// transport errors unchanged and perform no retries or caching.
pub trait TagSource: Send + Sync {
    fn list_matching_refs(&self, owner: &str, repo: &str, ref_prefix: &str) -> Result<Vec<TagRef>>;
}

/// Inclusion rules for [get_last_release_from_tags]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseFilter {
    pub ignore_patches: bool,
    pub ignore_pre_releases: bool,
}

/// Pick the latest release from a list of refs.
///
/// Floating `.x` tags are never candidates. Returns `Ok(None)` when
/// nothing survives the filters; errors only if `ignore_patches` forces
/// classification of a malformed tag.
pub fn get_last_release_from_tags(
    tags: &[TagRef],
    filter: ReleaseFilter,
) -> Result<Option<String>> {
    let mut names = Vec::new();

    for tag in tags {
        let name = tag.name();
        if name.contains(".x") {
            continue;
        }
        if filter.ignore_pre_releases && is_pre_release_version(name) {
            continue;
        }
        if filter.ignore_patches && is_patch_version(name)? {
            continue;
        }
        names.push(name.to_string());
    }

    names.sort_by(|a, b| version_sort(a, b));
    Ok(names.pop())
}

/// Fetch the latest release tag, optionally scoped to the major version
/// of `version` and filtered by `filter`.
pub fn get_last_release_tag(
    source: &dyn TagSource,
    owner: &str,
    repo: &str,
    version: Option<&str>,
    filter: ReleaseFilter,
) -> Result<Option<String>> {
    let ref_prefix = match version {
        Some(version) => format!("tags/v0.{}", major_version(version)),
        None => "tags/v0.".to_string(),
    };

    let tags = source.list_matching_refs(owner, repo, &ref_prefix)?;
    get_last_release_from_tags(&tags, filter)
}

/// Keep tags with no trailing pre-release identifier, or with one in
/// the allow-list (e.g. nightly builds).
pub fn has_supported_prerelease_identifier(tag: &TagRef) -> bool {
    let Some(captures) = SDK_PRERELEASE_RE.captures(&tag.ref_name) else {
        return true;
    };

    match semver::Version::parse(&captures[1]) {
        Ok(parsed) => ALLOWED_SDK_PRERELEASE_IDENTIFIERS.contains(&parsed.pre.as_str()),
        Err(_) => false,
    }
}

/// Fetch the latest embedding-sdk release tag, optionally scoped to a
/// major version.
pub fn get_last_embedding_sdk_release_tag(
    source: &dyn TagSource,
    owner: &str,
    repo: &str,
    major_version: Option<&str>,
) -> Result<Option<String>> {
    let ref_prefix = format!("tags/embedding-sdk-0.{}", major_version.unwrap_or(""));

    let tags = source.list_matching_refs(owner, repo, &ref_prefix)?;
    let supported: Vec<TagRef> = tags
        .into_iter()
        .filter(has_supported_prerelease_identifier)
        .collect();

    get_last_release_from_tags(&supported, ReleaseFilter::default())
}

/// Extract the semver body from an `embedding-sdk-{semver}` tag name.
pub fn sdk_version_from_release_tag_name(tag_name: &str) -> Result<String> {
    SDK_TAG_RE
        .captures(tag_name)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| RelkitError::invalid_sdk_tag(tag_name))
}

/// Resolve the SDK package version shipped from a release branch.
///
/// Prefers the latest SDK tag for the branch's major version; when none
/// exists the global latest SDK tag is used instead, with a warning.
pub fn sdk_version_from_release_branch_name(
    source: &dyn TagSource,
    owner: &str,
    repo: &str,
    branch_name: &str,
) -> Result<String> {
    let major = major_version_number_from_release_branch(branch_name)?;

    info!("Resolved latest major release version - {}", major);
    info!("Looking for git tag - \"embedding-sdk-0.{}.*\"", major);

    if let Some(tag) =
        get_last_embedding_sdk_release_tag(source, owner, repo, Some(&major.to_string()))?
    {
        let sdk_version = sdk_version_from_release_tag_name(&tag)?;
        info!(
            "Resolved SDK latest release version for v{} - {}",
            major, sdk_version
        );
        return Ok(sdk_version);
    }

    let latest = get_last_embedding_sdk_release_tag(source, owner, repo, None)?
        .ok_or_else(|| RelkitError::remote("No embedding sdk release tags found"))?;
    let sdk_version = sdk_version_from_release_tag_name(&latest)?;

    warn!(
        "Failed to resolve latest SDK package version! Using latest SDK version available - {}",
        sdk_version
    );
    Ok(sdk_version)
}

/// Compute the next patch version for a major release line by fetching
/// its latest release tag (patches and pre-releases included).
pub fn get_next_patch_version(
    source: &dyn TagSource,
    owner: &str,
    repo: &str,
    major_version: u32,
) -> Result<String> {
    let version = format!("v0.{}.0", major_version);

    let last_release = get_last_release_tag(
        source,
        owner,
        repo,
        Some(&version),
        ReleaseFilter {
            ignore_patches: false,
            ignore_pre_releases: false,
        },
    )?
    .ok_or_else(|| {
        RelkitError::remote(format!("No release tags found for v0.{}", major_version))
    })?;

    find_next_patch_version(&last_release)
}
