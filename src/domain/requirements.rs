//! Build toolchain requirements per major version.

use tracing::warn;

use crate::domain::version::{is_valid_version_string, major_version};
use crate::error::{RelkitError, Result};

/// Toolchain versions and docker platforms a release is built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRequirements {
    pub java: u32,
    pub node: u32,
    pub platforms: &'static str,
}

const fn reqs(java: u32, node: u32, platforms: &'static str) -> BuildRequirements {
    BuildRequirements {
        java,
        node,
        platforms,
    }
}

// Keyed by major version, ascending. Majors newer than the last entry
// fall back to it.
const VERSION_REQUIREMENTS: &[(u32, BuildRequirements)] = &[
    (43, reqs(8, 14, "linux/amd64")),
    (44, reqs(11, 14, "linux/amd64")),
    (45, reqs(11, 14, "linux/amd64")),
    (46, reqs(11, 16, "linux/amd64")),
    (47, reqs(11, 18, "linux/amd64")),
    (48, reqs(11, 18, "linux/amd64")),
    (49, reqs(11, 18, "linux/amd64")),
    (50, reqs(11, 18, "linux/amd64")),
    (51, reqs(11, 18, "linux/amd64")),
    (52, reqs(11, 18, "linux/amd64")),
    (53, reqs(21, 22, "linux/amd64,linux/arm64")),
    (54, reqs(21, 22, "linux/amd64,linux/arm64")),
    (55, reqs(21, 22, "linux/amd64,linux/arm64")),
    (56, reqs(21, 22, "linux/amd64,linux/arm64")),
];

/// Look up the build requirements for a version.
///
/// A major version newer than the table's last entry is not an error:
/// it gets the latest known requirements, with a warning.
pub fn build_requirements(version: &str) -> Result<BuildRequirements> {
    if !is_valid_version_string(version) {
        return Err(RelkitError::invalid_version(version));
    }

    let major: u32 = major_version(version)
        .parse()
        .map_err(|_| RelkitError::invalid_version(version))?;

    if let Some(&(_, found)) = VERSION_REQUIREMENTS.iter().find(|(key, _)| *key == major) {
        return Ok(found);
    }

    let &(last_key, latest) = VERSION_REQUIREMENTS
        .iter()
        .max_by_key(|(key, _)| *key)
        .ok_or_else(|| RelkitError::config("build requirements table is empty"))?;

    warn!(
        "No build requirements found for version {}, using latest: v{}",
        version, last_key
    );
    Ok(latest)
}
