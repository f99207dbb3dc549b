// tests/transform_test.rs
use relkit::domain::transform::{
    canonical_version, extra_tags_for_version, find_next_patch_version, generic_version,
    milestone_name, next_versions,
};
use relkit::domain::version::Edition;

#[test]
fn canonical_versions_differ_only_in_edition_token() {
    for version in ["v0.50.1", "v1.50.1", "v0.50.0-RC1", "v1.50.1.2"] {
        let oss = canonical_version(version, Edition::Oss).unwrap();
        let ee = canonical_version(version, Edition::Ee).unwrap();

        assert!(oss.starts_with("v0."));
        assert!(ee.starts_with("v1."));
        assert_eq!(
            oss.trim_start_matches("v0."),
            ee.trim_start_matches("v1."),
            "numeric bodies of {} diverged",
            version
        );
    }
}

#[test]
fn canonical_version_is_idempotent() {
    for version in ["v0.50.1", "v1.50.1"] {
        for edition in [Edition::Oss, Edition::Ee] {
            let once = canonical_version(version, edition).unwrap();
            let twice = canonical_version(&once, edition).unwrap();
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn generic_version_strips_prefix() {
    assert_eq!(generic_version("v0.88.0").unwrap(), "88.0");
    assert_eq!(generic_version("v1.88.0.2").unwrap(), "88.0.2");
}

#[test]
fn next_versions_for_major_minor_patch() {
    assert_eq!(next_versions("v0.50.0").unwrap(), vec!["v0.50.1", "v0.51.0"]);
    assert_eq!(next_versions("v0.50.3").unwrap(), vec!["v0.50.4"]);
    assert_eq!(next_versions("v0.50.3.1").unwrap(), Vec::<String>::new());
}

#[test]
fn extra_tags_counts() {
    // non-major releases get both wildcard levels for both editions
    assert_eq!(extra_tags_for_version("v0.50.3").unwrap().len(), 4);
    // majors only the 1-level pair
    assert_eq!(extra_tags_for_version("v0.50.0").unwrap().len(), 2);
}

#[test]
fn next_patch_version_examples() {
    assert_eq!(find_next_patch_version("v0.50.2").unwrap(), "v0.50.2.1");
    assert_eq!(find_next_patch_version("v0.50.2.3").unwrap(), "v0.50.2.4");
    assert_eq!(
        find_next_patch_version("v0.50.2-rc1").unwrap(),
        "v0.50.2.1-rc1"
    );
    // enterprise input still yields an OSS-prefixed patch version
    assert_eq!(find_next_patch_version("v1.50.2").unwrap(), "v0.50.2.1");
}

#[test]
fn milestone_names() {
    assert_eq!(milestone_name("v0.50.0").unwrap(), "0.50");
    assert_eq!(milestone_name("v1.50.3").unwrap(), "0.50.3");
}

#[test]
fn transform_functions_reject_invalid_input() {
    assert!(canonical_version("1.2.3", Edition::Oss).is_err());
    assert!(next_versions("v2.0").is_err());
    assert!(find_next_patch_version("").is_err());
    assert!(milestone_name("v0.5").is_err());
}
