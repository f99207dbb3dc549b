use crate::error::Result;
use crate::tags::{TagRef, TagSource};

/// Mock tag source for testing without network access.
///
/// Mirrors the host's matching-refs semantics: a ref matches when its
/// full name starts with `refs/{ref_prefix}`, and results come back in
/// ref-name order.
#[derive(Debug, Default)]
pub struct MockTagSource {
    refs: Vec<TagRef>,
}

impl MockTagSource {
    /// Create an empty mock source
    pub fn new() -> Self {
        MockTagSource { refs: Vec::new() }
    }

    /// Create a mock source seeded with tag names (with or without the
    /// `refs/tags/` prefix)
    pub fn with_tags(names: &[&str]) -> Self {
        let mut source = MockTagSource::new();
        for name in names {
            source.add_tag(*name);
        }
        source
    }

    /// Add a tag, normalizing to a full `refs/tags/` ref name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        let name = name.into();
        let ref_name = if name.starts_with("refs/") {
            name
        } else {
            format!("refs/tags/{}", name)
        };
        self.refs.push(TagRef::new(ref_name));
    }
}

impl TagSource for MockTagSource {
    fn list_matching_refs(&self, _owner: &str, _repo: &str, ref_prefix: &str) -> Result<Vec<TagRef>> {
        let full_prefix = format!("refs/{}", ref_prefix);

        let mut matching: Vec<TagRef> = self
            .refs
            .iter()
            .filter(|tag| tag.ref_name.starts_with(&full_prefix))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.ref_name.cmp(&b.ref_name));

        Ok(matching)
    }
}
