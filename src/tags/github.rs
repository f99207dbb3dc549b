use reqwest::blocking::Client;

use crate::error::{RelkitError, Result};
use crate::tags::{TagRef, TagSource};

const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: usize = 100;

/// Tag source backed by the GitHub REST matching-refs endpoint.
///
/// Fetches all pages before returning; transport errors propagate
/// unchanged, there is no retry or caching.
pub struct GithubTagSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubTagSource {
    /// Create a source against the public GitHub API
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL, token)
    }

    /// Create a source against a custom API base URL (GitHub Enterprise,
    /// or a local stub in tests)
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("relkit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubTagSource {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }
}

impl TagSource for GithubTagSource {
    fn list_matching_refs(&self, owner: &str, repo: &str, ref_prefix: &str) -> Result<Vec<TagRef>> {
        let url = format!(
            "{}/repos/{}/{}/git/matching-refs/{}",
            self.base_url, owner, repo, ref_prefix
        );

        let mut all = Vec::new();
        let mut page = 1u32;

        loop {
            let mut request = self.client.get(&url).query(&[
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send()?;
            if !response.status().is_success() {
                return Err(RelkitError::remote(format!(
                    "GitHub returned {} for {}",
                    response.status(),
                    url
                )));
            }

            let batch: Vec<TagRef> = response.json()?;
            let fetched = batch.len();
            all.extend(batch);

            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = GithubTagSource::with_base_url("http://localhost:9999/", None).unwrap();
        assert_eq!(source.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_tag_ref_deserializes_github_payload() {
        let payload = r#"[{"ref": "refs/tags/v0.50.1", "node_id": "abc", "url": "u"}]"#;
        let tags: Vec<TagRef> = serde_json::from_str(payload).unwrap();
        assert_eq!(tags, vec![TagRef::new("refs/tags/v0.50.1")]);
    }
}
