//! HTTP client for the Discogs release catalog.
//!
//! The only operation consumed is free-text release search: one page of
//! ranked results, each exposing an identifier, a title, and the credited
//! artists in order.

use anyhow::{Context, Result};
use musiclog_core::config::CatalogConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use std::time::Duration;

/// One release returned by the catalog search, not yet logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: i64,
    pub title: String,
    pub artists: Vec<String>,
}

/// Search response wire format.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    id: i64,
    title: String,
    /// The service omits the array for some result types.
    #[serde(default)]
    artists: Vec<RawArtist>,
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    name: String,
}

impl From<RawResult> for Candidate {
    fn from(raw: RawResult) -> Self {
        Candidate {
            id: raw.id,
            title: raw.title,
            artists: raw.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

/// Catalog API client with a fixed user-agent and token credential.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Discogs token={}", config.token))?,
        );

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Search releases by free text. Only the first page is used; an empty
    /// result set is a normal outcome, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<Candidate>> {
        let url = format!("{}/database/search", self.base_url);
        tracing::debug!(query = %query, url = %url, "searching catalog");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("type", "release")])
            .send()
            .await
            .context("catalog request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("catalog search failed ({}): {}", status, body);
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .context("failed to parse catalog response")?;

        tracing::info!(count = parsed.results.len(), "catalog search complete");
        Ok(parsed.results.into_iter().map(Candidate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_search_results() {
        let body = r#"{
            "results": [
                {"id": 17, "title": "Abbey Road", "artists": [{"name": "The Beatles"}]},
                {"id": 23, "title": "Band on the Run", "artists": [{"name": "Wings"}, {"name": "Paul McCartney"}]}
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let candidates: Vec<Candidate> = parsed.results.into_iter().map(Candidate::from).collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, 17);
        assert_eq!(candidates[0].title, "Abbey Road");
        assert_eq!(candidates[0].artists, vec!["The Beatles"]);
        assert_eq!(candidates[1].artists, vec!["Wings", "Paul McCartney"]);
    }

    #[test]
    fn missing_artist_array_defaults_to_empty() {
        let body = r#"{"results": [{"id": 5, "title": "Unknown Pleasures"}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let candidate = Candidate::from(parsed.results.into_iter().next().unwrap());
        assert!(candidate.artists.is_empty());
    }

    #[test]
    fn empty_results_deserialize() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn client_creation() {
        let config = CatalogConfig {
            base_url: "https://api.example.com".to_string(),
            user_agent: "musiclog/0.1".to_string(),
            token: "token".to_string(),
        };
        assert!(CatalogClient::new(&config).is_ok());
    }
}
