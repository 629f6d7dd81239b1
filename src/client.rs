// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Thin request layer over the remote relationship store

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::types::Dataset;

/// Failure talking to the remote relationship store
///
/// A well-formed 2xx response never produces an error; everything else
/// surfaces here, carrying the underlying status when one exists.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response
    #[error("request to the relationship store failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with a non-success status
    #[error("relationship store returned status {status}")]
    Status {
        /// HTTP status code of the response
        status: u16,
    },
}

/// Remote operations the graph store depends on
///
/// One network round-trip per call, no retries; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait RelationshipClient {
    /// Create a relationship; returns the store-assigned identifier
    async fn create_relationship(
        &self,
        source: &str,
        target: &str,
        rel_type: &str,
    ) -> Result<String, RemoteError>;

    /// Delete a relationship by identifier
    async fn delete_relationship(&self, id: &str) -> Result<(), RemoteError>;
}

#[derive(Debug, Serialize)]
struct CreateRelationshipRequest<'a> {
    source: &'a str,
    target: &'a str,
    #[serde(rename = "type")]
    rel_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedRelationship {
    uuid: String,
}

#[derive(Debug, Deserialize)]
struct DatasetSearchResults {
    results: Vec<Dataset>,
}

/// HTTP implementation of [`RelationshipClient`]
#[derive(Debug, Clone)]
pub struct HttpRelationshipClient {
    http: Client,
    relationship_url: String,
    dataset_search_url: String,
}

impl HttpRelationshipClient {
    /// Create a client against the configured endpoints
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            relationship_url: config.relationship_url.clone(),
            dataset_search_url: config.dataset_search_url.clone(),
        }
    }

    /// Search the catalog for datasets matching `term`
    pub async fn search_datasets(&self, term: &str) -> Result<Vec<Dataset>, RemoteError> {
        debug!(term, "searching datasets");
        let response = self
            .http
            .get(&self.dataset_search_url)
            .query(&[("search", term)])
            .send()
            .await?;
        let response = check_status(response)?;
        let results: DatasetSearchResults = response.json().await?;
        Ok(results.results)
    }
}

#[async_trait]
impl RelationshipClient for HttpRelationshipClient {
    async fn create_relationship(
        &self,
        source: &str,
        target: &str,
        rel_type: &str,
    ) -> Result<String, RemoteError> {
        debug!(source, target, rel_type, "creating relationship");
        let response = self
            .http
            .post(&self.relationship_url)
            .json(&CreateRelationshipRequest {
                source,
                target,
                rel_type,
            })
            .send()
            .await?;
        let response = check_status(response)?;
        let created: CreatedRelationship = response.json().await?;
        Ok(created.uuid)
    }

    async fn delete_relationship(&self, id: &str) -> Result<(), RemoteError> {
        debug!(id, "deleting relationship");
        let response = self
            .http
            .delete(item_url(&self.relationship_url, id))
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }
}

/// Detail URL for one relationship under the collection URL
fn item_url(collection_url: &str, id: &str) -> String {
    format!("{}/{}/", collection_url.trim_end_matches('/'), id)
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RemoteError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(RemoteError::Status {
            status: response.status().as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_url_joins_with_trailing_slash() {
        assert_eq!(item_url("http://x/api/relationships", "u1"), "http://x/api/relationships/u1/");
        assert_eq!(item_url("http://x/api/relationships/", "u1"), "http://x/api/relationships/u1/");
    }

    #[test]
    fn test_create_request_wire_shape() {
        let body = serde_json::to_value(CreateRelationshipRequest {
            source: "ds-a",
            target: "ds-b",
            rel_type: "cites",
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"source": "ds-a", "target": "ds-b", "type": "cites"})
        );
    }

    #[test]
    fn test_created_relationship_ignores_extra_fields() {
        let created: CreatedRelationship = serde_json::from_str(
            r#"{"uuid":"u1","source_id":"a","target_id":"b","type":"cites"}"#,
        )
        .unwrap();

        assert_eq!(created.uuid, "u1");
    }

    #[test]
    fn test_search_results_wire_shape() {
        let parsed: DatasetSearchResults = serde_json::from_str(
            r#"{"results":[{"id":"ds-a","url":"/datasets/a/","title":"Dataset A"}]}"#,
        )
        .unwrap();

        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].id, "ds-a");
    }
}
