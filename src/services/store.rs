//! REST client for the registrations table
//!
//! Inserts rows through a PostgREST-compatible endpoint
//! (`POST {base}/rest/v1/registrations`).

use super::traits::{RegistrationStore, StoreError};
use crate::state::RegistrationRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const TABLE_PATH: &str = "/rest/v1/registrations";

/// Error body returned by the REST endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Registration store backed by a REST endpoint
pub struct RestRegistrationStore {
    http: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl RestRegistrationStore {
    pub fn new(base_url: Option<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
            api_key,
        })
    }
}

#[async_trait]
impl RegistrationStore for RestRegistrationStore {
    async fn insert(&self, record: &RegistrationRecord) -> Result<(), StoreError> {
        let base_url = self.base_url.as_deref().ok_or(StoreError::NotConfigured)?;
        let url = format!("{base_url}{TABLE_PATH}");

        let mut request = self
            .http
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&[record]);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.chars().take(200).collect()
                }
            });

        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> RegistrationRecord {
        RegistrationRecord {
            aadhaar_number: "123456789012".into(),
            name: "Test User".into(),
            organisation_type: "1".into(),
            pan_number: "ABCDE1234F".into(),
            pin_code: "110001".into(),
            state: "Delhi".into(),
            city: "New Delhi".into(),
        }
    }

    fn store_for(server: &MockServer) -> RestRegistrationStore {
        RestRegistrationStore::new(
            Some(server.uri()),
            Some("anon-key".into()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_posts_record_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .and(body_json(json!([{
                "aadhaarnumber": "123456789012",
                "name": "Test User",
                "organisationtype": "1",
                "pannumber": "ABCDE1234F",
                "pincode": "110001",
                "state": "Delhi",
                "city": "New Delhi"
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server).insert(&record()).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejection_uses_message_from_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint"
            })))
            .mount(&server)
            .await;

        let err = store_for(&server).insert(&record()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint"
        );
        assert!(matches!(err, StoreError::Rejected { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_rejection_without_json_body_falls_back_to_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = store_for(&server).insert(&record()).await.unwrap_err();
        assert_eq!(err.to_string(), "upstream exploded");
    }

    #[tokio::test]
    async fn test_missing_endpoint_is_not_configured() {
        let store = RestRegistrationStore::new(None, None, Duration::from_secs(5)).unwrap();
        let err = store.insert(&record()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotConfigured));
    }
}
