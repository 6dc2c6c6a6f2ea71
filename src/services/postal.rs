//! Postal PIN code API client
//!
//! Talks to the public India Post PIN directory. The API answers with a
//! one-element array whose `Status` is `"Success"` when the PIN is known.

use super::traits::{AddressLookup, LookupError};
use crate::state::Address;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Default postal API base URL
pub const DEFAULT_POSTAL_API: &str = "https://api.postalpincode.in";

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice", default)]
    post_office: Option<Vec<PostOffice>>,
}

#[derive(Debug, Deserialize)]
struct PostOffice {
    #[serde(rename = "District")]
    district: String,
    #[serde(rename = "State")]
    state: String,
}

/// HTTP client for the postal PIN directory
pub struct PostalPinClient {
    http: Client,
    base_url: String,
}

impl PostalPinClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AddressLookup for PostalPinClient {
    async fn lookup(&self, pin_code: &str) -> Result<Option<Address>, LookupError> {
        if pin_code.len() != 6 {
            return Ok(None);
        }

        let url = format!("{}/pincode/{}", self.base_url, pin_code);
        tracing::debug!(%url, "looking up PIN code");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body: Vec<PinResponse> = response.json().await?;
        let address = body
            .into_iter()
            .next()
            .filter(|entry| entry.status == "Success")
            .and_then(|entry| entry.post_office)
            .and_then(|offices| offices.into_iter().next())
            .map(|office| Address {
                city: office.district,
                state: office.state,
            });

        Ok(address)
    }
}
