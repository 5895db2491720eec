//! Async HTTP client wrapping the tutordesk JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use tutordesk_core::{
  rate::RateChange,
  store::{TutorPage, TutorQuery},
  tutor::Tutor,
};
use uuid::Uuid;

/// Connection settings for the tutordesk API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the tutordesk JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  // ── Search ────────────────────────────────────────────────────────────────

  /// `GET /api/search?...` — the only authenticated-optional endpoint.
  pub async fn search(&self, query: &TutorQuery) -> Result<TutorPage> {
    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(search) = &query.search {
      params.push(("search", search.clone()));
    }
    // One param per subject; the server takes these verbatim, so subjects
    // containing commas survive the round trip.
    for subject in &query.subjects {
      params.push(("subject", subject.clone()));
    }
    if let Some(min) = query.min_hourly_rate {
      params.push(("min_hourly_rate", min.to_string()));
    }
    if let Some(max) = query.max_hourly_rate {
      params.push(("max_hourly_rate", max.to_string()));
    }
    if let Some(page) = query.page {
      params.push(("page", page.to_string()));
    }
    if let Some(per_page) = query.per_page {
      params.push(("per_page", per_page.to_string()));
    }

    let resp = self
      .auth(self.client.get(self.url("/search")))
      .query(&params)
      .send()
      .await
      .context("GET /search failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /search → {}", resp.status()));
    }
    resp.json().await.context("deserialising search results")
  }

  // ── Tutors ────────────────────────────────────────────────────────────────

  /// `GET /api/tutors/{id}`
  pub async fn get_tutor(&self, tutor_id: Uuid) -> Result<Tutor> {
    let resp = self
      .auth(self.client.get(self.url(&format!("/tutors/{tutor_id}"))))
      .send()
      .await
      .context("GET /tutors/{id} failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /tutors/{tutor_id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising tutor")
  }

  /// `GET /api/tutors/{id}/rate-changes`
  pub async fn rate_history(&self, tutor_id: Uuid) -> Result<Vec<RateChange>> {
    let resp = self
      .auth(
        self
          .client
          .get(self.url(&format!("/tutors/{tutor_id}/rate-changes"))),
      )
      .send()
      .await
      .context("GET /tutors/{id}/rate-changes failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!(
        "GET /tutors/{tutor_id}/rate-changes → {}",
        resp.status()
      ));
    }
    resp.json().await.context("deserialising rate history")
  }
}
