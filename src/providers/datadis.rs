//! Datadis distributor integration.
//!
//! Datadis is the Spanish distributors' consumption-data portal. The
//! adapter authenticates (static token or username/password login), pulls
//! the month's consumption records and reduces them to canonical daily
//! records via the normalizer.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{MonthlyEnergyProvider, MonthlySourceData, ProviderError};
use crate::config::DatadisConfig;
use crate::normalize::normalize;

pub struct DatadisProvider {
    cfg: DatadisConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: Option<String>,
    token: Option<String>,
}

impl DatadisProvider {
    pub fn new(cfg: DatadisConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.http_timeout_seconds))
            .build()?;
        Ok(Self { cfg, client })
    }

    /// A statically configured token wins; otherwise log in with
    /// username/password. Datadis has shipped the token under both
    /// `access_token` and `token`, so accept either.
    async fn acquire_token(&self) -> Result<String, ProviderError> {
        if let Some(token) = &self.cfg.token {
            return Ok(token.clone());
        }

        let auth_url = require(&self.cfg.auth_url, "datadis.auth_url")?;
        let username = require(&self.cfg.username, "datadis.username")?;
        let password = require(&self.cfg.password, "datadis.password")?;

        let resp = self
            .client
            .post(auth_url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus(status));
        }

        let auth: AuthResponse = resp.json().await?;
        auth.access_token.or(auth.token).ok_or_else(|| {
            ProviderError::MalformedResponse("auth response carries no token".to_string())
        })
    }

    fn consumption_url(&self, month: &str) -> Result<Url, ProviderError> {
        let base = require(&self.cfg.consumption_url, "datadis.consumption_url")?;
        let cups = require(&self.cfg.cups, "datadis.cups")?;
        let (start, end) = month_range(month).ok_or_else(|| {
            ProviderError::MalformedResponse(format!("not a YYYY-MM month: {month}"))
        })?;

        let mut url = Url::parse(base)
            .map_err(|e| ProviderError::Configuration(format!("datadis.consumption_url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("cups", cups)
            .append_pair("startDate", &start)
            .append_pair("endDate", &end);
        Ok(url)
    }
}

fn require<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, ProviderError> {
    field
        .as_deref()
        .ok_or_else(|| ProviderError::Configuration(name.to_string()))
}

/// First and last calendar day of `month`, as `YYYY-MM-DD` strings.
fn month_range(month: &str) -> Option<(String, String)> {
    let first = NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").ok()?;
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)?
    };
    let last = next_month.pred_opt()?;
    Some((first.to_string(), last.to_string()))
}

#[async_trait]
impl MonthlyEnergyProvider for DatadisProvider {
    fn name(&self) -> &'static str {
        "datadis"
    }

    async fn fetch_month(&self, month: &str) -> Result<MonthlySourceData, ProviderError> {
        let url = self.consumption_url(month)?;
        let token = self.acquire_token().await?;

        let resp = self.client.get(url).bearer_auth(token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::UpstreamStatus(status));
        }

        let payload: Value = resp.json().await?;
        let daily = normalize(&payload, month);
        debug!(
            provider = self.name(),
            month,
            days = daily.len(),
            "normalized distributor payload"
        );
        Ok(MonthlySourceData::from_daily(month, daily))
    }
}
