// ABOUTME: End-to-end export pipeline: authorize, query activities, write CSV
// ABOUTME: Converts every stage failure into an ExportError carrying its exit code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

use tracing::{info, instrument};

use crate::authorization::AuthorizationFlow;
use crate::config::ExportConfig;
use crate::errors::ExportResult;
use crate::export::DateRange;
use crate::oauth1::OAuth1Service;
use crate::providers::{ActivityQuery, SignedQueryClient, WithingsApi};

/// One export run over a validated configuration
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter
    #[must_use]
    pub const fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Configuration of this run
    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Run the export and return the number of rows written
    ///
    /// `present` receives the authorization URL the user has to open.
    ///
    /// # Errors
    ///
    /// Returns the [`crate::errors::ExportError`] of the first failing stage;
    /// nothing is written unless the query succeeded.
    #[instrument(skip_all, fields(range_days = self.config.range_days))]
    pub async fn run<F>(&self, present: F) -> ExportResult<usize>
    where
        F: FnOnce(&str) + Send,
    {
        let range = DateRange::last_days_from_today(self.config.range_days)?;

        let api = WithingsApi::new(self.config.endpoints.clone());
        let service = OAuth1Service::new(api, self.config.consumer.clone());
        let flow = AuthorizationFlow::new(service, self.config.flow.clone());
        let authorization = flow.authorize(present).await?;

        let client = SignedQueryClient::new(
            self.config.endpoints.api_base_url.clone(),
            self.config.consumer.clone(),
            authorization.access_token.clone(),
        );
        let query = ActivityQuery::daily_activities(authorization.user_id().map(str::to_owned), range);
        info!(
            query.start = %range.start_ymd(),
            query.end = %range.end_ymd(),
            "Querying activities"
        );
        let rows = client.fetch_activities(&query).await?;

        Ok(self.config.output.write_rows(rows)?)
    }
}
