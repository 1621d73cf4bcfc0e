// ABOUTME: Signed data query client for the provider API using the OAuth 1.0a access token
// ABOUTME: Builds the getactivity query, checks the response envelope, yields ActivityRows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 withings-export contributors

//! # Signed Query Client
//!
//! One signed `GET <api-base><method>?action=..&userid=..&startdateymd=..&enddateymd=..`
//! per run. The response envelope is
//!
//! ```json
//! {"status": 0, "body": {"activities": [{"date": "2024-01-01", "steps": 100}]}}
//! ```
//!
//! The whole body is parsed before any row is handed out, so callers never
//! see a partial result. Nothing is retried.

use std::vec;

use reqwest::{Client, Method};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::constants::oauth::{query, GET_ACTIVITY_ACTION, MEASURE_METHOD};
use crate::errors::QueryError;
use crate::export::DateRange;
use crate::models::{AccessToken, ActivityRow, ConsumerCredentials, TokenCredentials};
use crate::oauth1::OAuthRequest;
use crate::utils::http_client::api_client;

/// Parameters of one activity query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    /// API method path, appended to the base URL
    pub method: String,
    /// `action` parameter
    pub action: String,
    /// Provider user id from the authorization callback
    pub user_id: Option<String>,
    /// Inclusive date range
    pub range: DateRange,
}

impl ActivityQuery {
    /// `getactivity` on `/measure` for the given user and range
    #[must_use]
    pub fn daily_activities(user_id: Option<String>, range: DateRange) -> Self {
        Self {
            method: MEASURE_METHOD.to_owned(),
            action: GET_ACTIVITY_ACTION.to_owned(),
            user_id,
            range,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    body: Option<EnvelopeBody>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeBody {
    #[serde(default)]
    activities: Option<Vec<ActivityRow>>,
}

/// Finite, single-pass sequence of rows in wire order
#[derive(Debug)]
pub struct ActivityRows {
    rows: vec::IntoIter<ActivityRow>,
}

impl ActivityRows {
    fn new(rows: Vec<ActivityRow>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl Iterator for ActivityRows {
    type Item = ActivityRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl ExactSizeIterator for ActivityRows {}

/// Client issuing signed data queries with one access token
pub struct SignedQueryClient {
    api_base_url: String,
    consumer: ConsumerCredentials,
    access_token: AccessToken,
    client: Client,
}

impl SignedQueryClient {
    /// Create a client with the default API HTTP client
    #[must_use]
    pub fn new(
        api_base_url: impl Into<String>,
        consumer: ConsumerCredentials,
        access_token: AccessToken,
    ) -> Self {
        Self::with_client(api_base_url, consumer, access_token, api_client())
    }

    /// Create a client with a caller-provided HTTP client
    #[must_use]
    pub fn with_client(
        api_base_url: impl Into<String>,
        consumer: ConsumerCredentials,
        access_token: AccessToken,
        client: Client,
    ) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            consumer,
            access_token,
            client,
        }
    }

    /// Run the query and return its rows
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] on an invalid URL, transport failure, non-2xx
    /// status, unparsable envelope, non-zero provider status, or a missing
    /// `body`/`activities` collection.
    pub async fn fetch_activities(&self, activity_query: &ActivityQuery) -> Result<ActivityRows, QueryError> {
        let endpoint = format!(
            "{}{}",
            self.api_base_url.trim_end_matches('/'),
            activity_query.method
        );
        let url = Url::parse(&endpoint).map_err(|source| QueryError::InvalidUrl {
            url: endpoint.clone(),
            source,
        })?;

        let start = activity_query.range.start_ymd();
        let end = activity_query.range.end_ymd();
        let mut request = OAuthRequest::new(Method::GET, url).query_param(query::ACTION, &activity_query.action);
        if let Some(user_id) = &activity_query.user_id {
            request = request.query_param(query::USER_ID, user_id);
        } else {
            warn!("No user id was captured, querying without one");
        }
        let request = request
            .query_param(query::START_DATE, &start)
            .query_param(query::END_DATE, &end);

        let signed = request.sign(&self.consumer, Some(&self.access_token as &dyn TokenCredentials));

        debug!(
            query.action = %activity_query.action,
            query.start = %start,
            query.end = %end,
            endpoint = %endpoint,
            "Sending signed activity query"
        );

        let response = self
            .client
            .request(signed.method, signed.url)
            .send()
            .await
            .map_err(|source| QueryError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| QueryError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let rows = parse_envelope(&body)?;
        info!(
            query.action = %activity_query.action,
            rows = rows.len(),
            "Fetched activities"
        );
        Ok(ActivityRows::new(rows))
    }
}

/// Unwrap `body.activities` from a response envelope
///
/// # Errors
///
/// See [`SignedQueryClient::fetch_activities`].
pub fn parse_envelope(raw: &str) -> Result<Vec<ActivityRow>, QueryError> {
    let envelope: Envelope =
        serde_json::from_str(raw).map_err(|source| QueryError::Envelope { source })?;

    if let Some(status) = envelope.status.filter(|status| *status != 0) {
        return Err(QueryError::ProviderStatus { status });
    }

    envelope
        .body
        .ok_or(QueryError::MissingCollection { field: "body" })?
        .activities
        .ok_or(QueryError::MissingCollection { field: "activities" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_without_status_is_accepted() {
        let rows = parse_envelope(
            r#"{"body":{"activities":[{"date":"2024-01-01","steps":100,"calories":50,"elevation":2}]}}"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fields()[0].as_deref(), Some("2024-01-01"));
        assert_eq!(rows[0].fields()[1].as_deref(), Some("100"));
    }

    #[test]
    fn odd_row_does_not_sink_the_envelope() {
        let rows = parse_envelope(
            r#"{"status":0,"body":{"activities":[
                {"date":"2024-01-01","steps":100,"calories":50,"elevation":2},
                {"date":"2024-01-02","steps":"100","calories":[1],"elevation":"n/a"}
            ]}}"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields()[1].as_deref(), Some("100"));
        assert_eq!(rows[1].fields()[3].as_deref(), Some("n/a"));
    }

    #[test]
    fn provider_error_status_is_rejected() {
        let err = parse_envelope(r#"{"status":342,"body":{}}"#).err();
        assert!(matches!(err, Some(QueryError::ProviderStatus { status: 342 })));
    }

    #[test]
    fn missing_activities_is_rejected() {
        let err = parse_envelope(r#"{"status":0,"body":{"more":false}}"#).err();
        assert!(matches!(
            err,
            Some(QueryError::MissingCollection { field: "activities" })
        ));
    }

    #[test]
    fn rows_iterate_in_wire_order_once() {
        let mut rows = ActivityRows::new(vec![
            ActivityRow {
                date: Some("2024-01-01".into()),
                ..ActivityRow::default()
            },
            ActivityRow {
                date: Some("2024-01-02".into()),
                ..ActivityRow::default()
            },
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.next().and_then(|r| r.date), Some("2024-01-01".into()));
        assert_eq!(rows.next().and_then(|r| r.date), Some("2024-01-02".into()));
        assert!(rows.next().is_none());
    }
}
