// ABOUTME: Ordered key/value mapping captured from the provider's OAuth redirect
// ABOUTME: Parses query strings and the line-oriented probe body, extracts verifier and user id

//! Callback parameters
//!
//! The provider redirects the browser to the local listener with
//! `oauth_verifier`, `oauth_token` and a provider-assigned `userid` in the
//! query string. Keys keep their first-appearance order; repeated keys keep
//! all values, but the probe body only carries the first one.

use url::form_urlencoded;

use crate::constants::oauth::params;
use crate::models::Verifier;

/// Query parameters of the real provider redirect
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParameters {
    entries: Vec<(String, Vec<String>)>,
}

impl CallbackParameters {
    /// Build from decoded key/value pairs, grouping repeated keys
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            params.push(key.into(), value.into());
        }
        params
    }

    /// Parse a raw (percent-encoded) query string
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()).into_owned())
    }

    /// Parse the `key=value` per line body served to probes
    ///
    /// Lines without `=` become keys with an empty value; blank lines are skipped.
    #[must_use]
    pub fn from_probe_body(body: &str) -> Self {
        Self::from_pairs(
            body.lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.is_empty())
                .map(|line| line.split_once('=').unwrap_or((line, ""))),
        )
    }

    /// Render the probe body: one `key=value` line per key, first value only
    ///
    /// The line format has no escaping. A value containing a line break, or
    /// a key containing `=` or a line break, does not parse back to the same
    /// parameters with [`Self::from_probe_body`]; see [`Self::is_line_safe`].
    #[must_use]
    pub fn to_probe_body(&self) -> String {
        self.iter().fold(String::new(), |mut body, (key, value)| {
            body.push_str(key);
            body.push('=');
            body.push_str(value);
            body.push('\n');
            body
        })
    }

    /// Whether every first value survives a trip through [`Self::to_probe_body`]
    #[must_use]
    pub fn is_line_safe(&self) -> bool {
        let breaks = |text: &str| text.contains(['\n', '\r']);
        self.iter()
            .all(|(key, value)| !breaks(key) && !key.contains('=') && !breaks(value))
    }

    fn push(&mut self, key: String, value: String) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            values.push(value);
        } else {
            self.entries.push((key, vec![value]));
        }
    }

    /// Whether the key was present at all
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// First value of a key
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// All values of a key, in arrival order
    #[must_use]
    pub fn values(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map_or(&[][..], |(_, values)| values.as_slice())
    }

    /// Keys with their first value, in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, values)| {
            (
                key.as_str(),
                values.first().map_or("", String::as_str),
            )
        })
    }

    /// Number of distinct keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameter was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `oauth_verifier`, when present
    #[must_use]
    pub fn verifier(&self) -> Option<Verifier> {
        self.first(params::VERIFIER).map(Verifier::new)
    }

    /// Provider-assigned `userid`, passed on unchanged to the data query
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.first(params::USER_ID)
    }
}
