//! RDAP client: structured registration data over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::time::timeout;

use super::registry::rdap_domain_url;
use crate::error::{DomainSiftError, Result};
use crate::lookup::RegistryLookup;
use crate::types::RegistrationRecord;

/// RDAP lookup backend
pub struct RdapClient {
    client: Client,
    timeout: Duration,
}

impl RdapClient {
    /// Create a client with a per-request timeout.
    pub fn new(request_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("domain-sift/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create configured HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self {
            client,
            timeout: request_timeout,
        }
    }

    fn record_from_response(domain: &str, response: RdapResponse) -> RegistrationRecord {
        // A 200 with actual registration data means the domain is taken;
        // some servers answer 200 with an empty shell instead of a 404.
        let has_record = !response.status.is_empty()
            || !response.entities.is_empty()
            || !response.events.is_empty()
            || !response.nameservers.is_empty();

        if !has_record {
            return RegistrationRecord::absent();
        }

        let registered_name = Some(
            response
                .ldh_name
                .clone()
                .unwrap_or_else(|| domain.to_string()),
        );

        let registrar = response
            .entities
            .iter()
            .find(|e| e.roles.contains(&"registrar".to_string()))
            .and_then(|e| e.vcard_array.as_ref())
            .and_then(|vcard| {
                vcard
                    .get(1)
                    .and_then(|props| props.as_array())
                    .and_then(|props| props.first())
                    .and_then(|prop| prop.as_array())
                    .and_then(|prop| prop.get(3))
                    .and_then(|name| name.as_str())
                    .map(|s| s.to_string())
            });

        let creation_date = event_date(&response, "registration");
        let expiration_date = event_date(&response, "expiration");

        let nameservers = response
            .nameservers
            .iter()
            .map(|ns| ns.ldh_name.clone())
            .collect();

        RegistrationRecord {
            registered_name,
            registrar,
            creation_date,
            expiration_date,
            nameservers,
        }
    }
}

#[async_trait]
impl RegistryLookup for RdapClient {
    async fn lookup(&self, domain: &str) -> Result<RegistrationRecord> {
        let url = rdap_domain_url(domain).ok_or_else(|| {
            let tld = domain.split('.').last().unwrap_or_default();
            DomainSiftError::lookup(
                domain,
                format!("No RDAP server found for TLD: {}", tld),
                Some("rdap".to_string()),
            )
        })?;

        let secs = self.timeout.as_secs();
        let response = timeout(self.timeout, self.client.get(&url).send())
            .await
            .map_err(|_| DomainSiftError::timeout("RDAP request", secs))?
            .map_err(|e| DomainSiftError::network(e.to_string(), None, Some(url.clone())))?;

        let status = response.status();

        if status.as_u16() == 404 {
            return Ok(RegistrationRecord::absent());
        }

        if !status.is_success() {
            return Err(DomainSiftError::network(
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DomainSiftError::network(e.to_string(), None, Some(url.clone())))?;

        let rdap_response: RdapResponse = serde_json::from_str(&text)
            .map_err(|e| DomainSiftError::parse(e.to_string(), Some(text)))?;

        Ok(Self::record_from_response(domain, rdap_response))
    }
}

fn event_date(response: &RdapResponse, action: &str) -> Option<DateTime<Utc>> {
    response
        .events
        .iter()
        .find(|e| e.event_action == action)
        .and_then(|e| e.event_date.parse::<DateTime<Utc>>().ok())
}

/// RDAP response structures
#[derive(Debug, Deserialize)]
struct RdapResponse {
    #[serde(rename = "ldhName")]
    ldh_name: Option<String>,
    #[serde(default)]
    status: Vec<String>,
    #[serde(default)]
    entities: Vec<RdapEntity>,
    #[serde(default)]
    events: Vec<RdapEvent>,
    #[serde(default)]
    nameservers: Vec<RdapNameserver>,
}

#[derive(Debug, Deserialize)]
struct RdapEntity {
    #[serde(default)]
    roles: Vec<String>,
    #[serde(rename = "vcardArray")]
    vcard_array: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction")]
    event_action: String,
    #[serde(rename = "eventDate")]
    event_date: String,
}

#[derive(Debug, Deserialize)]
struct RdapNameserver {
    #[serde(rename = "ldhName")]
    ldh_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RdapResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_registered_response() {
        let response = parse(
            r#"{
                "ldhName": "example.com",
                "status": ["active"],
                "events": [
                    {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
                    {"eventAction": "expiration", "eventDate": "2025-08-13T04:00:00Z"}
                ],
                "nameservers": [{"ldhName": "a.iana-servers.net"}]
            }"#,
        );

        let record = RdapClient::record_from_response("example.com", response);
        assert_eq!(record.registered_name.as_deref(), Some("example.com"));
        assert!(record.creation_date.is_some());
        assert!(record.expiration_date.is_some());
        assert_eq!(record.nameservers.len(), 1);
    }

    #[test]
    fn test_empty_shell_response() {
        let response = parse("{}");
        let record = RdapClient::record_from_response("empty.io", response);
        assert!(!record.is_registered());
    }

    #[test]
    fn test_name_falls_back_to_query() {
        let response = parse(r#"{"status": ["active"]}"#);
        let record = RdapClient::record_from_response("some.co", response);
        assert_eq!(record.registered_name.as_deref(), Some("some.co"));
    }
}
