//! WHOIS client: pure Rust queries over TCP/43, no external binary required.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::registry::whois_server_for_tld;
use crate::error::{DomainSiftError, Result};
use crate::lookup::RegistryLookup;
use crate::types::RegistrationRecord;

/// Responses containing one of these phrases carry no registration record.
const ABSENT_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "domain not found",
    "domain available",
    "not registered",
    "available for registration",
    "no data found",
    "no object found",
];

/// Field markers that only appear in responses for registered domains.
const REGISTERED_PATTERNS: &[&str] = &[
    "registrar:",
    "creation date:",
    "created:",
    "registered:",
    "name server:",
    "nameserver:",
    "domain status:",
];

/// WHOIS lookup backend
pub struct WhoisClient {
    timeout: Duration,
}

impl WhoisClient {
    /// Create a client with a per-operation connect/read/write timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Resolve the WHOIS server for a domain's TLD.
    ///
    /// Unknown TLDs ask IANA first to discover the authoritative server.
    async fn server_for_domain(&self, domain: &str) -> Result<String> {
        let tld = domain
            .split('.')
            .last()
            .ok_or_else(|| {
                DomainSiftError::lookup(domain, "Invalid domain format - no TLD found", None)
            })?
            .to_lowercase();

        if let Some(server) = whois_server_for_tld(&tld) {
            return Ok(server.to_string());
        }

        let iana = self.query("whois.iana.org", &tld).await?;
        Self::parse_iana_whois_server(&iana)
            .or_else(|| Self::parse_iana_refer_server(&iana))
            .ok_or_else(|| {
                DomainSiftError::lookup(
                    domain,
                    format!("No WHOIS server found for TLD: {}", tld),
                    Some("whois".to_string()),
                )
            })
    }

    async fn query(&self, server: &str, query: &str) -> Result<String> {
        let secs = self.timeout.as_secs();
        let addr = format!("{}:43", server);

        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| DomainSiftError::timeout("WHOIS connect", secs))?
            .map_err(|e| {
                DomainSiftError::network(
                    format!("WHOIS connect failed: {}", e),
                    None,
                    Some(addr.clone()),
                )
            })?;

        timeout(
            self.timeout,
            stream.write_all(format!("{}\r\n", query).as_bytes()),
        )
        .await
        .map_err(|_| DomainSiftError::timeout("WHOIS write", secs))?
        .map_err(|e| {
            DomainSiftError::network(
                format!("WHOIS write failed: {}", e),
                None,
                Some(addr.clone()),
            )
        })?;

        let mut buf = Vec::new();
        timeout(self.timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| DomainSiftError::timeout("WHOIS read", secs))?
            .map_err(|e| {
                DomainSiftError::network(format!("WHOIS read failed: {}", e), None, Some(addr))
            })?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Parse a raw WHOIS response into a registration record.
    ///
    /// A response that carries neither a record nor a recognizable "no
    /// match" marker is unparseable, not an availability signal; the retry
    /// policy decides what to do with it.
    fn parse_response(raw: &str, domain: &str) -> Result<RegistrationRecord> {
        if raw.trim().is_empty() {
            return Err(DomainSiftError::parse(
                "Empty WHOIS response",
                Some(domain.to_string()),
            ));
        }

        let lower = raw.to_lowercase();
        if ABSENT_PATTERNS.iter().any(|p| lower.contains(p)) {
            return Ok(RegistrationRecord::absent());
        }

        let registered_name = extract_field(raw, &["domain name:", "domain:"]).or_else(|| {
            // Some registries omit the name line but still list record
            // fields; the queried domain stands in as the registered name.
            REGISTERED_PATTERNS
                .iter()
                .any(|p| lower.contains(p))
                .then(|| domain.to_string())
        });

        if registered_name.is_none() {
            return Err(DomainSiftError::parse(
                "Unrecognized WHOIS response",
                Some(raw.chars().take(200).collect()),
            ));
        }

        let registrar = extract_field(raw, &["registrar:", "registrar name:"]);
        let creation_date = extract_field(raw, &["creation date:", "created:", "registered:"])
            .and_then(|d| parse_date(&d));
        let expiration_date =
            extract_field(raw, &["expiration date:", "expires:", "expiry date:"])
                .and_then(|d| parse_date(&d));
        let nameservers = extract_nameservers(raw);

        Ok(RegistrationRecord {
            registered_name,
            registrar,
            creation_date,
            expiration_date,
            nameservers,
        })
    }

    fn parse_iana_whois_server(iana: &str) -> Option<String> {
        iana.lines().map(str::trim).find_map(|line| {
            let lower = line.to_lowercase();
            if lower.starts_with("whois:") {
                Some(line.splitn(2, ':').nth(1)?.trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
    }

    fn parse_iana_refer_server(iana: &str) -> Option<String> {
        iana.lines().map(str::trim).find_map(|line| {
            let lower = line.to_lowercase();
            if lower.starts_with("refer:") {
                Some(line.splitn(2, ':').nth(1)?.trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl RegistryLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<RegistrationRecord> {
        let server = self.server_for_domain(domain).await?;
        let raw = self.query(&server, domain).await?;
        Self::parse_response(&raw, domain)
    }
}

/// Find the first line containing one of `patterns` and return the value
/// after the colon.
fn extract_field(raw: &str, patterns: &[&str]) -> Option<String> {
    for pattern in patterns {
        if let Some(line) = raw
            .lines()
            .find(|line| line.to_lowercase().contains(pattern))
        {
            if let Some(value) = line.splitn(2, ':').nth(1) {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

fn extract_nameservers(raw: &str) -> Vec<String> {
    let ns_patterns = ["name server:", "nameserver:", "nserver:"];
    let mut nameservers = Vec::new();

    for line in raw.lines() {
        let lower = line.to_lowercase();
        if ns_patterns.iter().any(|p| lower.contains(p)) {
            if let Some(ns) = line.splitn(2, ':').nth(1) {
                let ns = ns.trim();
                if !ns.is_empty() {
                    nameservers.push(ns.to_string());
                }
            }
        }
    }

    nameservers
}

/// Registries disagree on date formats; try the common ones.
fn parse_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    for format in ["%Y-%m-%d", "%d-%b-%Y", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_match_response() {
        let raw = "No match for domain \"TESTWORD.CO\".\r\n>>> Last update of WHOIS database: 2024-01-01T00:00:00Z <<<";
        let record = WhoisClient::parse_response(raw, "testword.co").unwrap();
        assert!(!record.is_registered());
    }

    #[test]
    fn test_parse_registered_response() {
        let raw = r#"
Domain Name: EXAMPLE.COM
Registrar: RESERVED-Internet Assigned Numbers Authority
Creation Date: 1995-08-14T04:00:00Z
Registry Expiry Date: 2025-08-13T04:00:00Z
Name Server: A.IANA-SERVERS.NET
Name Server: B.IANA-SERVERS.NET
"#;
        let record = WhoisClient::parse_response(raw, "example.com").unwrap();
        assert_eq!(record.registered_name.as_deref(), Some("EXAMPLE.COM"));
        assert!(record.registrar.is_some());
        assert!(record.creation_date.is_some());
        assert!(record.expiration_date.is_some());
        assert_eq!(record.nameservers.len(), 2);
    }

    #[test]
    fn test_parse_registered_without_name_line() {
        let raw = "registrar: Example Registrar\nnameserver: ns1.example.net";
        let record = WhoisClient::parse_response(raw, "test.io").unwrap();
        assert_eq!(record.registered_name.as_deref(), Some("test.io"));
    }

    #[test]
    fn test_parse_empty_response_is_error() {
        assert!(WhoisClient::parse_response("  \r\n", "test.co").is_err());
    }

    #[test]
    fn test_parse_unrecognized_response_is_error() {
        let raw = "Rate limit exceeded. Try again later.";
        assert!(WhoisClient::parse_response(raw, "test.co").is_err());
    }

    #[test]
    fn test_iana_whois_parsing() {
        let sample = r#"
domain:       COM
organisation: Verisign Global Registry Services
whois:        whois.verisign-grs.com
status:       ACTIVE
"#;
        assert_eq!(
            WhoisClient::parse_iana_whois_server(sample).as_deref(),
            Some("whois.verisign-grs.com")
        );
    }

    #[test]
    fn test_iana_refer_parsing() {
        let sample = "refer: whois.nic.io\n";
        assert_eq!(
            WhoisClient::parse_iana_refer_server(sample).as_deref(),
            Some("whois.nic.io")
        );
    }

    #[test]
    fn test_date_formats() {
        assert!(parse_date("1995-08-14T04:00:00Z").is_some());
        assert!(parse_date("2024-03-01").is_some());
        assert!(parse_date("14-Aug-1995").is_some());
        assert!(parse_date("garbage").is_none());
    }
}
