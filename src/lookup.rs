//! Lookup backend seam
//!
//! The scan loop only ever talks to a [`RegistryLookup`]; which protocol
//! sits behind it is decided once, at startup.

use async_trait::async_trait;

use crate::error::{DomainSiftError, Result};
use crate::types::{LookupMethod, RegistrationRecord};

#[cfg(feature = "rdap")]
use crate::rdap::RdapClient;
#[cfg(feature = "whois")]
use crate::whois::WhoisClient;

/// A registry lookup capability.
///
/// Returns the registration record for a domain, or an error for anything
/// that went wrong mid-conversation (timeout, transport, unparseable
/// response). Callers decide what a failure means; implementations never
/// guess an availability out of one.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<RegistrationRecord>;
}

#[async_trait]
impl<T: RegistryLookup + ?Sized> RegistryLookup for std::sync::Arc<T> {
    async fn lookup(&self, domain: &str) -> Result<RegistrationRecord> {
        self.as_ref().lookup(domain).await
    }
}

/// Unified client over the compiled lookup backends
pub enum LookupClient {
    #[cfg(feature = "whois")]
    Whois(WhoisClient),
    #[cfg(feature = "rdap")]
    Rdap(RdapClient),
}

impl LookupClient {
    /// Build the client for the requested method.
    ///
    /// Fails if the matching backend was not compiled in.
    pub fn new(method: LookupMethod, timeout: std::time::Duration) -> Result<Self> {
        match method {
            #[cfg(feature = "whois")]
            LookupMethod::Whois => Ok(LookupClient::Whois(WhoisClient::new(timeout))),
            #[cfg(feature = "rdap")]
            LookupMethod::Rdap => Ok(LookupClient::Rdap(RdapClient::new(timeout))),
            #[allow(unreachable_patterns)]
            other => Err(DomainSiftError::config(format!(
                "Lookup method '{}' is not compiled into this build",
                other
            ))),
        }
    }

    pub fn method(&self) -> LookupMethod {
        match self {
            #[cfg(feature = "whois")]
            LookupClient::Whois(_) => LookupMethod::Whois,
            #[cfg(feature = "rdap")]
            LookupClient::Rdap(_) => LookupMethod::Rdap,
        }
    }
}

#[async_trait]
impl RegistryLookup for LookupClient {
    async fn lookup(&self, domain: &str) -> Result<RegistrationRecord> {
        match self {
            #[cfg(feature = "whois")]
            LookupClient::Whois(client) => client.lookup(domain).await,
            #[cfg(feature = "rdap")]
            LookupClient::Rdap(client) => client.lookup(domain).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[cfg(feature = "whois")]
    #[test]
    fn test_whois_client_selection() {
        let client = LookupClient::new(LookupMethod::Whois, Duration::from_secs(5)).unwrap();
        assert_eq!(client.method(), LookupMethod::Whois);
    }

    #[cfg(feature = "rdap")]
    #[test]
    fn test_rdap_client_selection() {
        let client = LookupClient::new(LookupMethod::Rdap, Duration::from_secs(5)).unwrap();
        assert_eq!(client.method(), LookupMethod::Rdap);
    }
}
