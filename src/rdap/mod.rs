//! RDAP lookup backend (HTTP)

mod client;
mod registry;

pub use client::RdapClient;
pub use registry::{rdap_base_url, rdap_domain_url};
