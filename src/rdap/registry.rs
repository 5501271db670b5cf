//! Central RDAP server registry.
//!
//! We intentionally keep this a small, static mapping (convention over
//! configuration).

/// Get the RDAP base URL for a TLD (lowercase, without leading dot).
///
/// Returned URL ends with `/` and includes any version path if needed.
pub fn rdap_base_url(tld: &str) -> Option<&'static str> {
    match tld {
        "com" => Some("https://rdap.verisign.com/com/v1/"),
        "net" => Some("https://rdap.verisign.com/net/v1/"),
        "org" => Some("https://rdap.org.org/"),
        "info" => Some("https://rdap.nic.info/"),
        "biz" => Some("https://rdap.nic.biz/"),
        "us" => Some("https://rdap.nic.us/"),
        "co" => Some("https://rdap.nic.co/"),
        "io" => Some("https://rdap.nic.io/"),
        "tech" => Some("https://rdap.nic.tech/"),
        "ai" => Some("https://rdap.nic.ai/"),
        "me" => Some("https://rdap.nic.me/"),
        "xyz" => Some("https://rdap.nic.xyz/"),
        _ => None,
    }
}

/// Build the RDAP domain query URL for a fully-qualified domain
/// (e.g. `word.co`).
pub fn rdap_domain_url(domain: &str) -> Option<String> {
    let tld = domain.split('.').last()?;
    let base = rdap_base_url(tld)?;
    Some(format!("{base}domain/{domain}"))
}
