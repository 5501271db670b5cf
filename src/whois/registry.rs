//! Central WHOIS server registry.
//!
//! We intentionally keep this a small, static mapping (convention over
//! configuration). TLDs missing here fall back to IANA discovery.

/// Get the authoritative WHOIS server for a TLD (lowercase, without leading dot).
pub fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "info" => Some("whois.nic.info"),
        "biz" => Some("whois.nic.biz"),
        "us" => Some("whois.nic.us"),
        "co" => Some("whois.nic.co"),
        "io" => Some("whois.nic.io"),
        "tech" => Some("whois.nic.tech"),
        "ai" => Some("whois.nic.ai"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tlds() {
        assert_eq!(whois_server_for_tld("com"), Some("whois.verisign-grs.com"));
        assert_eq!(whois_server_for_tld("net"), Some("whois.verisign-grs.com"));
        assert!(whois_server_for_tld("io").is_some());
        assert!(whois_server_for_tld("tech").is_some());
    }

    #[test]
    fn test_unknown_tld() {
        assert!(whois_server_for_tld("example").is_none());
    }
}
