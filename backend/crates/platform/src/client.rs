//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers, and for
//! anonymising what gets persisted about them.

use axum::http::{HeaderMap, header};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::crypto::sha256_hex;

/// Client context derived from the request
///
/// Holds the raw values for the lifetime of a request only. Anything that is
/// persisted goes through [`ClientContext::masked_ip`] and
/// [`ClientContext::user_agent_hash`].
#[derive(Debug, Clone, Default)]
pub struct ClientContext {
    /// Client IP address (from X-Forwarded-For, X-Real-IP or direct connection)
    pub ip: Option<IpAddr>,
    /// Original User-Agent string
    pub user_agent: Option<String>,
}

impl ClientContext {
    pub fn new(ip: Option<IpAddr>, user_agent: Option<String>) -> Self {
        Self { ip, user_agent }
    }

    /// IP reduced to its network prefix (/24 or /64)
    pub fn masked_ip(&self) -> Option<String> {
        self.ip.map(mask_ip)
    }

    /// SHA-256 hex digest of the User-Agent
    pub fn user_agent_hash(&self) -> Option<String> {
        self.user_agent
            .as_deref()
            .map(|ua| sha256_hex(ua.as_bytes()))
    }

    /// Key for per-IP counters
    pub fn ip_key(&self) -> String {
        self.ip
            .map(|ip| ip.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Extract the client context from request headers
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - IP of the TCP peer
pub fn extract_client_context(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientContext {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(str::to_string);

    ClientContext::new(extract_client_ip(headers, direct_ip), user_agent)
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For (first entry) and X-Real-IP for reverse proxy
/// setups, then falls back to the direct connection IP.
///
/// # Trusted proxy
///
/// Both headers are taken at face value. The API must only be reachable
/// through a reverse proxy that overwrites X-Forwarded-For and X-Real-IP
/// with the address it actually saw. Exposed directly, a client can put any
/// address in the leftmost entry and pick its own rate-limit bucket.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
            return Some(ip);
        }
    }
    direct_ip
}

/// Mask an IP address to its network in CIDR notation
///
/// IPv4 (and IPv4-mapped IPv6) keeps the first 24 bits, IPv6 the first 64.
///
/// ```rust
/// use platform::client::mask_ip;
///
/// assert_eq!(mask_ip("203.0.113.77".parse().unwrap()), "203.0.113.0/24");
/// assert_eq!(mask_ip("2001:db8:1:2:3:4:5:6".parse().unwrap()), "2001:db8:1:2::/64");
/// ```
pub fn mask_ip(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => mask_ipv4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => mask_ipv4(v4),
            None => {
                let s = v6.segments();
                let network = Ipv6Addr::new(s[0], s[1], s[2], s[3], 0, 0, 0, 0);
                format!("{}/64", network)
            }
        },
    }
}

fn mask_ipv4(ip: Ipv4Addr) -> String {
    let [a, b, c, _] = ip.octets();
    format!("{}/24", Ipv4Addr::new(a, b, c, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_context() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );

        let ctx = extract_client_context(&headers, Some("10.1.2.3".parse().unwrap()));
        assert_eq!(ctx.user_agent.as_deref(), Some("Mozilla/5.0 Test Browser"));
        assert_eq!(ctx.ip, Some("10.1.2.3".parse().unwrap()));
    }

    #[test]
    fn test_missing_user_agent_is_none() {
        let headers = HeaderMap::new();
        let ctx = extract_client_context(&headers, None);
        assert!(ctx.user_agent.is_none());
        assert!(ctx.user_agent_hash().is_none());
        assert_eq!(ctx.ip_key(), "unknown");
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_forwarded_header_wins_over_socket_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.9"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        let ip = extract_client_ip(&headers, Some("10.0.0.2".parse().unwrap()));
        assert_eq!(ip, Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));

        let ip = extract_client_ip(&headers, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(ip, Some("198.51.100.4".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        let ip = extract_client_ip(&headers, Some(direct));
        assert_eq!(ip, Some(direct));
    }

    #[test]
    fn test_mask_ipv4() {
        assert_eq!(mask_ip("192.168.1.200".parse().unwrap()), "192.168.1.0/24");
        assert_eq!(mask_ip("8.8.8.8".parse().unwrap()), "8.8.8.0/24");
    }

    #[test]
    fn test_mask_ipv4_mapped_ipv6() {
        assert_eq!(
            mask_ip("::ffff:203.0.113.9".parse().unwrap()),
            "203.0.113.0/24"
        );
    }

    #[test]
    fn test_mask_ipv6() {
        assert_eq!(
            mask_ip("2001:db8:abcd:12:ffff:1:2:3".parse().unwrap()),
            "2001:db8:abcd:12::/64"
        );
        assert_eq!(mask_ip("::1".parse().unwrap()), "::/64");
    }

    #[test]
    fn test_user_agent_hash_is_not_plaintext() {
        let ctx = ClientContext::new(None, Some("curl/8.0".to_string()));
        let hash = ctx.user_agent_hash().unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!hash.contains("curl"));
    }
}
