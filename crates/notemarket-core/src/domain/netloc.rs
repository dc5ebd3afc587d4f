//! Host classification for upload-target reachability
//!
//! A backend deployed behind Docker Compose or a home-lab reverse proxy will
//! happily issue presigned URLs pointing at hosts only *it* can resolve
//! (`minio`, `10.x` addresses). A device on the public internet cannot reach
//! those, and the resulting failure mode (hung PUT, DNS error) is opaque to
//! the user. This module classifies hosts so the upload executor can refuse
//! such targets before wasting a transfer attempt.
//!
//! Everything here is pure and synchronous: no DNS lookups, no I/O.

use url::Url;

/// Hostnames that are always local to the deployment network
const INTERNAL_HOSTS: [&str; 4] = ["localhost", "127.0.0.1", "::1", "minio"];

/// Domain suffixes that mark a host as local-network only
const INTERNAL_SUFFIXES: [&str; 2] = [".minio", ".local"];

/// Reachability class of a host as seen from an arbitrary client device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClass {
    /// Loopback, storage-service alias, local-suffix domain, or private IPv4
    Internal,
    /// Assumed reachable from the public internet
    Public,
    /// Host missing or unparsable; carries no topology information
    Unknown,
}

/// Outcome of comparing the upload host against the API host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostVerdict {
    /// The upload target is internal while the API is public: the device
    /// was handed a URL only the backend's own network can reach
    Mismatch,
    /// No dangerous asymmetry detected
    Consistent,
}

/// Extracts the lowercase hostname from a URL string
///
/// Returns `None` for malformed URLs or URLs without a host component.
pub fn host_of_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    parsed.host_str().map(|h| h.to_ascii_lowercase())
}

/// Classifies a host as internal or public
///
/// Private IPv4 membership is decided by octet-range arithmetic, not string
/// prefixes: `172.16.0.0/12` covers second octets 16..=31 only, so
/// `172.99.1.1` classifies Public.
pub fn classify_host(host: &str) -> HostClass {
    let host = host.trim().to_ascii_lowercase();
    if host.is_empty() {
        return HostClass::Unknown;
    }

    if INTERNAL_HOSTS.contains(&host.as_str()) {
        return HostClass::Internal;
    }

    if INTERNAL_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
    {
        return HostClass::Internal;
    }

    if is_private_ipv4(&host) {
        return HostClass::Internal;
    }

    HostClass::Public
}

/// Signals [`HostVerdict::Mismatch`] precisely when the upload host is
/// internal while the API host is public
///
/// The reverse asymmetry (public upload target, internal API) does not
/// endanger the device's ability to complete the request and is not flagged.
/// An [`HostClass::Unknown`] on either side never produces a mismatch:
/// absence of information is not treated as presence of a problem.
pub fn compare_hosts(upload_host: &str, api_host: &str) -> HostVerdict {
    match (classify_host(upload_host), classify_host(api_host)) {
        (HostClass::Internal, HostClass::Public) => HostVerdict::Mismatch,
        _ => HostVerdict::Consistent,
    }
}

/// Returns true if the host is a dotted-quad address inside 10.0.0.0/8,
/// 172.16.0.0/12, or 192.168.0.0/16
fn is_private_ipv4(host: &str) -> bool {
    let mut octets = [0u8; 4];
    let mut parts = host.split('.');
    for slot in &mut octets {
        match parts.next().and_then(|p| p.parse::<u8>().ok()) {
            Some(value) => *slot = value,
            None => return false,
        }
    }
    if parts.next().is_some() {
        return false;
    }

    match octets {
        [10, ..] => true,
        [172, second, ..] => (16..=31).contains(&second),
        [192, 168, ..] => true,
        _ => false,
    }
}
