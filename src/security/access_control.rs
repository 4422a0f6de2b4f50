//! Destination host allow-list.
//!
//! Hosts are matched exactly after trimming and lower-casing both sides.
//! An empty list disables the check.

/// Hosts a proxied request may target.
#[derive(Debug, Clone, Default)]
pub struct HostAllowList {
    hosts: Vec<String>,
}

impl HostAllowList {
    pub fn new<S: AsRef<str>>(hosts: &[S]) -> Self {
        Self {
            hosts: hosts
                .iter()
                .map(|h| h.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Returns true if requests to `host` may be forwarded.
    pub fn allows(&self, host: &str) -> bool {
        if self.hosts.is_empty() {
            return true;
        }
        let host = host.to_lowercase();
        self.hosts.iter().any(|allowed| *allowed == host)
    }
}
