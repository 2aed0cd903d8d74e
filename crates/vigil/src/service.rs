//! Service variant tags shared by monitors and echo servers.

use std::fmt;

/// Protocol variant a monitor or echo server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Http,
    Https,
    Icmp,
    Dns,
    Ntp,
    Tcp,
    Udp,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ServiceKind::Http => "HTTP",
            ServiceKind::Https => "HTTPS",
            ServiceKind::Icmp => "ICMP",
            ServiceKind::Dns => "DNS",
            ServiceKind::Ntp => "NTP",
            ServiceKind::Tcp => "TCP",
            ServiceKind::Udp => "UDP",
        };
        f.write_str(tag)
    }
}
