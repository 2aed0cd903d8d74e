//! DNS server probe.
//!
//! Resolves the server name with the system resolver, then issues the
//! configured query with the resulting address as the sole nameserver.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use tokio::net::lookup_host;

use super::Probe;

pub use hickory_resolver::proto::rr::RecordType;

/// Queries a single DNS server for one record and reports the answer set.
pub struct DnsProbe {
    server: String,
    query: String,
    record_type: RecordType,
}

impl DnsProbe {
    pub fn new(
        server: impl Into<String>,
        query: impl Into<String>,
        record_type: RecordType,
    ) -> Self {
        Self { server: server.into(), query: query.into(), record_type }
    }

    async fn resolve(&self) -> crate::Result<String> {
        let nameserver = resolve_server(&self.server).await?;
        let config = ResolverConfig::from_parts(
            None,
            Vec::new(),
            NameServerConfigGroup::from_ips_clear(&[nameserver], 53, true),
        );
        let resolver = TokioAsyncResolver::tokio(config, ResolverOpts::default());

        let lookup = resolver.lookup(self.query.as_str(), self.record_type).await?;
        let records: Vec<String> = lookup.iter().map(|rdata| rdata.to_string()).collect();
        Ok(records.join(" "))
    }
}

/// Resolve the nameserver's own address with the system resolver.
async fn resolve_server(server: &str) -> crate::Result<IpAddr> {
    let mut addrs = lookup_host((server, 53)).await?;
    addrs
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| anyhow::anyhow!("no addresses found for {server}"))
}

#[async_trait]
impl Probe for DnsProbe {
    async fn check(&self) -> String {
        match self.resolve().await {
            Ok(records) => format!(
                "Server at server: {}\nquery: {} is up.\nQuery results of record type {} returned {records}",
                self.server, self.query, self.record_type
            ),
            // Timeouts, missing nameservers, empty answers, and failed
            // server-name resolution all end up here with their detail.
            Err(e) => format!(
                "DNS server status check to server: {}\nquery: {}\nrecord_type: {}\nFAILED!\n{e}",
                self.server, self.query, self.record_type
            ),
        }
    }
}
