//! Inclusion predicate for catalog entries.

use crate::catalog::CatalogEntry;

/// Only this protocol is ever emitted; DoH entries are always dropped.
pub const DNSCRYPT_PROTO: &str = "DNSCrypt";

/// Which resolver properties are required. `Default` is the strictest setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Resolver must declare DNSSEC validation.
    pub require_dnssec: bool,
    /// Resolver must declare it keeps no logs.
    pub require_nolog: bool,
    /// Resolver must declare it does not filter responses.
    pub require_nofilter: bool,
    /// Accept resolvers reachable over IPv6.
    pub allow_ipv6: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            require_dnssec: true,
            require_nolog: true,
            require_nofilter: true,
            allow_ipv6: false,
        }
    }
}

/// Stateless filter built from [`FilterOptions`].
#[derive(Debug, Clone, Copy)]
pub struct ResolverFilter {
    opts: FilterOptions,
}

impl ResolverFilter {
    pub fn new(opts: FilterOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> FilterOptions {
        self.opts
    }

    /// True if every enabled clause holds. Flags must be exactly `true`
    /// (or exactly `false` for IPv6); absent flags never satisfy a clause.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let dnssec = !self.opts.require_dnssec || entry.dnssec == Some(true);
        let nolog = !self.opts.require_nolog || entry.nolog == Some(true);
        let nofilter = !self.opts.require_nofilter || entry.nofilter == Some(true);
        let ipv6 = self.opts.allow_ipv6 || entry.ipv6 == Some(false);
        let proto = entry.proto.as_deref() == Some(DNSCRYPT_PROTO);
        dnssec && nolog && nofilter && ipv6 && proto
    }
}
