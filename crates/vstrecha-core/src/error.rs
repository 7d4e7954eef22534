use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Page cache accessed outside its owning scope - construct a DomainCache and install it before mounting views")]
    OutsideScope,

    #[error("Invalid cache TTL: {0} ms (must be greater than zero)")]
    InvalidTtl(u64),

    #[error("Unknown domain: '{0}'. Valid domains: feed, events, profile")]
    UnknownDomain(String),
}
