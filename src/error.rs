use thiserror::Error;

use crate::dns::RecordType;

/// Reasons a candidate RRSet was rejected by assembly or section
/// extraction. These never escape the cache facade as an `Err` — they're
/// surfaced as a diagnostic list (`Extraction::rejected`) and logged, never
/// returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("records in RRSet disagree on (key, ttl)")]
    MixedTtl,
    #[error("record's rdata shape does not match its declared type {0:?}")]
    TypeRdataMismatch(RecordType),
    #[error("RRSet has no records")]
    EmptyRrset,
    #[error("CNAME/SOA RRSet must have exactly one record, got {0}")]
    MultipleCnameOrSoa(usize),
    #[error("record class is not IN")]
    WrongClass,
    #[error("SOA rdata is malformed: {0}")]
    MalformedSoa(String),
}
