pub mod cache;
pub mod clock;
pub mod config;
pub mod dns;
pub mod error;

pub use cache::{CacheFacade, DnsCache, Key, NullCache, Ranking, CRSet};
pub use clock::{Clock, SystemClock, TestClock};
pub use config::CacheConfig;
pub use error::CacheError;
