//! The RRSet cache: ranking, key/value model, the indexed store, RRSet
//! assembly, section extraction, the update pipeline, and the facade tying
//! them together.

pub mod assembly;
pub mod facade;
pub mod key;
pub mod pipeline;
pub mod ranking;
pub mod rrset;
pub mod section;
pub mod store;

pub use facade::{build, CacheFacade, DnsCache, NullCache};
pub use key::Key;
pub use ranking::Ranking;
pub use rrset::CRSet;
pub use section::{extract, Extracted, Extraction, Rejected};
