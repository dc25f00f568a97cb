pub mod enums;
pub mod message;

pub use enums::{RecordClass, RecordType};
pub use message::{DnsMessageView, RDatum, SimpleMessage, WireRecord};
