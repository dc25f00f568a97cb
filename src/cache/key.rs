use std::fmt;

use crate::dns::{RecordClass, RecordType};

/// The triple identifying an RRSet. Equality and
/// ordering are structural; name comparison is byte-for-byte on whatever
/// case the wire layer already normalized to this cache does not
/// re-normalize names itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key {
    pub name: Box<str>,
    pub rtype: RecordType,
    pub rclass: RecordClass,
}

impl Key {
    pub fn new(name: impl Into<Box<str>>, rtype: RecordType, rclass: RecordClass) -> Self {
        Self {
            name: name.into(),
            rtype,
            rclass,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {:?}", self.name, self.rtype, self.rclass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural_and_case_sensitive() {
        let a = Key::new("example.com.", RecordType::A, RecordClass::IN);
        let b = Key::new("example.com.", RecordType::A, RecordClass::IN);
        let c = Key::new("EXAMPLE.com.", RecordType::A, RecordClass::IN);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn ordering_is_total() {
        let a = Key::new("a.example.", RecordType::A, RecordClass::IN);
        let b = Key::new("b.example.", RecordType::A, RecordClass::IN);
        assert!(a < b);
    }
}
