//! Classifies a message's records into rankable RRSet groups.

use crate::cache::assembly::take_rrset;
use crate::cache::key::Key;
use crate::cache::ranking::Ranking;
use crate::cache::rrset::CRSet;
use crate::dns::{DnsMessageView, WireRecord};
use crate::error::CacheError;

/// One successfully assembled, rankable RRSet extracted from a message.
#[derive(Clone, Debug, PartialEq)]
pub struct Extracted {
    pub key: Key,
    pub ttl: u32,
    pub crset: CRSet,
    pub rank: Ranking,
}

/// A group of records that failed assembly, with the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejected {
    pub records: Vec<WireRecord>,
    pub reason: CacheError,
}

/// Result of extracting a message: successful groups ready for insertion,
/// plus a diagnostic list of groups that were rejected.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    pub accepted: Vec<Extracted>,
    pub rejected: Vec<Rejected>,
}

/// Section-dependent ranking table:
///
/// | section    | AA reply     | non-AA reply |
/// |------------|--------------|--------------|
/// | answer     | AuthAnswer   | Answer       |
/// | authority  | not cached   | Additional   |
/// | additional | Additional   | Additional   |
fn answer_rank(is_authoritative: bool) -> Ranking {
    if is_authoritative {
        Ranking::AuthAnswer
    } else {
        Ranking::Answer
    }
}

fn authority_rank(is_authoritative: bool) -> Option<Ranking> {
    if is_authoritative {
        None
    } else {
        Some(Ranking::Additional)
    }
}

/// Stably group `records` by `(name, rtype, rclass)`, preserving first-seen
/// order of both groups and records within a group.
fn group_by_rrset(records: &[WireRecord]) -> Vec<Vec<WireRecord>> {
    let mut groups: Vec<(Key, Vec<WireRecord>)> = Vec::new();
    for rr in records {
        let group_key = Key::new(rr.name.clone(), rr.rtype, rr.rclass);
        match groups.iter_mut().find(|(k, _)| *k == group_key) {
            Some((_, group)) => group.push(rr.clone()),
            None => groups.push((group_key, vec![rr.clone()])),
        }
    }
    groups.into_iter().map(|(_, group)| group).collect()
}

fn assemble_groups(records: &[WireRecord], rank: Ranking, out: &mut Extraction) {
    for group in group_by_rrset(records) {
        match take_rrset(&group) {
            Ok(((key, ttl), crset)) => out.accepted.push(Extracted {
                key,
                ttl,
                crset,
                rank,
            }),
            Err(reason) => out.rejected.push(Rejected {
                records: group,
                reason,
            }),
        }
    }
}

/// Extract every cacheable RRSet out of `message`. Records
/// are stably grouped by `(name, type, class)` within each section, each
/// group passed through `take_rrset`; groups that fail become entries in
/// `Extraction::rejected`, successful groups are paired with the section's
/// `Ranking`.
pub fn extract(message: &impl DnsMessageView) -> Extraction {
    let mut out = Extraction::default();
    let aa = message.is_authoritative();

    assemble_groups(message.answer(), answer_rank(aa), &mut out);

    if let Some(rank) = authority_rank(aa) {
        assemble_groups(message.authority(), rank, &mut out);
    }

    assemble_groups(message.additional(), Ranking::Additional, &mut out);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::{RDatum, RecordClass, RecordType, SimpleMessage};
    use std::net::Ipv4Addr;

    fn a_record(name: &str, ttl: u32, addr: [u8; 4]) -> WireRecord {
        WireRecord::new(
            name,
            RecordType::A,
            RecordClass::IN,
            ttl,
            RDatum::A(Ipv4Addr::from(addr)),
        )
    }

    #[test]
    fn authoritative_answer_ranks_auth_answer() {
        let message = SimpleMessage {
            aa: true,
            answer: vec![a_record("example.com.", 300, [1, 2, 3, 4])],
            authority: vec![],
            additional: vec![],
        };
        let extraction = extract(&message);
        assert_eq!(extraction.accepted.len(), 1);
        assert_eq!(extraction.accepted[0].rank, Ranking::AuthAnswer);
    }

    #[test]
    fn non_authoritative_answer_ranks_answer() {
        let message = SimpleMessage {
            aa: false,
            answer: vec![a_record("example.com.", 300, [1, 2, 3, 4])],
            authority: vec![],
            additional: vec![],
        };
        let extraction = extract(&message);
        assert_eq!(extraction.accepted[0].rank, Ranking::Answer);
    }

    #[test]
    fn authority_section_from_authoritative_reply_is_dropped() {
        let message = SimpleMessage {
            aa: true,
            answer: vec![],
            authority: vec![WireRecord::new(
                "example.com.",
                RecordType::NS,
                RecordClass::IN,
                300,
                RDatum::Ns("ns1.example.".into()),
            )],
            additional: vec![],
        };
        let extraction = extract(&message);
        assert!(extraction.accepted.is_empty());
        assert!(extraction.rejected.is_empty());
    }

    #[test]
    fn authority_section_from_non_authoritative_reply_ranks_additional() {
        let message = SimpleMessage {
            aa: false,
            answer: vec![],
            authority: vec![WireRecord::new(
                "example.com.",
                RecordType::NS,
                RecordClass::IN,
                300,
                RDatum::Ns("ns1.example.".into()),
            )],
            additional: vec![],
        };
        let extraction = extract(&message);
        assert_eq!(extraction.accepted.len(), 1);
        assert_eq!(extraction.accepted[0].rank, Ranking::Additional);
    }

    #[test]
    fn additional_section_always_ranks_additional() {
        let message = SimpleMessage {
            aa: true,
            answer: vec![],
            authority: vec![],
            additional: vec![a_record("glue.example.", 300, [9, 9, 9, 9])],
        };
        let extraction = extract(&message);
        assert_eq!(extraction.accepted[0].rank, Ranking::Additional);
    }

    #[test]
    fn records_are_grouped_before_assembly() {
        let message = SimpleMessage {
            aa: true,
            answer: vec![
                a_record("a.example.", 300, [1, 1, 1, 1]),
                a_record("b.example.", 300, [2, 2, 2, 2]),
                a_record("a.example.", 300, [3, 3, 3, 3]),
            ],
            authority: vec![],
            additional: vec![],
        };
        let extraction = extract(&message);
        assert_eq!(extraction.accepted.len(), 2);
        let a_group = extraction
            .accepted
            .iter()
            .find(|e| e.key.name.as_ref() == "a.example.")
            .unwrap();
        assert_eq!(a_group.crset.len(), 2);
    }

    #[test]
    fn mismatched_group_is_rejected_not_fatal() {
        let message = SimpleMessage {
            aa: true,
            answer: vec![
                a_record("example.com.", 300, [1, 2, 3, 4]),
                a_record("example.com.", 60, [5, 6, 7, 8]),
                a_record("other.example.", 300, [9, 9, 9, 9]),
            ],
            authority: vec![],
            additional: vec![],
        };
        let extraction = extract(&message);
        assert_eq!(extraction.accepted.len(), 1);
        assert_eq!(extraction.rejected.len(), 1);
        assert_eq!(extraction.rejected[0].reason, CacheError::MixedTtl);
    }
}
