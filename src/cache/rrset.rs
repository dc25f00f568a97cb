use std::net::{Ipv4Addr, Ipv6Addr};

use crate::dns::{RDatum, RecordType};
use crate::error::CacheError;

/// Compact, tagged in-cache representation of one RRSet's data. Domain
/// names are stored as `Box<str>` rather than whatever richer type the
/// wire parser uses, to bound memory per entry.
///
/// `CNAME` and `SOA` carry exactly one datum by construction (the variant
/// has no `Vec`); the others are enforced nonempty by
/// [`CRSet::from_rdata`] — there is no public constructor that can build an
/// empty `A`/`AAAA`/`NS`/`PTR`/`MX`/`TXT` set. `TXT` accepts any nonempty
/// list of records, same as the other multi-valued types; each wire record
/// keeps its own character-string list rather than being flattened into one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CRSet {
    A(Vec<Ipv4Addr>),
    Aaaa(Vec<Ipv6Addr>),
    Ns(Vec<Box<str>>),
    Ptr(Vec<Box<str>>),
    Mx(Vec<(u16, Box<str>)>),
    /// One entry per wire record; each entry is that record's own
    /// character-string list.
    Txt(Vec<Vec<Box<[u8]>>>),
    Cname(Box<str>),
    Soa {
        mname: Box<str>,
        rname: Box<str>,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
}

impl CRSet {
    pub fn record_type(&self) -> RecordType {
        match self {
            CRSet::A(_) => RecordType::A,
            CRSet::Aaaa(_) => RecordType::AAAA,
            CRSet::Ns(_) => RecordType::NS,
            CRSet::Ptr(_) => RecordType::PTR,
            CRSet::Mx(_) => RecordType::MX,
            CRSet::Txt(_) => RecordType::TXT,
            CRSet::Cname(_) => RecordType::CNAME,
            CRSet::Soa { .. } => RecordType::SOA,
        }
    }

    /// Number of records this CRSet expands to on the wire.
    pub fn len(&self) -> usize {
        match self {
            CRSet::A(v) => v.len(),
            CRSet::Aaaa(v) => v.len(),
            CRSet::Ns(v) => v.len(),
            CRSet::Ptr(v) => v.len(),
            CRSet::Mx(v) => v.len(),
            CRSet::Txt(v) => v.len(),
            CRSet::Cname(_) | CRSet::Soa { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decompose into the list of per-record data it was built from
    /// (inverse of [`CRSet::from_rdata`], used by `extract_rrset`).
    pub fn to_rdata(&self) -> Vec<RDatum> {
        match self {
            CRSet::A(v) => v.iter().map(|a| RDatum::A(*a)).collect(),
            CRSet::Aaaa(v) => v.iter().map(|a| RDatum::Aaaa(*a)).collect(),
            CRSet::Ns(v) => v.iter().map(|n| RDatum::Ns(n.clone())).collect(),
            CRSet::Ptr(v) => v.iter().map(|n| RDatum::Ptr(n.clone())).collect(),
            CRSet::Mx(v) => v
                .iter()
                .map(|(preference, exchange)| RDatum::Mx {
                    preference: *preference,
                    exchange: exchange.clone(),
                })
                .collect(),
            CRSet::Txt(v) => v.iter().map(|strings| RDatum::Txt(strings.clone())).collect(),
            CRSet::Cname(n) => vec![RDatum::Cname(n.clone())],
            CRSet::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => vec![RDatum::Soa {
                mname: mname.clone(),
                rname: rname.clone(),
                serial: *serial,
                refresh: *refresh,
                retry: *retry,
                expire: *expire,
                minimum: *minimum,
            }],
        }
    }

    /// Build a `CRSet` of the given `record_type` by harvesting compatible
    /// rdata out of `data`. Every element of `data` must already agree with
    /// `record_type` (checked by the caller via `rrset_key`); this function
    /// only enforces shape invariants (nonempty, exactly-one for
    /// CNAME/SOA).
    pub fn from_rdata(record_type: RecordType, data: Vec<RDatum>) -> Result<Self, CacheError> {
        if data.is_empty() {
            return Err(CacheError::EmptyRrset);
        }

        match record_type {
            RecordType::A => Ok(CRSet::A(
                data.into_iter()
                    .map(|d| match d {
                        RDatum::A(addr) => Ok(addr),
                        other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            RecordType::AAAA => Ok(CRSet::Aaaa(
                data.into_iter()
                    .map(|d| match d {
                        RDatum::Aaaa(addr) => Ok(addr),
                        other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            RecordType::NS => Ok(CRSet::Ns(
                data.into_iter()
                    .map(|d| match d {
                        RDatum::Ns(name) => Ok(name),
                        other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            RecordType::PTR => Ok(CRSet::Ptr(
                data.into_iter()
                    .map(|d| match d {
                        RDatum::Ptr(name) => Ok(name),
                        other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            RecordType::MX => Ok(CRSet::Mx(
                data.into_iter()
                    .map(|d| match d {
                        RDatum::Mx {
                            preference,
                            exchange,
                        } => Ok((preference, exchange)),
                        other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            RecordType::TXT => Ok(CRSet::Txt(
                data.into_iter()
                    .map(|d| match d {
                        RDatum::Txt(strings) => Ok(strings),
                        other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                    })
                    .collect::<Result<_, _>>()?,
            )),
            RecordType::CNAME => {
                if data.len() != 1 {
                    return Err(CacheError::MultipleCnameOrSoa(data.len()));
                }
                match data.into_iter().next().unwrap() {
                    RDatum::Cname(name) => Ok(CRSet::Cname(name)),
                    other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                }
            }
            RecordType::SOA => {
                if data.len() != 1 {
                    return Err(CacheError::MultipleCnameOrSoa(data.len()));
                }
                match data.into_iter().next().unwrap() {
                    RDatum::Soa {
                        mname,
                        rname,
                        serial,
                        refresh,
                        retry,
                        expire,
                        minimum,
                    } => Ok(CRSet::Soa {
                        mname,
                        rname,
                        serial,
                        refresh,
                        retry,
                        expire,
                        minimum,
                    }),
                    other => Err(CacheError::TypeRdataMismatch(other.implied_type())),
                }
            }
            other => Err(CacheError::TypeRdataMismatch(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(octets: [u8; 4]) -> Ipv4Addr {
        Ipv4Addr::from(octets)
    }

    #[test]
    fn round_trip_a() {
        let crs = CRSet::A(vec![v4([1, 2, 3, 4]), v4([5, 6, 7, 8])]);
        let data = crs.to_rdata();
        let rebuilt = CRSet::from_rdata(RecordType::A, data).unwrap();
        assert_eq!(crs, rebuilt);
    }

    #[test]
    fn round_trip_txt_single_record() {
        let crs = CRSet::Txt(vec![vec![b"hello".to_vec().into_boxed_slice()]]);
        let rebuilt = CRSet::from_rdata(RecordType::TXT, crs.to_rdata()).unwrap();
        assert_eq!(crs, rebuilt);
    }

    #[test]
    fn txt_accepts_multiple_records() {
        let data = vec![
            RDatum::Txt(vec![b"v=spf1".to_vec().into_boxed_slice()]),
            RDatum::Txt(vec![
                b"part1".to_vec().into_boxed_slice(),
                b"part2".to_vec().into_boxed_slice(),
            ]),
        ];
        let crs = CRSet::from_rdata(RecordType::TXT, data).unwrap();
        assert_eq!(crs.len(), 2);
        assert_eq!(
            crs,
            CRSet::Txt(vec![
                vec![b"v=spf1".to_vec().into_boxed_slice()],
                vec![
                    b"part1".to_vec().into_boxed_slice(),
                    b"part2".to_vec().into_boxed_slice(),
                ],
            ])
        );
    }

    #[test]
    fn round_trip_cname() {
        let crs = CRSet::Cname("target.example.".into());
        let rebuilt = CRSet::from_rdata(RecordType::CNAME, crs.to_rdata()).unwrap();
        assert_eq!(crs, rebuilt);
    }

    #[test]
    fn round_trip_soa() {
        let crs = CRSet::Soa {
            mname: "ns1.example.".into(),
            rname: "hostmaster.example.".into(),
            serial: 1,
            refresh: 2,
            retry: 3,
            expire: 4,
            minimum: 5,
        };
        let rebuilt = CRSet::from_rdata(RecordType::SOA, crs.to_rdata()).unwrap();
        assert_eq!(crs, rebuilt);
    }

    #[test]
    fn empty_data_rejected() {
        assert_eq!(
            CRSet::from_rdata(RecordType::A, vec![]).unwrap_err(),
            CacheError::EmptyRrset
        );
    }

    #[test]
    fn multiple_cname_rejected() {
        let data = vec![
            RDatum::Cname("a.example.".into()),
            RDatum::Cname("b.example.".into()),
        ];
        assert!(matches!(
            CRSet::from_rdata(RecordType::CNAME, data),
            Err(CacheError::MultipleCnameOrSoa(2))
        ));
    }

    #[test]
    fn mismatched_rdata_rejected() {
        let data = vec![RDatum::Aaaa(Ipv6Addr::LOCALHOST)];
        assert!(matches!(
            CRSet::from_rdata(RecordType::A, data),
            Err(CacheError::TypeRdataMismatch(RecordType::AAAA))
        ));
    }
}
