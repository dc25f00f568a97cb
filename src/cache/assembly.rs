//! Pure transforms between wire records and [`CRSet`].

use crate::cache::key::Key;
use crate::cache::rrset::CRSet;
use crate::dns::{RecordClass, WireRecord};
use crate::error::CacheError;

/// Yields `(Key, TTL)` for a single record iff its class is `IN` and its
/// rdata shape matches its declared type. Mismatched records are rejected
/// outright — the caller rejects the whole RRSet, not just the offending
/// record.
pub fn rrset_key(rr: &WireRecord) -> Result<(Key, u32), CacheError> {
    if rr.rclass != RecordClass::IN {
        return Err(CacheError::WrongClass);
    }
    if rr.rdatum.implied_type() != rr.rtype {
        return Err(CacheError::TypeRdataMismatch(rr.rdatum.implied_type()));
    }
    Ok((Key::new(rr.name.clone(), rr.rtype, rr.rclass), rr.ttl))
}

/// Given a nonempty list of records intended to form one RRSet, succeeds
/// only if every record maps via [`rrset_key`] to the *same* `(Key, TTL)`
/// pair, then dispatches on the first record's type to build a `CRSet`.
pub fn take_rrset(rrs: &[WireRecord]) -> Result<((Key, u32), CRSet), CacheError> {
    let (first_key, first_ttl) = match rrs.first() {
        Some(rr) => rrset_key(rr)?,
        None => return Err(CacheError::EmptyRrset),
    };

    let mut data = Vec::with_capacity(rrs.len());
    for rr in rrs {
        let (key, ttl) = rrset_key(rr)?;
        if key != first_key || ttl != first_ttl {
            return Err(CacheError::MixedTtl);
        }
        data.push(rr.rdatum.clone());
    }

    let crset = CRSet::from_rdata(first_key.rtype, data)?;
    Ok(((first_key, first_ttl), crset))
}

/// Inverse of [`take_rrset`]: produces wire records with owner/type/class
/// from `key` and the given `ttl`.
pub fn extract_rrset(key: &Key, ttl: u32, crset: &CRSet) -> Vec<WireRecord> {
    crset
        .to_rdata()
        .into_iter()
        .map(|rdatum| WireRecord::new(key.name.clone(), key.rtype, key.rclass, ttl, rdatum))
        .collect()
}
