//! Stable digests for pipeline descriptions and record outputs.

use std::fmt;

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::value::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    pub fn to_hex(&self) -> String {
        self.0.iter().fold(String::with_capacity(64), |mut s, b| {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{b:02x}");
            s
        })
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub fn hash_bytes(bytes: &[u8]) -> Hash256 {
    Hash256(blake3::hash(bytes).into())
}

/// Hash any serde-serializable value deterministically (via JSON).
pub fn hash_serde<T: Serialize>(v: &T) -> Result<Hash256, Error> {
    let bytes = serde_json::to_vec(v)?;
    Ok(hash_bytes(&bytes))
}

/// Incremental digest over a sequence of records, one JSON line per record.
///
/// Field order participates in the digest, so two runs hash equal only when
/// they emit identical records in identical layout.
#[derive(Default)]
pub struct RecordDigest {
    hasher: Hasher,
    count: u64,
}

impl RecordDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, record: &Record) -> Result<(), Error> {
        let line = serde_json::to_vec(record)?;
        self.hasher.update(&line);
        self.hasher.update(b"\n");
        self.count += 1;
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn finish(&self) -> Hash256 {
        Hash256(self.hasher.finalize().into())
    }
}
