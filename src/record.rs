use crate::algorithm::HashAlgorithm;
use crate::canonical::canonical_fields;
use crate::config::RecordConfig;
use crate::error::{NodeError, Result};
use crate::finite::ensure_finite;
use crate::utils::to_hex;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// A computed digest, kept in both raw and hex form.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CachedDigest {
    bytes: Vec<u8>,
    hex: String,
}

/// A keyed payload that hashes itself lazily.
///
/// Mutations only mark the record dirty; the digest over the canonical JSON
/// form of the fields is computed on the next `compute_digest` (or
/// `finalize`) call and cached until the next mutation. This is the leaf a
/// tree node embeds and reads its hash from.
///
/// # Example
/// ```
/// use hashnode::HashableRecord;
///
/// let mut record = HashableRecord::new();
/// record.add_data("hello").unwrap();
/// assert!(record.digest().is_none());
///
/// record.compute_digest().unwrap();
/// assert_eq!(
///     record.digest(),
///     Some("1a1bc6b5b117ed93a2fcc40281efc93d8ccbcc3e52b2dd00a3ca64d54ba7cd38")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HashableRecord {
    fields: BTreeMap<String, Value>,
    algorithm: HashAlgorithm,
    default_key: String,
    digest: Option<CachedDigest>,
    /// Invariant: `digest` is `None` whenever this is set.
    dirty: bool,
    digest_count: u64,
}

impl Default for HashableRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl HashableRecord {
    /// Creates an empty SHA-256 record.
    pub fn new() -> Self {
        Self::with_config(&RecordConfig::default())
    }

    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        let mut record = Self::new();
        record.algorithm = algorithm;
        record
    }

    pub fn with_config(config: &RecordConfig) -> Self {
        Self {
            fields: BTreeMap::new(),
            algorithm: config.algorithm,
            default_key: config.default_key.clone(),
            digest: None,
            dirty: true,
            digest_count: 0,
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The value is converted to JSON up front; if that fails, including for
    /// NaN or infinite floats, the record is left exactly as it was.
    pub fn add_field<K, V>(&mut self, key: K, value: V) -> Result<()>
    where
        K: Into<String>,
        V: Serialize,
    {
        let key = key.into();
        let value = ensure_finite(&value)
            .and_then(|()| serde_json::to_value(value))
            .map_err(|e| {
                debug!("Rejected value for field {key:?}: {e}");
                NodeError::from(e)
            })?;
        trace!("Setting field {key:?}");
        self.fields.insert(key, value);
        self.invalidate();
        Ok(())
    }

    /// `add_field` under the configured default key (`"data"` unless overridden).
    pub fn add_data<V: Serialize>(&mut self, value: V) -> Result<()> {
        let key = self.default_key.clone();
        self.add_field(key, value)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Switches the digest algorithm. Setting the current algorithm again is a no-op.
    pub fn set_algorithm(&mut self, algorithm: HashAlgorithm) {
        if algorithm == self.algorithm {
            return;
        }
        trace!("Switching algorithm {} -> {}", self.algorithm, algorithm);
        self.algorithm = algorithm;
        self.invalidate();
    }

    /// Parses `tag` and switches to it; unknown tags fail without touching the record.
    pub fn set_algorithm_tag(&mut self, tag: &str) -> Result<()> {
        let algorithm = tag.parse()?;
        self.set_algorithm(algorithm);
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of times the hash function has actually run for this record.
    pub fn digest_count(&self) -> u64 {
        self.digest_count
    }

    /// The exact bytes fed to the hash function.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>> {
        Ok(canonical_fields(&self.fields)?.into_bytes())
    }

    /// Hashes the canonical form of the fields if anything changed since the
    /// last run. On error the record stays dirty.
    pub fn compute_digest(&mut self) -> Result<()> {
        if !self.dirty {
            trace!("Digest still current, skipping");
            return Ok(());
        }

        let input = self.canonical_bytes()?;
        let bytes = self.algorithm.digest(&input);
        debug!(
            "Computed {} digest over {} fields ({} bytes)",
            self.algorithm,
            self.fields.len(),
            input.len()
        );

        self.digest = Some(CachedDigest {
            hex: to_hex(&bytes),
            bytes,
        });
        self.dirty = false;
        self.digest_count += 1;
        Ok(())
    }

    /// Hex digest, or `None` if the record changed since it was last hashed.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_ref().map(|d| d.hex.as_str())
    }

    pub fn digest_bytes(&self) -> Option<&[u8]> {
        self.digest.as_ref().map(|d| d.bytes.as_slice())
    }

    /// Computes the digest if needed and returns it.
    pub fn finalize(&mut self) -> Result<&str> {
        self.compute_digest()?;
        self.digest().ok_or(NodeError::StaleDigest)
    }

    /// Compares two records by digest.
    ///
    /// Both records must have a current digest; a stale side fails with
    /// `StaleDigest` rather than comparing two missing values.
    pub fn equals(&self, other: &HashableRecord) -> Result<bool> {
        match (&self.digest, &other.digest) {
            (Some(ours), Some(theirs)) => {
                Ok(self.algorithm == other.algorithm && ours.bytes == theirs.bytes)
            }
            _ => Err(NodeError::StaleDigest),
        }
    }

    fn invalidate(&mut self) {
        self.dirty = true;
        self.digest = None;
    }
}

/// Compares two arbitrary values as records.
///
/// Fails with `TypeMismatch` unless both are `HashableRecord`s, then defers to
/// [`HashableRecord::equals`].
///
/// # Example
/// ```
/// use hashnode::{HashableRecord, NodeError, compare};
///
/// let mut record = HashableRecord::new();
/// record.compute_digest().unwrap();
///
/// let err = compare(&record, &"not a record").unwrap_err();
/// assert!(matches!(err, NodeError::TypeMismatch(_)));
/// ```
pub fn compare(x: &dyn Any, y: &dyn Any) -> Result<bool> {
    let x = x
        .downcast_ref::<HashableRecord>()
        .ok_or(NodeError::TypeMismatch("a non-record left operand"))?;
    let y = y
        .downcast_ref::<HashableRecord>()
        .ok_or(NodeError::TypeMismatch("a non-record right operand"))?;
    x.equals(y)
}

/// One `key value` line per field, then the digest (or `<stale>`).
impl fmt::Display for HashableRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.fields {
            writeln!(f, "{key} {value}")?;
        }
        write!(f, "{}", self.digest().unwrap_or("<stale>"))
    }
}
