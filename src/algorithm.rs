use crate::error::{NodeError, Result};
use crate::utils::hash;
use md5::Md5;
use sha2::Sha256;
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The closed set of digest algorithms a record can be hashed with.
///
/// MD5 is offered for compatibility with existing payload digests only; it
/// carries no collision resistance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha3_256,
    Md5,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 3] = [
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha3_256,
        HashAlgorithm::Md5,
    ];

    /// Hashes `input` with this algorithm.
    ///
    /// # Example
    /// ```
    /// use hashnode::HashAlgorithm;
    ///
    /// assert_eq!(HashAlgorithm::Md5.digest(b"{}").len(), 16);
    /// ```
    pub fn digest<Input: AsRef<[u8]>>(&self, input: Input) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha256 => hash::<Sha256, _>(input),
            HashAlgorithm::Sha3_256 => hash::<Sha3_256, _>(input),
            HashAlgorithm::Md5 => hash::<Md5, _>(input),
        }
    }

    /// Digest size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Md5 => 16,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Md5 => "md5",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = NodeError;

    fn from_str(tag: &str) -> Result<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" | "sha2-256" => Ok(HashAlgorithm::Sha256),
            "sha3-256" | "sha3_256" | "sha3256" => Ok(HashAlgorithm::Sha3_256),
            "md5" | "md-5" => Ok(HashAlgorithm::Md5),
            _ => {
                debug!("Rejected hash algorithm tag: {tag:?}");
                Err(NodeError::InvalidAlgorithm(tag.to_string()))
            }
        }
    }
}

/// Numeric tags 1..=3, in declaration order.
impl TryFrom<u8> for HashAlgorithm {
    type Error = NodeError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(HashAlgorithm::Sha256),
            2 => Ok(HashAlgorithm::Sha3_256),
            3 => Ok(HashAlgorithm::Md5),
            other => {
                debug!("Rejected numeric hash algorithm tag: {other}");
                Err(NodeError::InvalidAlgorithm(other.to_string()))
            }
        }
    }
}
