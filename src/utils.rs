use sha2::Digest;

/// Runs a single digest over `input` and returns the raw output bytes.
pub fn hash<D: Digest, Input: AsRef<[u8]>>(input: Input) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(input);
    hasher.finalize().to_vec()
}

/// Lowercase hex rendering used for every digest the crate exposes.
pub fn to_hex<Bytes: AsRef<[u8]>>(bytes: Bytes) -> String {
    hex::encode(bytes)
}
