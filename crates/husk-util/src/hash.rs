use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// First 12 hex digits of the SHA-256 of `data`, for status lines.
pub fn short_digest(data: &[u8]) -> String {
    let mut digest = sha256_hex(data);
    digest.truncate(12);
    digest
}
