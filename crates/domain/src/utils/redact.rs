//! Log-safe identifiers for client contact data.

use sha2::{Digest, Sha256};

const CONTACT_HASH_SALT: &[u8] = b"lexintake-contact-redaction-salt";

/// Replace a phone number or email with a short salted hash so log lines can
/// still be correlated without exposing the value.
pub fn redact_contact(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(CONTACT_HASH_SALT);
    hasher.update(value.trim().as_bytes());
    let digest = hasher.finalize();
    format!("contact_hash={}", hex::encode(&digest[..8]))
}
