use sha2::{Digest, Sha256};

/// Digest a secret with a salt, returned as `sha256$<salt>$<hex>`.
#[must_use]
pub fn salted_digest(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(secret.as_bytes());
    format!("sha256${salt}${}", hex::encode(hasher.finalize()))
}
