//! Password hashing and comparison

use crate::error::Result;

/// Hash a plaintext password for storage
pub fn hash_password(plain: &str) -> Result<String> {
    Ok(bcrypt::hash(plain, bcrypt::DEFAULT_COST)?)
}

/// Check a plaintext password against a stored hash
pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    Ok(bcrypt::verify(plain, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret-pw").expect("Failed to hash password");
        assert_ne!(hash, "secret-pw");
        assert!(verify_password("secret-pw", &hash).expect("Failed to verify password"));
        assert!(!verify_password("wrong-pw", &hash).expect("Failed to verify password"));
    }
}
