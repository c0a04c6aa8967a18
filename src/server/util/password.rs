//! bcrypt password hashing.

use crate::server::error::AppError;

#[cfg(not(test))]
const COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const COST: u32 = 4;

pub fn hash(password: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, COST)?)
}

/// Checks a password against a stored hash.
///
/// A stored value that is not a bcrypt hash never matches.
pub fn verify(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::debug!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let hashed = hash("secret1").unwrap();

        assert_ne!(hashed, "secret1");
        assert!(verify("secret1", &hashed));
        assert!(!verify("secret2", &hashed));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify("anything", "!"));
    }
}
