//! Session key and Argon2id password hashing for the email + password login.
//!
//! Hashes are stored as PHC-format strings in the `password_hash` column of
//! `app_users`. Error strings are in Portuguese because they surface to the
//! client through `ServerFnError` at the login/register boundaries.

#[cfg(feature = "server")]
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Session key under which the authenticated user's id is stored.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Hash a password with Argon2id and a fresh random salt.
#[cfg(feature = "server")]
pub fn hash_password(password: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Não foi possível gerar o hash da senha: {e}"))
}

/// Check a plaintext password against a stored PHC hash. `Ok(false)` is a
/// mismatch; `Err` means the stored hash is malformed.
#[cfg(feature = "server")]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    let parsed = PasswordHash::new(hash).map_err(|e| format!("Hash de senha inválido: {e}"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("correto-cavalo-bateria").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correto-cavalo-bateria", &hash).unwrap());
        assert!(!verify_password("senha-errada", &hash).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("qualquer", "not-a-phc-string").is_err());
    }
}
