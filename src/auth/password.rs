use crate::error::AppError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tokio::sync::OnceCell;

static DUMMY: OnceCell<String> = OnceCell::const_new();

/// Argon2id PHC string for storage in `usuarios.contrasena`. Runs on the blocking pool.
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::Internal(format!("password hashing task failed: {}", e)))?
}

/// False for a wrong password and for anything that is not a PHC string.
pub async fn verify_password(password: &str, stored: &str) -> bool {
    let (password, stored) = (password.to_owned(), stored.to_owned());
    tokio::task::spawn_blocking(move || verify_blocking(&password, &stored))
        .await
        .unwrap_or(false)
}

/// Spend one verification on a throwaway hash, so a login for an unknown user
/// costs the same as one for a known user.
pub async fn verify_dummy(password: &str) {
    match DUMMY.get_or_try_init(|| hash_password("reservaciones-dummy")).await {
        Ok(hash) => {
            verify_password(password, hash).await;
        }
        Err(e) => tracing::warn!(error = %e, "dummy hash unavailable"),
    }
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

fn verify_blocking(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("s3creta").await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3creta", &hash).await);
        assert!(!verify_password("otra", &hash).await);
    }

    #[tokio::test]
    async fn plaintext_column_never_matches() {
        assert!(!verify_password("s3creta", "s3creta").await);
    }

    #[tokio::test]
    async fn dummy_hash_is_built_once_and_never_matches() {
        verify_dummy("cualquiera").await;
        let first = DUMMY.get().cloned().unwrap();
        verify_dummy("otra").await;
        assert_eq!(DUMMY.get().unwrap(), &first);
        assert!(!verify_password("cualquiera", &first).await);
    }
}
