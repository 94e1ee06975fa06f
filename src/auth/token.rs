use crate::error::AppError;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// `usuarios.pk_id_usuario`
    pub id: i32,
    /// Login name.
    pub usuario: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 keys derived from the configured shared secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        JwtKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, id: i32, usuario: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let claims = Claims {
            id,
            usuario: usuario.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("token signing failed: {}", e)))
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token validation failed: {e}");
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let keys = JwtKeys::new("secreto", 8);
        let token = keys.issue(3, "admin").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.usuario, "admin");
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = JwtKeys::new("secreto", 8).issue(3, "admin").unwrap();
        let err = JwtKeys::new("otro", 8).verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("secreto", 8);
        let now = chrono::Utc::now().timestamp();
        let token = keys
            .sign(&Claims {
                id: 1,
                usuario: "admin".into(),
                jti: "x".into(),
                iat: now - 10 * 3600,
                exp: now - 2 * 3600,
            })
            .unwrap();
        assert!(matches!(keys.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = JwtKeys::new("secreto", 8);
        assert!(matches!(keys.verify("no.es.token"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn tokens_get_distinct_ids() {
        let keys = JwtKeys::new("secreto", 1);
        let a = keys.verify(&keys.issue(1, "a").unwrap()).unwrap();
        let b = keys.verify(&keys.issue(1, "a").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }
}
