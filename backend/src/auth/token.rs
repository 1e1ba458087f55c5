use std::time::Duration;

use chrono::Utc;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub iat: i64,    // s
    pub exp: i64,    // s
}

/// Signs and verifies the bearer tokens handed out on login.
pub struct TokenIssuer {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, subject: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        self.encode(&Claims {
            sub: subject.to_owned(),
            iat: now,
            exp: now.saturating_add(ttl),
        })
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &jsonwebtoken::Validation::default())
            .map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(secret.as_bytes(), DEFAULT_TOKEN_TTL)
    }

    #[test]
    fn issued_token_carries_subject() {
        let tokens = issuer("test-secret");
        let token = tokens.issue("admin").unwrap();
        assert!(!token.is_empty());

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let token = issuer("one").issue("admin").unwrap();
        assert!(issuer("two").verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = issuer("test-secret");
        let now = Utc::now().timestamp();
        let token = tokens
            .encode(&Claims {
                sub: "admin".into(),
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn huge_ttl_saturates() {
        let tokens = TokenIssuer::new(b"test-secret", Duration::MAX);
        let claims = tokens.verify(&tokens.issue("admin").unwrap()).unwrap();
        assert_eq!(claims.exp, i64::MAX);
    }
}
