use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id.
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// The pre-shared HS256 key, in both directions. Every service that mints
/// or checks tokens must be built from the same secret.
#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl Keys {
    pub fn new(secret: &[u8], ttl: Duration) -> Keys {
        Keys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn issue(&self, id: Uuid, username: &str) -> jsonwebtoken::errors::Result<String> {
        self.issue_at(id, username, OffsetDateTime::now_utc())
    }

    pub fn issue_at(
        &self,
        id: Uuid,
        username: &str,
        issued_at: OffsetDateTime,
    ) -> jsonwebtoken::errors::Result<String> {
        let claims = Claims {
            sub: id.to_string(),
            username: username.to_owned(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + self.ttl).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Checks signature and expiry. No database access.
    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(decode::<Claims>(token, &self.decoding, &validation)?.claims)
    }
}
