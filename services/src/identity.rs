use crate::error::{ServiceError, ServiceResult};
use chrono::{DateTime, Duration, Utc};
use db::models::user::{self, Role};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT payload carried by every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub role: Role,
    pub admin: bool,
}

/// Caller identity resolved from a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub role: Role,
    pub admin: bool,
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            admin: claims.admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Turns opaque credentials into identities, and users into credentials.
///
/// Services never see tokens; swapping the credential scheme only means a
/// new implementation of this trait.
pub trait IdentityProvider: Send + Sync {
    fn authenticate(&self, token: &str) -> ServiceResult<Claims>;

    fn issue(&self, user: &user::Model) -> ServiceResult<IssuedToken>;
}

/// HS256 JWTs signed with a shared secret.
pub struct JwtIdentityProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

/// Token lifetime used when the requested one is not representable.
pub const DEFAULT_TOKEN_MINUTES: i64 = 60;

impl JwtIdentityProvider {
    pub fn new(secret: &str, lifetime_minutes: i64) -> Self {
        let lifetime = Duration::try_minutes(lifetime_minutes).unwrap_or_else(|| {
            tracing::warn!(lifetime_minutes, "token lifetime out of range, using default");
            Duration::minutes(DEFAULT_TOKEN_MINUTES)
        });
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    /// Builds a provider from `JWT_SECRET` and `JWT_DURATION_MINUTES`.
    pub fn from_config() -> Self {
        let minutes = i64::try_from(util::config::jwt_duration_minutes())
            .unwrap_or(DEFAULT_TOKEN_MINUTES);
        Self::new(&util::config::jwt_secret(), minutes)
    }
}

impl IdentityProvider for JwtIdentityProvider {
    fn authenticate(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Auth("Invalid or expired token".into()))
    }

    fn issue(&self, user: &user::Model) -> ServiceResult<IssuedToken> {
        let expires_at = Utc::now()
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| ServiceError::Auth("Token lifetime out of range".into()))?;
        let claims = Claims {
            sub: user.id,
            exp: expires_at.timestamp() as usize,
            role: user.role,
            admin: user.admin,
        };

        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ServiceError::Auth(format!("Token encoding failed: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}
