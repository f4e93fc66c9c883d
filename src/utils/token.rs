use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::user::Role;
use crate::utils::time::compact_date;

/// Human-readable application reference such as `APP-20261019-K3F9QZ`.
pub fn generate_reference_id(prefix: &str, at: DateTime<Utc>) -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{}-{}-{}", prefix, compact_date(at), suffix)
}

/// Signs an HS256 bearer token for the given identity.
pub fn issue_access_token(
    secret: &str,
    subject: &str,
    role: Role,
    email: Option<&str>,
    ttl: Duration,
) -> Result<String> {
    let exp = (Utc::now() + ttl).timestamp().max(0) as usize;
    let claims = Claims {
        sub: subject.to_string(),
        exp,
        role: Some(role.as_str().to_string()),
        email: email.map(str::to_string),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("failed to sign token: {}", e)))
}
