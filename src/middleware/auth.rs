use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::user::{CurrentUser, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: Arc<str>,
    /// Lets every request through as an admin. Development only.
    pub bypass: bool,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<Arc<str>>, bypass: bool) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            bypass,
        }
    }
}

fn reject(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({ "error": code }))).into_response()
}

fn authenticate(req: &Request, settings: &AuthSettings) -> Result<CurrentUser, Response> {
    if settings.bypass {
        return Ok(CurrentUser {
            id: "dev-bypass".to_string(),
            role: Role::Admin,
            email: None,
        });
    }

    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(reject(StatusCode::UNAUTHORIZED, "missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(reject(StatusCode::UNAUTHORIZED, "bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(reject(StatusCode::UNAUTHORIZED, "unsupported_scheme"));
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| reject(StatusCode::UNAUTHORIZED, "invalid_token"))?;

    // Accounts without an explicit role are applicants.
    let role = match data.claims.role.as_deref() {
        Some(r) if r.eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::Applicant,
    };
    Ok(CurrentUser {
        id: data.claims.sub,
        role,
        email: data.claims.email,
    })
}

async fn require_roles(
    settings: &AuthSettings,
    mut req: Request,
    next: Next,
    allowed: &[Role],
) -> Response {
    let user = match authenticate(&req, settings) {
        Ok(user) => user,
        Err(response) => return response,
    };
    if !allowed.is_empty() && !allowed.contains(&user.role) {
        tracing::warn!(user = %user.id, role = user.role.as_str(), "role not allowed");
        return reject(StatusCode::FORBIDDEN, "forbidden");
    }
    req.extensions_mut().insert(user);
    next.run(req).await
}

/// Any signed-in caller.
pub async fn require_user(State(settings): State<AuthSettings>, req: Request, next: Next) -> Response {
    require_roles(&settings, req, next, &[]).await
}

pub async fn require_admin(State(settings): State<AuthSettings>, req: Request, next: Next) -> Response {
    require_roles(&settings, req, next, &[Role::Admin]).await
}
