use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Claims issued by the portal's login service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,      // User ID
    pub username: String, // Username
    pub exp: usize,       // Expiration time
}

/// The player a request or socket belongs to. Scores are tracked per user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let app_state = Arc::<AppState>::from_ref(state);
        let token = extract_token(parts);

        async move {
            let token = token.ok_or(StatusCode::UNAUTHORIZED)?;
            verify_token(&token, &app_state.config.security.jwt_secret)
                .ok_or(StatusCode::UNAUTHORIZED)
        }
    }
}

/// Bearer token from the Authorization header, falling back to `?token=`.
/// Browsers cannot set headers on WebSocket upgrades, hence the query form.
fn extract_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(String::from)
        .or_else(|| {
            parts
                .uri
                .query()
                .and_then(|q| serde_urlencoded::from_str::<Vec<(String, String)>>(q).ok())
                .and_then(|params| {
                    params
                        .into_iter()
                        .find(|(k, _)| k == "token")
                        .map(|(_, v)| v)
                })
        })
}

fn verify_token(token: &str, jwt_secret: &str) -> Option<AuthenticatedUser> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .ok()?;

    let user_id = token_data.claims.sub.parse::<i64>().ok()?;

    Some(AuthenticatedUser {
        user_id,
        username: token_data.claims.username,
    })
}

/// Issue a token the way the portal's login service does
#[cfg(test)]
pub fn generate_token(
    user_id: i64,
    username: &str,
    jwt_secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(24))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const SECRET: &str = "test-secret";

    fn parts_for(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_token_from_header() {
        let token = generate_token(5, "alice", SECRET).unwrap();
        let parts = parts_for(
            Request::builder()
                .uri("/ws")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(())
                .unwrap(),
        );
        assert_eq!(extract_token(&parts), Some(token));
    }

    #[test]
    fn test_token_from_query() {
        let parts = parts_for(Request::builder().uri("/ws?foo=1&token=abc").body(()).unwrap());
        assert_eq!(extract_token(&parts), Some("abc".to_string()));
    }

    #[test]
    fn test_missing_token() {
        let parts = parts_for(Request::builder().uri("/ws").body(()).unwrap());
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn test_verify_round_trip() {
        let token = generate_token(5, "alice", SECRET).unwrap();
        let user = verify_token(&token, SECRET).unwrap();
        assert_eq!(user.user_id, 5);
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = generate_token(5, "alice", SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_none());
        assert!(verify_token("not-a-jwt", SECRET).is_none());
    }
}
