use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;

use crate::{
    dto::auth::{Claims, GoogleClaims, GoogleLoginRequest, LoginRequest, SignupRequest},
    entity::users::DEFAULT_CAMPUS,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    state::AppState,
    store::{NewUser, StoreError, UNUSABLE_PASSWORD},
};

pub const SESSION_TTL_HOURS: i64 = 24;

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn password_matches(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<User> {
    let SignupRequest {
        username,
        email,
        password,
        name,
        campus,
        avatar,
    } = payload;

    let password = hash_password(&password)?;
    let user = state
        .store
        .insert_user(NewUser {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password,
            name: name.trim().to_string(),
            campus: campus.unwrap_or_else(|| DEFAULT_CAMPUS.to_string()),
            avatar,
        })
        .await
        .map_err(|err| match err {
            StoreError::UsernameTaken => AppError::invalid("username", err.to_string()),
            StoreError::EmailTaken => AppError::invalid("email", err.to_string()),
            StoreError::UnknownProduct => AppError::Internal(anyhow::anyhow!(err)),
        })?;

    tracing::info!(user_id = user.id, "user signed up");
    Ok(user)
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<User> {
    let LoginRequest { email, password } = payload;
    let invalid = || AppError::Unauthorized("Invalid email or password".into());

    let user = state
        .store
        .find_user_by_email(email.trim())
        .await
        .ok_or_else(invalid)?;

    if !password_matches(&password, &user.password) {
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, "user logged in");
    Ok(user)
}

/// Reads the id token's claims without checking its signature; the mock
/// backend has no Google keys to check against.
fn google_claims(id_token: &str) -> AppResult<GoogleClaims> {
    jsonwebtoken::dangerous::insecure_decode::<GoogleClaims>(id_token)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("Invalid Google token".into()))
}

pub async fn google(state: &AppState, payload: GoogleLoginRequest) -> AppResult<User> {
    let claims = google_claims(&payload.id_token)?;
    if let Some(user) = state.store.find_user_by_email(&claims.email).await {
        tracing::info!(user_id = user.id, "user signed in with Google");
        return Ok(user);
    }

    let username = claims
        .email
        .split('@')
        .next()
        .filter(|local| !local.is_empty())
        .unwrap_or(&claims.email)
        .to_string();
    let name = claims.name.clone().unwrap_or_else(|| username.clone());

    let user = state
        .store
        .insert_user_with_free_username(NewUser {
            username,
            email: claims.email,
            password: UNUSABLE_PASSWORD.to_string(),
            name,
            campus: DEFAULT_CAMPUS.to_string(),
            avatar: claims.picture,
        })
        .await
        .map_err(|err| AppError::Unauthorized(err.to_string()))?;

    tracing::info!(user_id = user.id, "user created from Google sign-in");
    Ok(user)
}

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<User> {
    state
        .store
        .find_user(user.user_id)
        .await
        .ok_or_else(AppError::unauthorized)
}

/// Signs a session token for `user`.
pub fn issue_session(secret: &str, user: &User) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(SESSION_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.to_string(),
        role: user.role.clone(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_session;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    #[test]
    fn hashed_password_verifies() {
        let hash = hash_password("hunter22").expect("hash");
        assert!(password_matches("hunter22", &hash));
        assert!(!password_matches("hunter23", &hash));
    }

    #[test]
    fn unusable_password_never_matches() {
        assert!(!password_matches("!", UNUSABLE_PASSWORD));
        assert!(!password_matches("", UNUSABLE_PASSWORD));
    }

    #[test]
    fn issued_session_decodes_to_same_user() {
        let user = User {
            id: 12,
            username: "kim".into(),
            email: "kim@campus.edu".into(),
            password: String::new(),
            name: "Kim".into(),
            campus: DEFAULT_CAMPUS.into(),
            avatar: None,
            role: "student".into(),
        };
        let token = issue_session("test-secret", &user).expect("token");
        let session = decode_session(&token, "test-secret").expect("valid");
        assert_eq!(session.user_id, 12);
        assert!(decode_session(&token, "other-secret").is_err());
    }

    #[test]
    fn google_claims_need_an_email() {
        let with_email = encode(
            &Header::default(),
            &serde_json::json!({ "email": "ana@campus.edu", "name": "Ana" }),
            &EncodingKey::from_secret(b"unrelated"),
        )
        .expect("token");
        let claims = google_claims(&with_email).expect("claims");
        assert_eq!(claims.email, "ana@campus.edu");

        let without_email = encode(
            &Header::default(),
            &serde_json::json!({ "name": "Ana" }),
            &EncodingKey::from_secret(b"unrelated"),
        )
        .expect("token");
        assert!(google_claims(&without_email).is_err());
        assert!(google_claims("garbage").is_err());
    }

    #[test]
    fn google_claims_ignore_rs256_signature() {
        let segment = |value: serde_json::Value| URL_SAFE_NO_PAD.encode(value.to_string());
        let id_token = format!(
            "{}.{}.{}",
            segment(serde_json::json!({ "alg": "RS256", "kid": "abc", "typ": "JWT" })),
            segment(serde_json::json!({ "email": "dana@gmail.com", "name": "Dana" })),
            URL_SAFE_NO_PAD.encode([7u8; 256]),
        );

        let claims = google_claims(&id_token).expect("claims");
        assert_eq!(claims.email, "dana@gmail.com");
        assert_eq!(claims.name.as_deref(), Some("Dana"));
    }
}
