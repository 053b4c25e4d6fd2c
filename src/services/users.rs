use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    db::is_unique_violation,
    error::{AppError, AppResult},
    models::{AuthResponse, LoginRequest, PublicUser, RegisterRequest, User},
    services::credentials::{self, TokenKeys},
};

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Trims and lowercases an email so lookups are case-insensitive
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required(field: Option<String>, name: &str) -> AppResult<String> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InvalidInput(format!("{} is required", name))),
    }
}

/// Runs Argon2 off the async workers
async fn hash_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || credentials::hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

async fn verify_blocking(password: String, hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || credentials::verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn find_by_email(pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Creates an account and signs the first token for it
pub async fn register(
    pool: &SqlitePool,
    keys: &TokenKeys,
    request: RegisterRequest,
) -> AppResult<AuthResponse> {
    let name = required(request.name, "name")?;
    let email = required(request.email, "email")?;
    let password = required(request.password, "password")?;

    let email = normalize_email(&email);
    if !email.contains('@') {
        return Err(AppError::InvalidInput("A valid email is required".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if find_by_email(pool, &email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_blocking(password).await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, email, password_hash, created_at
        "#,
    )
    .bind(name.trim())
    .bind(&email)
    .bind(&password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration
        if is_unique_violation(&e) {
            AppError::Conflict("Email already registered".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(user_id = user.id, "User registered");

    let token = keys.issue(user.id, &user.email)?;
    Ok(AuthResponse {
        token,
        user: PublicUser::from(user),
    })
}

/// Verifies credentials and issues a fresh token
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    pool: &SqlitePool,
    keys: &TokenKeys,
    request: LoginRequest,
) -> AppResult<AuthResponse> {
    let email = required(request.email, "email")?;
    let password = required(request.password, "password")?;

    let Some(user) = find_by_email(pool, &normalize_email(&email)).await? else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_blocking(password, user.password_hash.clone()).await? {
        tracing::info!(user_id = user.id, "Login rejected");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = keys.issue(user.id, &user.email)?;
    Ok(AuthResponse {
        token,
        user: PublicUser::from(user),
    })
}

pub async fn get_user(pool: &SqlitePool, user_id: i64) -> AppResult<PublicUser> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .map(PublicUser::from)
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
