//! User Repository

use super::{RepoError, RepoResult};
use crate::db::models::{User, UserCreate, UserPublic, UserRole};
use crate::utils::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, username, email, password_hash, role, created_at FROM user";

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    let id = snowflake_id();
    let now = now_millis();
    sqlx::query(
        "INSERT INTO user (id, username, email, password_hash, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(&data.username)
    .bind(&data.email)
    .bind(&data.password_hash)
    .bind(data.role)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate("Username or email already exists".to_string())
        }
        other => other,
    })?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE email = ?1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Login lookup: the identifier may be a username or an email
pub async fn find_by_username_or_email(
    pool: &SqlitePool,
    identifier: &str,
) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ?1 OR email = ?1");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(identifier)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All customer accounts (dealer/enduser), newest first
pub async fn find_customers(pool: &SqlitePool) -> RepoResult<Vec<UserPublic>> {
    let rows = sqlx::query_as::<_, UserPublic>(
        "SELECT id, username, email, role, created_at FROM user WHERE role IN (?1, ?2) ORDER BY created_at DESC",
    )
    .bind(UserRole::Dealer)
    .bind(UserRole::EndUser)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Delete a customer account together with their wish-list and sent-list rows
pub async fn delete_customer(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM wish_list WHERE user_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM sent_list WHERE user_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM user WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Registered customer {id} not found"
        )));
    }

    tx.commit().await?;
    Ok(())
}

/// Idempotent bootstrap: create the reserved admin account if missing.
/// Runs once at startup, after migrations and before the server accepts traffic.
pub async fn ensure_seed_admin(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> RepoResult<bool> {
    const ADMIN_USERNAME: &str = "admin";

    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM user WHERE username = ?1")
        .bind(ADMIN_USERNAME)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let password_hash = User::hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash admin password: {e}")))?;
    create(
        pool,
        UserCreate {
            username: ADMIN_USERNAME.to_string(),
            email: email.to_string(),
            password_hash,
            role: UserRole::Admin,
        },
    )
    .await?;

    tracing::info!(username = ADMIN_USERNAME, "Seed admin account created");
    Ok(true)
}
