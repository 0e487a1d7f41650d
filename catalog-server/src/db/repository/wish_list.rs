//! Wish List Repository

use super::{RepoError, RepoResult};
use crate::db::models::Product;
use crate::utils::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Add a product to the caller's wish list.
///
/// The pre-check only exists for the friendlier error message — under
/// concurrent duplicate adds the UNIQUE(user_id, product_id) constraint is
/// the source of truth, and the loser of the race gets the same Duplicate
/// error from the insert itself.
pub async fn add(pool: &SqlitePool, user_id: i64, product_id: i64) -> RepoResult<()> {
    let product_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM product WHERE id = ?1")
        .bind(product_id)
        .fetch_optional(pool)
        .await?;
    if product_exists.is_none() {
        return Err(RepoError::NotFound(format!(
            "Product {product_id} not found"
        )));
    }

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM wish_list WHERE user_id = ?1 AND product_id = ?2")
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(RepoError::Duplicate(
            "Product is already in your list".to_string(),
        ));
    }

    sqlx::query("INSERT INTO wish_list (id, user_id, product_id, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(snowflake_id())
        .bind(user_id)
        .bind(product_id)
        .bind(now_millis())
        .execute(pool)
        .await
        .map_err(|e| match RepoError::from(e) {
            RepoError::Duplicate(_) => {
                RepoError::Duplicate("Product is already in your list".to_string())
            }
            other => other,
        })?;
    Ok(())
}

/// Remove a product from the caller's wish list
pub async fn remove(pool: &SqlitePool, user_id: i64, product_id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM wish_list WHERE user_id = ?1 AND product_id = ?2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound("Product not found in list".to_string()));
    }
    Ok(())
}

/// The caller's saved products, most recently added first
pub async fn list_products(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        "SELECT p.* FROM product p JOIN wish_list wl ON wl.product_id = p.id WHERE wl.user_id = ?1 ORDER BY wl.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Entry count for a user
pub async fn count(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wish_list WHERE user_id = ?1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
