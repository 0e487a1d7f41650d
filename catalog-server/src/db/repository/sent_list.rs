//! Sent List Repository
//!
//! Snapshots are append-only: a row is written once per send action and
//! never mutated, even when the underlying wish list or products change.

use super::{RepoError, RepoResult};
use crate::db::models::{SentList, SentListDetail, SentListWithUser};
use crate::db::repository::product;
use crate::utils::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Persist an immutable snapshot of the given product-id set
pub async fn create(pool: &SqlitePool, user_id: i64, product_ids: &[i64]) -> RepoResult<SentList> {
    if product_ids.is_empty() {
        return Err(RepoError::Validation("List is empty".to_string()));
    }

    let id = snowflake_id();
    let csv = product_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    sqlx::query("INSERT INTO sent_list (id, user_id, product_ids, sent_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(user_id)
        .bind(&csv)
        .bind(now_millis())
        .execute(pool)
        .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create sent list".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SentList>> {
    let row = sqlx::query_as::<_, SentList>("SELECT * FROM sent_list WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All snapshots joined with their owning user, newest first
pub async fn find_all_with_users(pool: &SqlitePool) -> RepoResult<Vec<SentListWithUser>> {
    let rows = sqlx::query_as::<_, SentListWithUser>(
        "SELECT sl.id, sl.user_id, u.username, u.email, sl.product_ids, sl.sent_at
         FROM sent_list sl JOIN user u ON u.id = sl.user_id
         ORDER BY sl.sent_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Resolve snapshots against the product table at read time. Ids whose
/// product has since been deleted are omitted from the result, not errors.
pub async fn resolve_products(
    pool: &SqlitePool,
    lists: Vec<SentListWithUser>,
) -> RepoResult<Vec<SentListDetail>> {
    let mut all_ids: Vec<i64> = Vec::new();
    for list in &lists {
        for id in list.product_ids.split(',') {
            if let Ok(id) = id.trim().parse::<i64>() {
                all_ids.push(id);
            }
        }
    }
    all_ids.sort_unstable();
    all_ids.dedup();

    let summaries = product::find_summaries(pool, &all_ids).await?;

    Ok(lists
        .into_iter()
        .map(|list| {
            let products = list
                .product_ids
                .split(',')
                .filter_map(|s| s.trim().parse::<i64>().ok())
                .filter_map(|id| summaries.get(&id).cloned())
                .collect();
            SentListDetail {
                id: list.id,
                user_id: list.user_id,
                username: list.username,
                email: list.email,
                sent_at: list.sent_at,
                products,
            }
        })
        .collect())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM sent_list WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Sent list {id} not found")));
    }
    Ok(())
}
