//! Unregistered Customer Repository

use super::{RepoError, RepoResult};
use crate::db::models::{UnregisteredCustomer, UnregisteredCustomerCreate};
use crate::utils::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str =
    "SELECT id, name, email, phone, company_name, role, message, message_type, created_at FROM unregistered_customer";

pub async fn create(
    pool: &SqlitePool,
    data: UnregisteredCustomerCreate,
) -> RepoResult<UnregisteredCustomer> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO unregistered_customer (id, name, email, phone, company_name, role, message, message_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.phone)
    .bind(&data.company_name)
    .bind(data.role)
    .bind(&data.message)
    .bind(data.message_type)
    .bind(now_millis())
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create lead".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UnregisteredCustomer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?1");
    let row = sqlx::query_as::<_, UnregisteredCustomer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<UnregisteredCustomer>> {
    let sql = format!("{CUSTOMER_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, UnregisteredCustomer>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM unregistered_customer WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Unregistered customer {id} not found"
        )));
    }
    Ok(())
}
