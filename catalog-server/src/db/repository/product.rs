//! Product Repository
//!
//! Catalog reads return [`ProductDetail`] records: the base row enriched
//! with the ordered image list and category tag set. Enrichment uses two
//! batched queries keyed by the result's id set, not a per-product loop.

use std::collections::{HashMap, HashSet};

use super::{RepoError, RepoResult, placeholders};
use crate::db::models::{
    Product, ProductCreate, ProductDetail, ProductImage, ProductSummary, ProductUpdate,
    effective_name,
};
use crate::utils::{now_millis, snowflake_id};
use sqlx::SqlitePool;

/// Find products, optionally filtered by category tag and/or free-text
/// search (case-insensitive substring over name/brand/series/model/type),
/// newest first.
pub async fn find_all(
    pool: &SqlitePool,
    category: Option<&str>,
    search: Option<&str>,
) -> RepoResult<Vec<Product>> {
    let mut sql = String::from("SELECT DISTINCT p.* FROM product p");

    if category.is_some() {
        sql.push_str(" JOIN product_category pc ON pc.product_id = p.id WHERE pc.category = ?1");
    }
    if search.is_some() {
        let n = if category.is_some() { 2 } else { 1 };
        let keyword = if category.is_some() { " AND" } else { " WHERE" };
        sql.push_str(keyword);
        sql.push_str(&format!(
            " (LOWER(p.name) LIKE ?{n} OR LOWER(p.brand) LIKE ?{n} OR LOWER(p.series) LIKE ?{n} OR LOWER(p.model) LIKE ?{n} OR LOWER(p.product_type) LIKE ?{n})"
        ));
    }
    sql.push_str(" ORDER BY p.created_at DESC");

    let mut query = sqlx::query_as::<_, Product>(&sql);
    if let Some(cat) = category {
        query = query.bind(cat.to_string());
    }
    if let Some(term) = search {
        query = query.bind(format!("%{}%", term.to_lowercase()));
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>("SELECT * FROM product WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<ProductDetail>> {
    let Some(product) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let mut details = attach_details(pool, vec![product]).await?;
    Ok(details.pop())
}

/// Enrich base rows with their image lists and category sets.
/// Two queries keyed by the id set, regardless of result size.
pub async fn attach_details(
    pool: &SqlitePool,
    products: Vec<Product>,
) -> RepoResult<Vec<ProductDetail>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    let marks = placeholders(ids.len());

    let sql = format!(
        "SELECT * FROM product_image WHERE product_id IN ({marks}) ORDER BY display_order"
    );
    let mut query = sqlx::query_as::<_, ProductImage>(&sql);
    for id in &ids {
        query = query.bind(id);
    }
    let mut image_map: HashMap<i64, Vec<ProductImage>> = HashMap::new();
    for image in query.fetch_all(pool).await? {
        image_map.entry(image.product_id).or_default().push(image);
    }

    let sql = format!(
        "SELECT product_id, category FROM product_category WHERE product_id IN ({marks}) ORDER BY category"
    );
    let mut query = sqlx::query_as::<_, (i64, String)>(&sql);
    for id in &ids {
        query = query.bind(id);
    }
    let mut category_map: HashMap<i64, Vec<String>> = HashMap::new();
    for (product_id, category) in query.fetch_all(pool).await? {
        category_map.entry(product_id).or_default().push(category);
    }

    Ok(products
        .into_iter()
        .map(|p| ProductDetail {
            additional_images: image_map.remove(&p.id).unwrap_or_default(),
            categories: category_map.remove(&p.id).unwrap_or_default(),
            product: p,
        })
        .collect())
}

/// Resolve product summaries for an id set. Missing ids are omitted —
/// sent-list snapshots are allowed to reference deleted products.
pub async fn find_summaries(
    pool: &SqlitePool,
    ids: &[i64],
) -> RepoResult<HashMap<i64, ProductSummary>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let sql = format!(
        "SELECT id, name, brand, series, model FROM product WHERE id IN ({})",
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, ProductSummary>(&sql);
    for id in ids {
        query = query.bind(id);
    }
    let rows = query.fetch_all(pool).await?;
    Ok(rows.into_iter().map(|p| (p.id, p)).collect())
}

/// Category tags in use across the catalog
pub async fn distinct_categories(pool: &SqlitePool) -> RepoResult<Vec<String>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT category FROM product_category ORDER BY category")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(c,)| c).collect())
}

/// Create a product with its image rows and category tags in one
/// all-or-nothing transaction.
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<ProductDetail> {
    if data.brand.trim().is_empty() {
        return Err(RepoError::Validation("Brand is required".into()));
    }

    let id = snowflake_id();
    let now = now_millis();
    let name = effective_name(&data.series, &data.name);

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO product (id, name, brand, series, model, serial_number, description, image, dealer_price, end_user_price, warranty, product_type, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(id)
    .bind(&name)
    .bind(&data.brand)
    .bind(&data.series)
    .bind(&data.model)
    .bind(&data.serial_number)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.dealer_price)
    .bind(data.end_user_price)
    .bind(&data.warranty)
    .bind(&data.product_type)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate("Serial number already exists".to_string())
        }
        other => other,
    })?;

    // Additional images start at display_order 1; slot 0 is the primary
    // image stored on the product row itself.
    for (index, path) in data.additional_images.iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_image (id, product_id, image_path, display_order, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(snowflake_id())
        .bind(id)
        .bind(path)
        .bind((index + 1) as i64)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    for category in dedup_categories(&data.categories) {
        sqlx::query(
            "INSERT INTO product_category (id, product_id, category, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(snowflake_id())
        .bind(id)
        .bind(category)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_detail(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Update a product. The primary image is only touched when
/// `keep_existing_images` is false and new uploads replace the image set;
/// category tags are fully replaced on every update.
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<ProductDetail> {
    if data.brand.trim().is_empty() {
        return Err(RepoError::Validation("Brand is required".into()));
    }

    let now = now_millis();
    let name = effective_name(&data.series, &data.name);

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE product SET name = ?1, brand = ?2, series = ?3, model = ?4, serial_number = ?5, description = ?6, dealer_price = ?7, end_user_price = ?8, warranty = ?9, product_type = ?10 WHERE id = ?11",
    )
    .bind(&name)
    .bind(&data.brand)
    .bind(&data.series)
    .bind(&data.model)
    .bind(&data.serial_number)
    .bind(&data.description)
    .bind(data.dealer_price)
    .bind(data.end_user_price)
    .bind(&data.warranty)
    .bind(&data.product_type)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate("Serial number already exists".to_string())
        }
        other => other,
    })?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    if data.keep_existing_images {
        // Append new uploads after the current maximum display order
        let max_order: Option<i64> = sqlx::query_scalar(
            "SELECT MAX(display_order) FROM product_image WHERE product_id = ?1",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        let start = max_order.unwrap_or(0) + 1;

        for (index, path) in data.new_images.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_image (id, product_id, image_path, display_order, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(snowflake_id())
            .bind(id)
            .bind(path)
            .bind(start + index as i64)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
    } else if !data.new_images.is_empty() {
        // Replace the whole image set: first upload becomes the primary,
        // the rest become the new additional set from order 1.
        sqlx::query("UPDATE product SET image = ?1 WHERE id = ?2")
            .bind(&data.new_images[0])
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM product_image WHERE product_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for (index, path) in data.new_images.iter().skip(1).enumerate() {
            sqlx::query(
                "INSERT INTO product_image (id, product_id, image_path, display_order, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(snowflake_id())
            .bind(id)
            .bind(path)
            .bind((index + 1) as i64)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
    }

    // Category tags are replaced, not merged
    sqlx::query("DELETE FROM product_category WHERE product_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    for category in dedup_categories(&data.categories) {
        sqlx::query(
            "INSERT INTO product_category (id, product_id, category, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(snowflake_id())
        .bind(id)
        .bind(category)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_detail(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Hard delete a product, cascading its wish-list entries, image rows and
/// category rows. Sent-list snapshots keep their now-stale ids.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM wish_list WHERE product_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM product_image WHERE product_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM product_category WHERE product_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM product WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    tx.commit().await?;
    Ok(())
}

/// Delete a single additional image, scoped to its product
pub async fn delete_image(pool: &SqlitePool, product_id: i64, image_id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM product_image WHERE id = ?1 AND product_id = ?2")
        .bind(image_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Image {image_id} not found")));
    }
    Ok(())
}

/// Repoint the denormalized primary image reference
pub async fn set_main_image(
    pool: &SqlitePool,
    product_id: i64,
    image_path: &str,
) -> RepoResult<()> {
    let result = sqlx::query("UPDATE product SET image = ?1 WHERE id = ?2")
        .bind(image_path)
        .bind(product_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Product {product_id} not found"
        )));
    }
    Ok(())
}

/// Drop blank and repeated tags, preserving first-seen order
fn dedup_categories(categories: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    categories
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.to_string()))
        .map(|c| c.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_categories() {
        let input = vec![
            "hot".to_string(),
            " new ".to_string(),
            "hot".to_string(),
            "".to_string(),
            "  ".to_string(),
        ];
        assert_eq!(dedup_categories(&input), vec!["hot", "new"]);
    }
}
