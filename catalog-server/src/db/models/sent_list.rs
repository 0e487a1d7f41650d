//! Sent List Model

use serde::{Deserialize, Serialize};

use super::ProductSummary;

/// Immutable snapshot of a wish list at send time.
/// `product_ids` is a CSV of product ids; entries are allowed to go stale
/// when products are later deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SentList {
    pub id: i64,
    pub user_id: i64,
    pub product_ids: String,
    pub sent_at: i64,
}

impl SentList {
    /// Parse the CSV snapshot into product ids, skipping malformed entries
    pub fn product_id_set(&self) -> Vec<i64> {
        self.product_ids
            .split(',')
            .filter_map(|s| s.trim().parse::<i64>().ok())
            .collect()
    }
}

/// Sent list joined with the owning user, as stored
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SentListWithUser {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub product_ids: String,
    pub sent_at: i64,
}

/// Admin view: snapshot resolved against the product table at read time.
/// Ids pointing at deleted products are omitted, not errors.
#[derive(Debug, Clone, Serialize)]
pub struct SentListDetail {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub sent_at: i64,
    pub products: Vec<ProductSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_set_parses_csv() {
        let list = SentList {
            id: 1,
            user_id: 2,
            product_ids: "10,20,30".into(),
            sent_at: 0,
        };
        assert_eq!(list.product_id_set(), vec![10, 20, 30]);
    }

    #[test]
    fn test_product_id_set_skips_garbage() {
        let list = SentList {
            id: 1,
            user_id: 2,
            product_ids: "10,,abc, 20".into(),
            sent_at: 0,
        };
        assert_eq!(list.product_id_set(), vec![10, 20]);
    }
}
