//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Insert with an optional image payload
//! - Summary listing (image excluded)
//! - Case-insensitive text search
//! - Image fetch on demand
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Product Search Works                             │
//! │                                                                         │
//! │  User types: "WID"                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT id, name, category, price, quantity FROM products ORDER BY id  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductSummary::matches("wid")  (staffstock-core)                     │
//! │                                                                         │
//! │  │ 1 | Widget | Tools  | 9.99  | 5  │ ← MATCH (name)                    │
//! │  │ 2 | Hammer | Tools  | 12.5  | 3  │                                   │
//! │  │ 3 | Wire   | Wid-co | 100.0 | 1  │ ← MATCH (category)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Results: [1, 3]  (store order preserved)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching runs in Rust rather than SQL `LIKE` so that prices are matched
//! against exactly the text they are displayed as.

use staffstock_core::search::filter_products;
use staffstock_core::validation::validate_product;
use staffstock_core::{NewProduct, ProductSummary, RecordId};
use tracing::debug;

use crate::database::Database;
use crate::error::{DbError, DbResult};

/// Repository for product records.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let id = repo.insert(&NewProduct::new("Widget", "Tools", "9.99", "5")).await?;
/// let hits = repo.search("wid").await?;
/// let image = repo.get_image(id).await?; // Ok(None): no image attached
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(db: Database) -> Self {
        ProductRepository { db }
    }

    /// Inserts a new product.
    ///
    /// The category is stored as given; it is not checked against the
    /// category table.
    ///
    /// ## Returns
    /// * `Ok(id)` - Identity assigned by the store
    /// * `Err(DbError::Validation)` - blank text, or price / quantity not a
    ///   non-negative number
    pub async fn insert(&self, input: &NewProduct) -> DbResult<RecordId> {
        let product = validate_product(input)?;

        debug!(
            name = %product.name,
            category = %product.category,
            price = product.price,
            quantity = product.quantity,
            image_bytes = product.image.as_ref().map_or(0, Vec::len),
            "Inserting product"
        );

        let mut conn = self.db.connect().await?;
        let id = sqlx::query(
            r#"
            INSERT INTO products (name, category, price, quantity, image)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.image.as_deref())
        .execute(&mut conn)
        .await?
        .last_insert_rowid();
        self.db.release_after_write(conn).await;

        debug!(id, "Product inserted");
        Ok(id)
    }

    /// Lists all products without their image payload, in insertion order.
    pub async fn list_summary(&self) -> DbResult<Vec<ProductSummary>> {
        let mut conn = self.db.connect().await?;
        let products = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name, category, price, quantity FROM products ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await?;
        self.db.release(conn).await?;

        Ok(products)
    }

    /// Searches products.
    ///
    /// Case-insensitive substring match against name, category, price text
    /// and quantity text. The query is trimmed first; an empty query returns
    /// every product. Order is the same as [`list_summary`](Self::list_summary).
    pub async fn search(&self, query: &str) -> DbResult<Vec<ProductSummary>> {
        debug!(query = %query, "Searching products");

        let products = filter_products(self.list_summary().await?, query);

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product summary by id.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductSummary))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: RecordId) -> DbResult<Option<ProductSummary>> {
        let mut conn = self.db.connect().await?;
        let product = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name, category, price, quantity FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;
        self.db.release(conn).await?;

        Ok(product)
    }

    /// Fetches the stored image bytes of a product.
    ///
    /// ## Returns
    /// * `Ok(Some(bytes))` - Exactly the bytes that were attached
    /// * `Ok(None)` - Product exists but has no image
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn get_image(&self, id: RecordId) -> DbResult<Option<Vec<u8>>> {
        let mut conn = self.db.connect().await?;
        let row: Option<Option<Vec<u8>>> =
            sqlx::query_scalar("SELECT image FROM products WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut conn)
                .await?;
        self.db.release(conn).await?;

        let image = row.ok_or_else(|| DbError::not_found("Product", id))?;

        debug!(id, image_bytes = image.as_ref().map_or(0, Vec::len), "Fetched product image");
        Ok(image.filter(|bytes| !bytes.is_empty()))
    }

    /// Deletes a product and its image. Unknown ids are ignored.
    pub async fn delete_by_id(&self, id: RecordId) -> DbResult<()> {
        let mut conn = self.db.connect().await?;
        let removed = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?
            .rows_affected();
        self.db.release_after_write(conn).await;

        debug!(id, removed, "Deleted product");
        Ok(())
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.db.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut conn)
            .await?;
        self.db.release(conn).await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::database::testing::temp_database;
    use crate::DbError;
    use staffstock_core::NewProduct;

    fn widget() -> NewProduct {
        NewProduct::new("Widget", "Tools", 9.99, 5)
    }

    #[tokio::test]
    async fn test_insert_and_list_summary() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        let id = repo.insert(&widget()).await.unwrap();

        let products = repo.list_summary().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, id);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].category, "Tools");
        assert_eq!(products[0].price, 9.99);
        assert_eq!(products[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_category_is_not_checked() {
        let (_dir, db) = temp_database().await;

        let id = db
            .products()
            .insert(&NewProduct::new("Orphan", "No Such Category", "1", "1"))
            .await
            .unwrap();

        let product = db.products().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.category, "No Such Category");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        let id = repo.insert(&widget()).await.unwrap();
        repo.insert(&NewProduct::new("Hammer", "Hardware", "12.5", "3"))
            .await
            .unwrap();

        let hits = repo.search("WID").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);
    }

    #[tokio::test]
    async fn test_empty_search_equals_summary() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        repo.insert(&widget()).await.unwrap();
        repo.insert(&NewProduct::new("Hammer", "Hardware", "12.5", "3"))
            .await
            .unwrap();

        assert_eq!(repo.search("").await.unwrap(), repo.list_summary().await.unwrap());
    }

    #[tokio::test]
    async fn test_search_matches_price_text() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        let cable = repo
            .insert(&NewProduct::new("Cable", "Electronics", "100", "1"))
            .await
            .unwrap();
        repo.insert(&NewProduct::new("Plug", "Electronics", "2.5", "7"))
            .await
            .unwrap();

        let hits = repo.search("10").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, cable);
    }

    #[tokio::test]
    async fn test_image_round_trip() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        let bytes: Vec<u8> = (0..=255).cycle().take(70_000).collect();
        let with_image = repo.insert(&widget().with_image(bytes.clone())).await.unwrap();
        let without_image = repo.insert(&widget()).await.unwrap();

        assert_eq!(repo.get_image(with_image).await.unwrap(), Some(bytes));
        assert_eq!(repo.get_image(without_image).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_image_of_unknown_product_is_not_found() {
        let (_dir, db) = temp_database().await;

        let err = db.products().get_image(12345).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_numeric_boundaries() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        let err = repo
            .insert(&NewProduct::new("Bad", "Tools", "-1", "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = repo
            .insert(&NewProduct::new("Bad", "Tools", "1", "-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(repo.count().await.unwrap(), 0);

        let id = repo
            .insert(&NewProduct::new("Free", "Tools", "0", "0"))
            .await
            .unwrap();
        let product = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.price, 0.0);
        assert_eq!(product.quantity, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (_dir, db) = temp_database().await;
        let repo = db.products();

        let id = repo.insert(&widget()).await.unwrap();
        repo.delete_by_id(id + 1).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete_by_id(id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(matches!(
            repo.get_image(id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
