//! # Category Repository
//!
//! Add, list and delete product categories.
//!
//! ## Name Uniqueness
//! ```text
//! insert("Tools")
//!      │
//!      ▼
//! INSERT INTO categories ── UNIQUE(name) ok ──► Ok(id)
//!      │
//!      └── UNIQUE constraint failed ──► DbError::DuplicateName { "Category", "Tools" }
//! ```
//! The constraint itself is the check, so two racing inserts cannot both
//! succeed. Names compare exactly: "Tools" and "tools" are different.
//!
//! ## Deleting
//! Products refer to categories by name with no foreign key. Deleting a
//! category neither cascades to nor is blocked by those products.

use staffstock_core::validation::validate_category;
use staffstock_core::{Category, NewCategory, RecordId};
use tracing::debug;

use crate::database::Database;
use crate::error::{DbError, DbResult};

/// Repository for category records.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: Database,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(db: Database) -> Self {
        CategoryRepository { db }
    }

    /// Inserts a new category.
    ///
    /// ## Returns
    /// * `Ok(id)` - Identity assigned by the store
    /// * `Err(DbError::Validation)` - name blank
    /// * `Err(DbError::DuplicateName)` - name already taken
    pub async fn insert(&self, input: &NewCategory) -> DbResult<RecordId> {
        let category = validate_category(input)?;

        debug!(name = %category.name, "Inserting category");

        let mut conn = self.db.connect().await?;
        let id = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(&category.name)
            .execute(&mut conn)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::DuplicateName { .. } => DbError::duplicate_name("Category", &category.name),
                other => other,
            })?
            .last_insert_rowid();
        self.db.release_after_write(conn).await;

        debug!(id, "Category inserted");
        Ok(id)
    }

    /// Lists all categories in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let mut conn = self.db.connect().await?;
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
                .fetch_all(&mut conn)
                .await?;
        self.db.release(conn).await?;

        Ok(categories)
    }

    /// Lists category names only, in insertion order.
    ///
    /// Feeds the category picker of the product form.
    pub async fn names(&self) -> DbResult<Vec<String>> {
        let mut conn = self.db.connect().await?;
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM categories ORDER BY id")
            .fetch_all(&mut conn)
            .await?;
        self.db.release(conn).await?;

        Ok(names)
    }

    /// Deletes a category. Unknown ids are ignored.
    pub async fn delete_by_id(&self, id: RecordId) -> DbResult<()> {
        let mut conn = self.db.connect().await?;
        let removed = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&mut conn)
            .await?
            .rows_affected();
        self.db.release_after_write(conn).await;

        debug!(id, removed, "Deleted category");
        Ok(())
    }

    /// Counts categories.
    pub async fn count(&self) -> DbResult<i64> {
        let mut conn = self.db.connect().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
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
    use staffstock_core::{NewCategory, NewProduct};

    #[tokio::test]
    async fn test_duplicate_name_fails_and_count_is_unchanged() {
        let (_dir, db) = temp_database().await;
        let repo = db.categories();

        repo.insert(&NewCategory::new("Tools")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let err = repo.insert(&NewCategory::new("Tools")).await.unwrap_err();
        match err {
            DbError::DuplicateName { entity, name } => {
                assert_eq!(entity, "Category");
                assert_eq!(name, "Tools");
            }
            other => panic!("expected duplicate name, got {other:?}"),
        }

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_after_trimming() {
        let (_dir, db) = temp_database().await;
        let repo = db.categories();

        repo.insert(&NewCategory::new("Tools")).await.unwrap();
        let err = repo.insert(&NewCategory::new("  Tools ")).await.unwrap_err();

        assert!(matches!(err, DbError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn test_blank_name_is_validation_not_duplicate() {
        let (_dir, db) = temp_database().await;

        let err = db.categories().insert(&NewCategory::new("   ")).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_and_names() {
        let (_dir, db) = temp_database().await;
        let repo = db.categories();

        let tools = repo.insert(&NewCategory::new("Tools")).await.unwrap();
        let food = repo.insert(&NewCategory::new("Food")).await.unwrap();

        let categories = repo.list().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, tools);
        assert_eq!(categories[1].id, food);

        assert_eq!(repo.names().await.unwrap(), vec!["Tools", "Food"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_noop() {
        let (_dir, db) = temp_database().await;
        let repo = db.categories();

        repo.insert(&NewCategory::new("Tools")).await.unwrap();
        repo.delete_by_id(999).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_leaves_products_naming_it() {
        let (_dir, db) = temp_database().await;

        let tools = db.categories().insert(&NewCategory::new("Tools")).await.unwrap();
        db.products()
            .insert(&NewProduct::new("Hammer", "Tools", "12.5", "3"))
            .await
            .unwrap();

        db.categories().delete_by_id(tools).await.unwrap();

        let products = db.products().list_summary().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, "Tools");
        assert!(db.categories().names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_name_freed_after_delete() {
        let (_dir, db) = temp_database().await;
        let repo = db.categories();

        let id = repo.insert(&NewCategory::new("Tools")).await.unwrap();
        repo.delete_by_id(id).await.unwrap();

        assert!(repo.insert(&NewCategory::new("Tools")).await.is_ok());
    }
}
