//! Category commands.

use staffstock_core::{Category, NewCategory, RecordId};
use tabled::Tabled;

use super::{render_added, render_deleted, render_list, OutputFormat};
use crate::error::AppResult;
use crate::state::DbState;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: RecordId,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Category> for CategoryRow {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

/// Add a category. Fails with `DUPLICATE_NAME` if the name is taken.
pub async fn add(db: &DbState, name: String, format: OutputFormat) -> AppResult<String> {
    let id = db.inner().categories().insert(&NewCategory::new(name)).await?;
    render_added("category", id, format)
}

/// List categories in insertion order
pub async fn list(db: &DbState, format: OutputFormat) -> AppResult<String> {
    let categories = db.inner().categories().list().await?;
    render_list::<_, CategoryRow>(&categories, format, "No categories found.")
}

/// Print category names only, one per line.
///
/// These are the choices offered for a product's category.
pub async fn names(db: &DbState, format: OutputFormat) -> AppResult<String> {
    let names = db.inner().categories().names().await?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&names)?),
        OutputFormat::Table => Ok(names.join("\n")),
    }
}

/// Delete a category by id.
///
/// Products that name the category keep that name.
pub async fn delete(db: &DbState, id: RecordId, format: OutputFormat) -> AppResult<String> {
    db.inner().categories().delete_by_id(id).await?;
    render_deleted("category", id, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::temp_state;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_duplicate_is_reported() {
        let (_dir, db) = temp_state().await;

        add(&db, "Tools".into(), OutputFormat::Table).await.unwrap();
        let err = add(&db, "Tools".into(), OutputFormat::Table).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateName);
        assert!(err.message.contains("Tools"));
    }

    #[tokio::test]
    async fn test_names() {
        let (_dir, db) = temp_state().await;
        add(&db, "Tools".into(), OutputFormat::Table).await.unwrap();
        add(&db, "Food".into(), OutputFormat::Table).await.unwrap();

        assert_eq!(names(&db, OutputFormat::Table).await.unwrap(), "Tools\nFood");

        let json: Vec<String> =
            serde_json::from_str(&names(&db, OutputFormat::Json).await.unwrap()).unwrap();
        assert_eq!(json, vec!["Tools", "Food"]);
    }

    #[tokio::test]
    async fn test_delete_then_list() {
        let (_dir, db) = temp_state().await;
        add(&db, "Tools".into(), OutputFormat::Table).await.unwrap();

        let id = db.inner().categories().list().await.unwrap()[0].id;
        delete(&db, id, OutputFormat::Table).await.unwrap();

        assert_eq!(list(&db, OutputFormat::Table).await.unwrap(), "No categories found.");
    }
}
