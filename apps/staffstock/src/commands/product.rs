//! # Product Commands
//!
//! Add, list, search and delete products, and export a stored image.
//!
//! ## Staged Images
//! ```text
//! product add --image ./photo.png ...
//!       │
//!       ├── readable ──► bytes stored in products.image
//!       │
//!       └── unreadable ──► WARN logged, product added without an image
//! ```
//!
//! ## Image Export
//! `product image ID` writes the stored bytes untouched. Without `--out` the
//! file lands in the images side-channel directory as `product-<id>.img`.

use std::path::{Path, PathBuf};

use serde_json::json;
use staffstock_core::search::format_price;
use staffstock_core::{NewProduct, ProductSummary, RecordId};
use tabled::Tabled;
use tracing::{debug, warn};

use super::{render_added, render_deleted, render_list, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::state::DbState;

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: RecordId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Quantity")]
    quantity: i64,
}

impl From<&ProductSummary> for ProductRow {
    fn from(product: &ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            // Shown exactly as search matches it
            price: format_price(product.price),
            quantity: product.quantity,
        }
    }
}

/// Product form as typed on the command line.
///
/// Price and quantity stay text until validation.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub image: Option<PathBuf>,
}

/// Add a product, attaching the staged image file if it can be read.
pub async fn add(db: &DbState, form: ProductForm, format: OutputFormat) -> AppResult<String> {
    let mut input = NewProduct::new(form.name, form.category, form.price, form.quantity);

    if let Some(path) = &form.image {
        if let Some(bytes) = read_staged_image(path).await {
            input = input.with_image(bytes);
        }
    }

    let id = db.inner().products().insert(&input).await?;
    render_added("product", id, format)
}

/// Reads a staged image file. A failed read is reported and yields no image.
async fn read_staged_image(path: &Path) -> Option<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Read staged image");
            Some(bytes)
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Could not read image, adding product without it"
            );
            None
        }
    }
}

/// List products (image excluded) in insertion order
pub async fn list(db: &DbState, format: OutputFormat) -> AppResult<String> {
    let products = db.inner().products().list_summary().await?;
    render_list::<_, ProductRow>(&products, format, "No products found.")
}

/// Search products by name, category, price or quantity text
pub async fn search(db: &DbState, query: &str, format: OutputFormat) -> AppResult<String> {
    let products = db.inner().products().search(query).await?;
    render_list::<_, ProductRow>(&products, format, "No products found.")
}

/// Write a product's stored image to a file.
///
/// Fails with `NOT_FOUND` for an unknown product; a product without an image
/// only gets a notice.
pub async fn image(
    db: &DbState,
    id: RecordId,
    out: Option<PathBuf>,
    format: OutputFormat,
) -> AppResult<String> {
    let products = db.inner().products();

    let Some(bytes) = products.get_image(id).await? else {
        return match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "id": id,
                "path": null,
            }))?),
            OutputFormat::Table => Ok(format!("Product {} has no image stored.", id)),
        };
    };

    let path = out.unwrap_or_else(|| default_image_path(db.inner().images_dir(), id));
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| AppError::io(format!("Could not write {}: {}", path.display(), e)))?;

    let name = products
        .get_by_id(id)
        .await?
        .map(|p| p.name)
        .unwrap_or_default();

    debug!(id, bytes = bytes.len(), path = %path.display(), "Exported product image");

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "id": id,
            "name": name,
            "bytes": bytes.len(),
            "path": path,
        }))?),
        OutputFormat::Table => Ok(format!(
            "Wrote image of '{}' ({} bytes) to {}",
            name,
            bytes.len(),
            path.display()
        )),
    }
}

/// Default export location inside the images directory.
pub fn default_image_path(images_dir: &Path, id: RecordId) -> PathBuf {
    images_dir.join(format!("product-{}.img", id))
}

/// Delete a product and its image by id
pub async fn delete(db: &DbState, id: RecordId, format: OutputFormat) -> AppResult<String> {
    db.inner().products().delete_by_id(id).await?;
    render_deleted("product", id, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::temp_state;
    use crate::error::ErrorCode;

    fn form(name: &str, price: &str, quantity: &str) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            category: "Tools".to_string(),
            price: price.to_string(),
            quantity: quantity.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_non_numeric_price_is_validation_error() {
        let (_dir, db) = temp_state().await;

        let err = add(&db, form("Widget", "cheap", "5"), OutputFormat::Table)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("price"));
    }

    #[tokio::test]
    async fn test_list_shows_price_as_searched() {
        let (_dir, db) = temp_state().await;
        add(&db, form("Cable", "100", "1"), OutputFormat::Table)
            .await
            .unwrap();

        let table = list(&db, OutputFormat::Table).await.unwrap();
        assert!(table.contains("100.0"));

        let hits = search(&db, "100.0", OutputFormat::Table).await.unwrap();
        assert!(hits.contains("Cable"));
    }

    #[tokio::test]
    async fn test_search_no_hits() {
        let (_dir, db) = temp_state().await;
        add(&db, form("Cable", "100", "1"), OutputFormat::Table)
            .await
            .unwrap();

        assert_eq!(
            search(&db, "zzz", OutputFormat::Table).await.unwrap(),
            "No products found."
        );
    }

    #[tokio::test]
    async fn test_staged_image_is_stored_and_exported() {
        let (dir, db) = temp_state().await;
        let staged = dir.path().join("photo.png");
        let bytes: Vec<u8> = (0..=255).collect();
        std::fs::write(&staged, &bytes).unwrap();

        let mut with_image = form("Widget", "9.99", "5");
        with_image.image = Some(staged);
        add(&db, with_image, OutputFormat::Table).await.unwrap();
        let id = db.inner().products().list_summary().await.unwrap()[0].id;

        let out = image(&db, id, None, OutputFormat::Table).await.unwrap();
        assert!(out.contains("Widget"));

        let exported = std::fs::read(default_image_path(db.inner().images_dir(), id)).unwrap();
        assert_eq!(exported, bytes);
    }

    #[tokio::test]
    async fn test_unreadable_image_still_adds_product() {
        let (dir, db) = temp_state().await;

        let mut missing = form("Widget", "9.99", "5");
        missing.image = Some(dir.path().join("does-not-exist.png"));
        add(&db, missing, OutputFormat::Table).await.unwrap();

        let id = db.inner().products().list_summary().await.unwrap()[0].id;
        assert_eq!(db.inner().products().get_image(id).await.unwrap(), None);

        let out = image(&db, id, None, OutputFormat::Table).await.unwrap();
        assert_eq!(out, format!("Product {} has no image stored.", id));
    }

    #[tokio::test]
    async fn test_image_of_unknown_product() {
        let (_dir, db) = temp_state().await;

        let err = image(&db, 99, None, OutputFormat::Table).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_image_export_to_explicit_path() {
        let (dir, db) = temp_state().await;
        let staged = dir.path().join("logo.gif");
        std::fs::write(&staged, b"GIF89a").unwrap();

        let mut with_image = form("Logo", "0", "0");
        with_image.image = Some(staged);
        add(&db, with_image, OutputFormat::Table).await.unwrap();
        let id = db.inner().products().list_summary().await.unwrap()[0].id;

        let out_path = dir.path().join("out.gif");
        let out = image(&db, id, Some(out_path.clone()), OutputFormat::Json)
            .await
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["bytes"], 6);
        assert_eq!(std::fs::read(out_path).unwrap(), b"GIF89a");
    }
}
