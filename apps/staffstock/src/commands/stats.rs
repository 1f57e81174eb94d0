//! Store statistics: file size, then per table its row count, columns and
//! a few sample rows.

use staffstock_db::{ColumnInfo, TableStats};
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Tabled;

use super::{render_list, OutputFormat};
use crate::error::AppResult;
use crate::state::DbState;

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Type")]
    data_type: String,
    #[tabled(rename = "Not Null")]
    not_null: &'static str,
    #[tabled(rename = "Default")]
    default_value: String,
    #[tabled(rename = "PK")]
    primary_key: &'static str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl From<&ColumnInfo> for ColumnRow {
    fn from(column: &ColumnInfo) -> Self {
        Self {
            name: column.name.clone(),
            data_type: column.data_type.clone(),
            not_null: yes_no(column.not_null),
            default_value: column.default_value.clone().unwrap_or_default(),
            primary_key: yes_no(column.primary_key),
        }
    }
}

fn render_table(stats: &TableStats) -> AppResult<String> {
    let columns = render_list::<_, ColumnRow>(&stats.columns, OutputFormat::Table, "No columns.")?;
    let mut out = format!("{} ({} rows)\n{}", stats.table, stats.rows, columns);

    if !stats.sample.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(stats.columns.iter().map(|c| c.name.clone()));
        for row in &stats.sample {
            builder.push_record(row.iter().cloned());
        }
        let mut sample = builder.build();
        sample.with(Style::rounded());
        out.push_str(&format!("\nSample:\n{}", sample));
    }

    Ok(out)
}

/// Show the store path and size, then every table with its columns and up
/// to `sample` rows
pub async fn show(db: &DbState, sample: u32, format: OutputFormat) -> AppResult<String> {
    let stats = db.inner().table_stats(sample).await?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&stats)?),
        OutputFormat::Table => {
            let mut out = format!(
                "Store: {}\nSize:  {} bytes",
                stats.path.display(),
                stats.file_size_bytes
            );
            for table in &stats.tables {
                out.push_str("\n\n");
                out.push_str(&render_table(table)?);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::temp_state;
    use staffstock_core::{NewCategory, NewProduct};

    #[tokio::test]
    async fn test_stats_counts_rows() {
        let (_dir, db) = temp_state().await;
        db.inner()
            .categories()
            .insert(&NewCategory::new("Tools"))
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&show(&db, 3, OutputFormat::Json).await.unwrap()).unwrap();

        assert_eq!(json["tables"][0]["table"], "employees");
        assert_eq!(json["tables"][0]["rows"], 0);
        assert_eq!(json["tables"][1]["table"], "categories");
        assert_eq!(json["tables"][1]["rows"], 1);
        assert_eq!(json["tables"][1]["columns"][1]["name"], "name");
        assert_eq!(json["tables"][1]["sample"][0][1], "Tools");
    }

    #[tokio::test]
    async fn test_stats_table() {
        let (_dir, db) = temp_state().await;
        db.inner()
            .products()
            .insert(&NewProduct::new("Widget", "Tools", "2", "1").with_image(vec![0; 4]))
            .await
            .unwrap();

        let out = show(&db, 3, OutputFormat::Table).await.unwrap();
        assert!(out.starts_with("Store: "));
        assert!(out.contains("products (1 rows)"));
        assert!(out.contains("BLOB"));
        assert!(out.contains("Sample:"));
        assert!(out.contains("<4 bytes>"));
    }

    #[tokio::test]
    async fn test_stats_without_sample() {
        let (_dir, db) = temp_state().await;
        db.inner()
            .categories()
            .insert(&NewCategory::new("Tools"))
            .await
            .unwrap();

        let out = show(&db, 0, OutputFormat::Table).await.unwrap();
        assert!(out.contains("categories (1 rows)"));
        assert!(!out.contains("Sample:"));
    }
}
