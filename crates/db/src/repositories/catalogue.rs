use sqlx::Row;

use menubot_core::domain::catalogue::{CatalogueId, CatalogueItem, PricingMode};

use super::{CatalogueRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCatalogueRepository {
    pool: DbPool,
}

impl SqlCatalogueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<CatalogueItem, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::Decode(e.to_string());

    let catalogue_id: String = row.try_get("catalogue_id").map_err(decode)?;
    let item_menu_number: i64 = row.try_get("item_menu_number").map_err(decode)?;
    let selection: String = row.try_get("selection").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let options_json: String = row.try_get("options_json").map_err(decode)?;
    let pricing_mode: String = row.try_get("pricing_mode").map_err(decode)?;

    let item_menu_number = u32::try_from(item_menu_number).map_err(|_| {
        RepositoryError::Decode(format!("item number {item_menu_number} is out of range"))
    })?;
    let options = serde_json::from_str::<Vec<String>>(&options_json)
        .map_err(|e| RepositoryError::Decode(format!("options of item {item_menu_number}: {e}")))?;
    let pricing_mode = pricing_mode
        .parse::<PricingMode>()
        .map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(CatalogueItem {
        catalogue_id: CatalogueId(catalogue_id),
        selection,
        item_menu_number,
        name,
        options,
        pricing_mode,
    })
}

#[async_trait::async_trait]
impl CatalogueRepository for SqlCatalogueRepository {
    async fn load_catalogue_items(
        &self,
        catalogue_id: &CatalogueId,
    ) -> Result<Vec<CatalogueItem>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT catalogue_id, item_menu_number, selection, name, options_json, pricing_mode
             FROM catalogue_item
             WHERE catalogue_id = ?
             ORDER BY item_menu_number ASC",
        )
        .bind(&catalogue_id.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_item).collect::<Result<Vec<_>, _>>()
    }

    async fn save_items(&self, items: Vec<CatalogueItem>) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for item in &items {
            let options_json = serde_json::to_string(&item.options)
                .map_err(|e| RepositoryError::Decode(e.to_string()))?;

            sqlx::query(
                "INSERT INTO catalogue_item (catalogue_id, item_menu_number, selection, name,
                                             options_json, pricing_mode)
                 VALUES (?, ?, ?, ?, ?, ?)
                 ON CONFLICT(catalogue_id, item_menu_number) DO UPDATE SET
                     selection = excluded.selection,
                     name = excluded.name,
                     options_json = excluded.options_json,
                     pricing_mode = excluded.pricing_mode",
            )
            .bind(&item.catalogue_id.0)
            .bind(i64::from(item.item_menu_number))
            .bind(&item.selection)
            .bind(&item.name)
            .bind(options_json)
            .bind(item.pricing_mode.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
