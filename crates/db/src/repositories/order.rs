use chrono::{DateTime, Utc};
use sqlx::Row;

use menubot_core::domain::order::{CustomerOrder, MenuIndication, OrderItems, OrderStatus};

use super::{OrderRepository, RepositoryError};
use crate::DbPool;

pub struct SqlOrderRepository {
    pool: DbPool,
}

impl SqlOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_order(row: &sqlx::sqlite::SqliteRow) -> Result<CustomerOrder, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::Decode(e.to_string());

    let order_id: i64 = row.try_get("order_id").map_err(decode)?;
    let cell_number: String = row.try_get("cell_number").map_err(decode)?;
    let catalogue_id: String = row.try_get("catalogue_id").map_err(decode)?;
    let items_json: String = row.try_get("order_items_json").map_err(decode)?;
    let total: i64 = row.try_get("order_total").map_err(decode)?;
    let status: String = row.try_get("status").map_err(decode)?;
    let is_paid: bool = row.try_get("is_paid").map_err(decode)?;
    let is_closed: bool = row.try_get("is_closed").map_err(decode)?;
    let delivered_at: Option<String> = row.try_get("delivered_at").map_err(decode)?;

    let indications = serde_json::from_str::<Vec<MenuIndication>>(&items_json)
        .map_err(|e| RepositoryError::Decode(format!("items of order {order_id}: {e}")))?;
    let total = u64::try_from(total)
        .map_err(|_| RepositoryError::Decode(format!("order {order_id} has a negative total")))?;
    let status = OrderStatus::parse_label(&status).ok_or_else(|| {
        RepositoryError::Decode(format!("order {order_id} has unknown status `{status}`"))
    })?;
    let delivered_at = delivered_at
        .map(|value| {
            DateTime::parse_from_rfc3339(&value)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| RepositoryError::Decode(format!("delivered_at `{value}`: {e}")))
        })
        .transpose()?;

    Ok(CustomerOrder {
        order_id: Some(order_id),
        cell_number,
        catalogue_id,
        items: OrderItems::new(indications),
        total,
        status,
        is_paid,
        is_closed,
        delivered_at,
    })
}

#[async_trait::async_trait]
impl OrderRepository for SqlOrderRepository {
    async fn load_current_order(
        &self,
        cell_number: &str,
    ) -> Result<Option<CustomerOrder>, RepositoryError> {
        let row = sqlx::query(
            "SELECT order_id, cell_number, catalogue_id, order_items_json, order_total, status,
                    is_paid, is_closed, delivered_at
             FROM customer_order
             WHERE cell_number = ? AND is_paid = 0 AND is_closed = 0
             ORDER BY order_id DESC
             LIMIT 1",
        )
        .bind(cell_number)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_order).transpose()
    }

    async fn save_order(&self, order: CustomerOrder) -> Result<CustomerOrder, RepositoryError> {
        let items_json = serde_json::to_string(&order.items.indications)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;
        let total = i64::try_from(order.total)
            .map_err(|_| RepositoryError::Decode(format!("order total {} is too large", order.total)))?;
        let delivered_at = order.delivered_at.map(|dt| dt.to_rfc3339());
        let now = Utc::now().to_rfc3339();

        let order_id = match order.order_id {
            Some(order_id) => {
                sqlx::query(
                    "UPDATE customer_order SET
                         catalogue_id = ?,
                         order_items_json = ?,
                         order_total = ?,
                         status = ?,
                         is_paid = ?,
                         is_closed = ?,
                         delivered_at = ?,
                         updated_at = ?
                     WHERE order_id = ?",
                )
                .bind(&order.catalogue_id)
                .bind(&items_json)
                .bind(total)
                .bind(order.status.as_str())
                .bind(order.is_paid)
                .bind(order.is_closed)
                .bind(&delivered_at)
                .bind(&now)
                .bind(order_id)
                .execute(&self.pool)
                .await?;
                order_id
            }
            None => sqlx::query(
                "INSERT INTO customer_order (cell_number, catalogue_id, order_items_json,
                                             order_total, status, is_paid, is_closed,
                                             delivered_at, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&order.cell_number)
            .bind(&order.catalogue_id)
            .bind(&items_json)
            .bind(total)
            .bind(order.status.as_str())
            .bind(order.is_paid)
            .bind(order.is_closed)
            .bind(&delivered_at)
            .bind(&now)
            .bind(&now)
            .execute(&self.pool)
            .await?
            .last_insert_rowid(),
        };

        Ok(CustomerOrder { order_id: Some(order_id), ..order })
    }
}

#[cfg(test)]
mod tests {
    use menubot_core::domain::order::{CustomerOrder, MenuIndication, OrderStatus};

    use super::SqlOrderRepository;
    use crate::repositories::OrderRepository;
    use crate::{connect_with_settings, migrations};

    async fn setup() -> SqlOrderRepository {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        SqlOrderRepository::new(pool)
    }

    #[tokio::test]
    async fn new_order_gets_an_id_and_loads_back() {
        let repo = setup().await;
        let mut order = CustomerOrder::new("27820000001", "Pig");
        order.apply_update(&[MenuIndication::new(10, "1x3, 3x2"), MenuIndication::new(9, "12")]);

        let saved = repo.save_order(order.clone()).await.expect("save");
        assert!(saved.order_id.is_some());

        let loaded = repo.load_current_order("27820000001").await.expect("load");
        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn saving_again_updates_the_same_row() {
        let repo = setup().await;
        let mut saved =
            repo.save_order(CustomerOrder::new("27820000001", "Pig")).await.expect("insert");
        saved.apply_update(&[MenuIndication::new(8, "2")]);
        saved.total = 200;

        let updated = repo.save_order(saved.clone()).await.expect("update");
        assert_eq!(updated.order_id, saved.order_id);

        let loaded = repo.load_current_order("27820000001").await.expect("load").expect("order");
        assert_eq!(loaded.status, OrderStatus::Updated);
        assert_eq!(loaded.total, 200);
        assert_eq!(loaded.items.len(), 1);
    }

    #[tokio::test]
    async fn paid_or_closed_orders_are_not_current() {
        let repo = setup().await;
        let mut paid =
            repo.save_order(CustomerOrder::new("27820000001", "Pig")).await.expect("insert");
        paid.is_paid = true;
        repo.save_order(paid).await.expect("mark paid");

        let mut closed = CustomerOrder::new("27820000002", "Pig");
        closed.is_closed = true;
        repo.save_order(closed).await.expect("insert closed");

        assert_eq!(repo.load_current_order("27820000001").await.expect("load"), None);
        assert_eq!(repo.load_current_order("27820000002").await.expect("load"), None);
    }

    #[tokio::test]
    async fn newest_open_order_wins() {
        let repo = setup().await;
        repo.save_order(CustomerOrder::new("27820000001", "Pig")).await.expect("first");
        let second =
            repo.save_order(CustomerOrder::new("27820000001", "Pig")).await.expect("second");

        let current = repo.load_current_order("27820000001").await.expect("load").expect("order");
        assert_eq!(current.order_id, second.order_id);
    }
}
