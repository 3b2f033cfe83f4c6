use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use menubot_core::domain::catalogue::{CatalogueId, CatalogueItem};
use menubot_core::domain::order::CustomerOrder;
use menubot_core::domain::user::{ProfileField, UserInfo};

use super::{
    CatalogueRepository, OrderRepository, RepositoryError, UserLookup, UserRepository,
};

#[derive(Default)]
pub struct InMemoryCatalogueRepository {
    items: RwLock<BTreeMap<(String, u32), CatalogueItem>>,
}

#[async_trait::async_trait]
impl CatalogueRepository for InMemoryCatalogueRepository {
    async fn load_catalogue_items(
        &self,
        catalogue_id: &CatalogueId,
    ) -> Result<Vec<CatalogueItem>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| item.catalogue_id == *catalogue_id)
            .cloned()
            .collect())
    }

    async fn save_items(&self, new_items: Vec<CatalogueItem>) -> Result<(), RepositoryError> {
        let mut items = self.items.write().await;
        for item in new_items {
            items.insert((item.catalogue_id.0.clone(), item.item_menu_number), item);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<BTreeMap<i64, CustomerOrder>>,
}

#[async_trait::async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn load_current_order(
        &self,
        cell_number: &str,
    ) -> Result<Option<CustomerOrder>, RepositoryError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .rev()
            .find(|order| order.cell_number == cell_number && order.is_open())
            .cloned())
    }

    async fn save_order(&self, order: CustomerOrder) -> Result<CustomerOrder, RepositoryError> {
        let mut orders = self.orders.write().await;
        let order_id = match order.order_id {
            Some(order_id) => order_id,
            None => orders.keys().next_back().map_or(1, |last| last + 1),
        };
        let stored = CustomerOrder { order_id: Some(order_id), ..order };
        orders.insert(order_id, stored.clone());
        Ok(stored)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, UserInfo>>,
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_or_create(&self, cell_number: &str) -> Result<UserLookup, RepositoryError> {
        let mut users = self.users.write().await;
        let existed = users.contains_key(cell_number);
        let user = users
            .entry(cell_number.to_string())
            .or_insert_with(|| UserInfo::new(cell_number))
            .clone();
        Ok(UserLookup { user, existed })
    }

    async fn update_field(
        &self,
        cell_number: &str,
        field: ProfileField,
        value: &str,
    ) -> Result<UserInfo, RepositoryError> {
        let mut users = self.users.write().await;
        let user =
            users.entry(cell_number.to_string()).or_insert_with(|| UserInfo::new(cell_number));
        user.set_field(field, value);
        Ok(user.clone())
    }
}
