use chrono::{DateTime, Utc};

use menubot_core::domain::catalogue::{Catalogue, CatalogueId};
use menubot_core::domain::order::CustomerOrder;
use menubot_core::domain::user::UserInfo;
use menubot_core::errors::ApplicationError;
use menubot_db::repositories::{CatalogueRepository, OrderRepository, UserRepository};

/// Everything a single inbound message is evaluated against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationContext {
    pub user: UserInfo,
    /// `false` on the sender's first message.
    pub user_existed: bool,
    pub catalogue: Catalogue,
    /// The sender's open order, or a fresh unsaved one.
    pub order: CustomerOrder,
    pub message_body: String,
    pub received_at: DateTime<Utc>,
}

pub struct ContextSources<'a> {
    pub catalogues: &'a dyn CatalogueRepository,
    pub orders: &'a dyn OrderRepository,
    pub users: &'a dyn UserRepository,
}

impl ConversationContext {
    pub async fn load(
        sources: ContextSources<'_>,
        catalogue_id: &CatalogueId,
        catalogue_preamble: &str,
        sender: &str,
        message_body: &str,
    ) -> Result<Self, ApplicationError> {
        let lookup = sources.users.find_or_create(sender).await?;

        let items = sources.catalogues.load_catalogue_items(catalogue_id).await?;
        let catalogue = Catalogue::from_items(catalogue_id.0.clone(), catalogue_preamble, items);
        catalogue.validate()?;

        let order = sources
            .orders
            .load_current_order(sender)
            .await?
            .unwrap_or_else(|| CustomerOrder::new(sender, catalogue_id.0.clone()));

        Ok(Self {
            user: lookup.user,
            user_existed: lookup.existed,
            catalogue,
            order,
            message_body: message_body.to_owned(),
            received_at: Utc::now(),
        })
    }

    /// Identifies this message in logs.
    pub fn correlation_id(&self) -> String {
        format!("{}-{}", self.user.cell_number, self.received_at.timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use menubot_core::domain::catalogue::CatalogueId;
    use menubot_core::domain::order::{CustomerOrder, MenuIndication, OrderStatus};
    use menubot_db::repositories::{
        CatalogueRepository, InMemoryCatalogueRepository, InMemoryOrderRepository,
        InMemoryUserRepository, OrderRepository,
    };
    use menubot_db::DemoCatalogue;

    use super::{ContextSources, ConversationContext};

    #[tokio::test]
    async fn first_message_creates_user_and_fresh_order() {
        let catalogues = InMemoryCatalogueRepository::default();
        catalogues.save_items(DemoCatalogue::items("Pig")).await.expect("seed");
        let orders = InMemoryOrderRepository::default();
        let users = InMemoryUserRepository::default();
        let sources =
            || ContextSources { catalogues: &catalogues, orders: &orders, users: &users };

        let context = ConversationContext::load(
            sources(),
            &CatalogueId("Pig".to_string()),
            "Price list:",
            "27820000001",
            "menu?",
        )
        .await
        .expect("load context");

        assert!(!context.user_existed);
        assert_eq!(context.catalogue.selections.len(), 5);
        assert_eq!(context.catalogue.preamble, "Price list:");
        assert_eq!(context.order.order_id, None);
        assert_eq!(context.order.status, OrderStatus::Initialized);

        let mut open = CustomerOrder::new("27820000001", "Pig");
        open.apply_update(&[MenuIndication::new(8, "1")]);
        let open = orders.save_order(open).await.expect("save");

        let context = ConversationContext::load(
            sources(),
            &CatalogueId("Pig".to_string()),
            "Price list:",
            "27820000001",
            "currentorder?",
        )
        .await
        .expect("reload context");

        assert!(context.user_existed);
        assert_eq!(context.order, open);
        assert!(context.correlation_id().starts_with("27820000001-"));
    }
}
