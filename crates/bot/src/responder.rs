use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use menubot_core::config::AppConfig;
use menubot_core::dispatch::{dispatch, Command, InfoQuery};
use menubot_core::domain::catalogue::{Catalogue, CatalogueId};
use menubot_core::domain::order::{MenuIndication, OrderStatus};
use menubot_core::domain::user::ProfileField;
use menubot_core::errors::{ApplicationError, DomainError};
use menubot_core::ordering::ParseError;
use menubot_core::pricing::{PricingEngine, PricingError};
use menubot_core::render::{render_current_order, render_price_list, render_user_info};
use menubot_db::repositories::{CatalogueRepository, OrderRepository, UserRepository};

use crate::checkout::{CheckoutCart, CheckoutGateway};
use crate::context::{ContextSources, ConversationContext};
use crate::replies;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponderSettings {
    pub catalogue_id: CatalogueId,
    pub catalogue_preamble: String,
    pub item_name_prefix: String,
}

impl ResponderSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            catalogue_id: CatalogueId(config.catalogue.id.clone()),
            catalogue_preamble: config.catalogue.preamble.clone(),
            item_name_prefix: config.checkout.item_name_prefix.clone(),
        }
    }
}

/// Text produced by one executed command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub command: String,
    pub reply: String,
}

/// Answers inbound chat messages: loads the sender's context, runs every command
/// found in the message and wraps the results in the appropriate greeting.
pub struct Responder {
    settings: ResponderSettings,
    catalogues: Arc<dyn CatalogueRepository>,
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
    pricing: Arc<dyn PricingEngine>,
    checkout: Arc<dyn CheckoutGateway>,
}

impl Responder {
    pub fn new(
        settings: ResponderSettings,
        catalogues: Arc<dyn CatalogueRepository>,
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        pricing: Arc<dyn PricingEngine>,
        checkout: Arc<dyn CheckoutGateway>,
    ) -> Self {
        Self { settings, catalogues, orders, users, pricing, checkout }
    }

    pub async fn respond(&self, sender: &str, body: &str) -> Result<String, ApplicationError> {
        let mut context = ConversationContext::load(
            ContextSources {
                catalogues: self.catalogues.as_ref(),
                orders: self.orders.as_ref(),
                users: self.users.as_ref(),
            },
            &self.settings.catalogue_id,
            &self.settings.catalogue_preamble,
            sender,
            body,
        )
        .await?;
        let correlation_id = context.correlation_id();

        let commands = dispatch(&context.message_body);
        info!(
            event_name = "bot.message.dispatched",
            correlation_id = %correlation_id,
            cell_number = %sender,
            user_existed = context.user_existed,
            command_count = commands.len(),
            "message dispatched"
        );

        let mut outcomes = Vec::with_capacity(commands.len());
        for command in commands {
            let outcome = self.execute(&mut context, command).await?;
            info!(
                event_name = "bot.command.executed",
                correlation_id = %correlation_id,
                cell_number = %sender,
                command = %outcome.command,
                "command executed"
            );
            outcomes.push(outcome);
        }

        let joined =
            outcomes.iter().map(|outcome| outcome.reply.as_str()).collect::<Vec<_>>().join("\n");
        let result = (!outcomes.is_empty()).then_some(joined.as_str());
        Ok(replies::compose(context.user_existed, result))
    }

    /// Transport-facing variant of [`Responder::respond`]: failures are logged and
    /// answered with a generic apology instead of being returned.
    pub async fn reply(&self, sender: &str, body: &str) -> String {
        match self.respond(sender, body).await {
            Ok(text) => text,
            Err(error) => {
                warn!(
                    event_name = "bot.message.failed",
                    cell_number = %sender,
                    error = %error,
                    "message could not be processed"
                );
                replies::UNHANDLED_COMMAND.to_owned()
            }
        }
    }

    async fn execute(
        &self,
        context: &mut ConversationContext,
        command: Command,
    ) -> Result<CommandOutcome, ApplicationError> {
        let label = command.label();
        let reply = match command {
            Command::Query(InfoQuery::Menu) => replies::main_menu(),
            Command::Query(InfoQuery::PriceList) => {
                format!("{}\n\n{}", replies::price_list_intro(), render_price_list(&context.catalogue))
            }
            Command::Query(InfoQuery::UserInfo) => render_user_info(&context.user),
            Command::Query(InfoQuery::CurrentOrder) => {
                render_current_order(&context.order.items, &context.catalogue)
            }
            Command::Query(InfoQuery::Checkout) => self.checkout(context).await?,
            Command::UpdateField { field, value } => {
                self.update_field(context, field, &value).await?
            }
            Command::UpdateOrder { indications, .. } => {
                self.update_order(context, indications).await?
            }
        };

        Ok(CommandOutcome { command: label, reply })
    }

    async fn update_field(
        &self,
        context: &mut ConversationContext,
        field: ProfileField,
        value: &str,
    ) -> Result<String, ApplicationError> {
        context.user = self.users.update_field(&context.user.cell_number, field, value).await?;
        Ok(replies::field_updated(field.as_str(), value))
    }

    async fn update_order(
        &self,
        context: &mut ConversationContext,
        indications: Result<Vec<MenuIndication>, ParseError>,
    ) -> Result<String, ApplicationError> {
        let indications = match indications {
            Ok(indications) => indications,
            Err(error) => return Ok(DomainError::from(error).to_string()),
        };
        if indications.is_empty() {
            return Ok(format!(
                "no items found in update order command, please use-: {}",
                replies::UPDATE_ORDER_HELP
            ));
        }

        if let Err(error) = validate_update(&indications, &context.catalogue) {
            return Ok(format!("error updating current order: {error}"));
        }

        let mut order = context.order.clone();
        order.apply_update(&indications);
        context.order = self.orders.save_order(order).await?;
        Ok(replies::ORDER_UPDATED.to_owned())
    }

    async fn checkout(&self, context: &mut ConversationContext) -> Result<String, ApplicationError> {
        if context.order.items.is_empty() {
            return Ok(replies::EMPTY_ORDER_CHECKOUT.to_owned());
        }

        let quote = match self.pricing.price(&context.order.items, &context.catalogue) {
            Ok(quote) => quote,
            Err(error) => return Ok(DomainError::from(error).to_string()),
        };

        if quote.total == 0 {
            return Ok(replies::EMPTY_ORDER_CHECKOUT.to_owned());
        }

        // the order is only marked as checking out once a payment link exists
        let cart = CheckoutCart::for_order(
            &context.order,
            &context.user,
            quote.total,
            &self.settings.item_name_prefix,
        );
        let link = self.checkout.initiate(&cart).await?;

        let mut order = context.order.clone();
        order.total = quote.total;
        order.status = OrderStatus::CheckoutStarted;
        context.order = self.orders.save_order(order).await?;

        let summary = if quote.summary.is_empty() {
            format!("Total: R{}", quote.total)
        } else {
            quote.summary
        };
        Ok(format!("{summary}\n\n{link}"))
    }
}

/// Rejects an update that names an item missing from the catalogue or carries an
/// amount that could never be priced. Removals are exempt from both checks.
fn validate_update(
    indications: &[MenuIndication],
    catalogue: &Catalogue,
) -> Result<(), PricingError> {
    for indication in indications.iter().filter(|indication| !indication.is_removal()) {
        let item_menu_number = indication.item_menu_number;
        if catalogue.find(item_menu_number).is_none() {
            return Err(PricingError::UnknownItem { item_menu_number });
        }
        indication
            .parsed_amount()
            .map_err(|source| PricingError::InvalidAmount { item_menu_number, source })?;
    }
    Ok(())
}
