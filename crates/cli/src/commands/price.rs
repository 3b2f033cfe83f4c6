use crate::commands::reply::application_failure;
use crate::commands::{bootstrap_failure, prepare, CommandResult};
use menubot_bot::bootstrap_with_config;
use menubot_core::domain::catalogue::{Catalogue, CatalogueId};
use menubot_core::errors::{ApplicationError, DomainError};
use menubot_core::pricing::{DeterministicPricingEngine, PriceQuote, PricingEngine};
use menubot_db::repositories::{
    CatalogueRepository, OrderRepository, SqlCatalogueRepository, SqlOrderRepository,
};

/// Prices the current order of `from` without starting a checkout.
pub fn run(from: &str) -> CommandResult {
    let (config, runtime) = match prepare("price") {
        Ok(prepared) => prepared,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let app = bootstrap_with_config(config).await.map_err(|error| bootstrap_failure(&error))?;
        let orders = SqlOrderRepository::new(app.db_pool.clone());
        let catalogues = SqlCatalogueRepository::new(app.db_pool.clone());
        let catalogue_id = CatalogueId(app.config.catalogue.id.clone());

        let quoted = async {
            let Some(order) = orders.load_current_order(from).await? else {
                return Ok(None);
            };
            let items = catalogues.load_catalogue_items(&catalogue_id).await?;
            let catalogue = Catalogue::from_items(
                catalogue_id.0.clone(),
                app.config.catalogue.preamble.clone(),
                items,
            );
            let quote = DeterministicPricingEngine
                .price(&order.items, &catalogue)
                .map_err(DomainError::from)?;
            Ok::<_, ApplicationError>(Some(quote))
        }
        .await;

        app.db_pool.close().await;
        match quoted {
            Ok(Some(quote)) => Ok(quote),
            Ok(None) => Err(("no_current_order", format!("{from} has no current order"), 1u8)),
            Err(error) => Err(application_failure(error, from)),
        }
    });

    match result {
        Ok(quote) => CommandResult::success("price", quote_message(&quote)),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("price", error_class, message, exit_code)
        }
    }
}

fn quote_message(quote: &PriceQuote) -> String {
    if quote.summary.is_empty() {
        format!("Total: R{}", quote.total)
    } else {
        quote.summary.clone()
    }
}
