pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod ordering;
pub mod pricing;
pub mod render;

pub use dispatch::{dispatch, Command, InfoQuery};
pub use domain::catalogue::{Catalogue, CatalogueId, CatalogueItem, CatalogueSelection, PricingMode};
pub use domain::order::{Amount, CustomerOrder, MenuIndication, OrderItems, OrderStatus};
pub use domain::user::{ProfileField, UserInfo};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use ordering::{parse_update_order, reconcile, render_update_order, ParseError};
pub use pricing::{DeterministicPricingEngine, PriceQuote, PricingEngine, PricingError};
