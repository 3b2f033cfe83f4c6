//! Conversation layer of the ordering bot: turns an inbound text message into a
//! reply using the command dispatcher, the order store and the pricing engine.

pub mod bootstrap;
pub mod checkout;
pub mod context;
pub mod replies;
pub mod responder;

pub use bootstrap::{bootstrap, bootstrap_with_config, Application, BootstrapError};
pub use checkout::{CheckoutCart, CheckoutError, CheckoutGateway, HostedCheckoutLink};
pub use context::{ContextSources, ConversationContext};
pub use responder::{CommandOutcome, Responder, ResponderSettings};
