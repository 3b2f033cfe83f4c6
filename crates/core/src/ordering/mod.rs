//! Update-order text handling: parsing command bodies into indications and
//! merging them into an existing order.

pub mod parser;
pub mod reconcile;

pub use parser::{parse_update_order, render_update_order, ParseError};
pub use reconcile::reconcile;
