pub mod catalogue;
pub mod order;
pub mod user;
