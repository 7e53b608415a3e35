pub mod alias;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use alias::AliasTable;
pub use models::*;
pub use services::SearchService;
