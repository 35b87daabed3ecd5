pub mod auth;
pub mod market;
pub mod trade;

pub use auth::*;
pub use market::*;
pub use trade::*;
