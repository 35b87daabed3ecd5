pub mod auth;
pub mod poller;
pub mod price_cache;

pub use auth::{AuthError, AuthService};
pub use poller::{PollerHandle, PricePoller};
pub use price_cache::PriceCache;
