pub mod router;
pub mod types;
pub mod handlers {
    pub mod common;
    pub mod dashboard;
    pub mod gateway;
    pub mod health;
    pub mod persons;
    pub mod search;
}

pub use router::{create_gateway_router, create_router, ApiDoc};
pub use types::{AppState, GatewayState};
