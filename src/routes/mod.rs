mod create_cashier;
mod health_check;

pub use create_cashier::{create_cashier, json_config, MAX_BODY_BYTES};
pub use health_check::health_check;
