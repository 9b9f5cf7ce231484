pub mod configuration;
pub mod database;
pub mod error;
pub mod google;
pub mod identity;
pub mod models;
pub mod routes;
mod startup;
pub mod telemetry;

#[cfg(test)]
mod test_helpers;

pub use configuration::get_configuration;
pub use error::{CashierError, Result};
pub use startup::{build_app, configure_routes};
