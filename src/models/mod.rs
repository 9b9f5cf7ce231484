mod cashier;
mod request;
mod uid;

pub use cashier::{Cashier, CashierProfile, CreateCashierResponse, Role, USERS_COLLECTION};
pub use request::{CashierFields, CreateCashierRequest, NewCashier};
pub use uid::Uid;
