//! Auth domain actions - one-shot operations outside the verification session
//!
//! Actions are async functions called directly by the host with the shared `AuthDeps`.

mod complete_registration;
mod logout;

pub use complete_registration::{complete_registration, ACCOUNT_CREATED_MESSAGE, ACCOUNT_FAILED_MESSAGE};
pub use logout::{logout, LOGGED_OUT_MESSAGE};
