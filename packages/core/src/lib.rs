// Travelwise sign-in core
//
// Phone-number one-time-code sign-in: the verification state machine, the
// session gate that protects the profile views, and registration of new
// accounts in the remote user directory.
//
// Infrastructure (local credential storage, the user directory, notifications)
// sits behind the traits in kernel/ so hosts and tests can swap them.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod routes;

pub use config::*;
