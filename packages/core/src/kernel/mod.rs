// Kernel - infrastructure the auth domain runs on
//
// Traits for the external collaborators, their production adapters, the
// dependency container, and the pure machine abstraction.

pub mod countdown;
pub mod credential_store;
pub mod deps;
pub mod directory;
pub mod firestore;
pub mod machine;
pub mod notifier;
pub mod test_dependencies;
pub mod traits;

pub use countdown::{CountdownTick, CountdownTimer};
pub use credential_store::{FileCredentialStore, MemoryCredentialStore};
pub use deps::AuthDeps;
pub use directory::MemoryUserDirectory;
pub use firestore::FirestoreUserDirectory;
pub use machine::Machine;
pub use notifier::TracingNotifier;
pub use traits::*;
