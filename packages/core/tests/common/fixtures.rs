//! Test fixtures for sign-in flows.

use tokio::sync::mpsc::{self, UnboundedReceiver};
use travelwise_core::domains::auth::models::{PhoneNumber, ProfileForm, UserRecord};
use travelwise_core::domains::auth::VerificationSession;
use travelwise_core::kernel::test_dependencies::TestDependencies;
use travelwise_core::kernel::CountdownTick;

pub const PHONE_INPUT: &str = "9876543210";
pub const PHONE: &str = "+919876543210";

pub fn phone() -> PhoneNumber {
    PhoneNumber::parse(PHONE_INPUT, "+91").expect("fixture phone is valid")
}

/// A returning user as the directory stores it
pub fn existing_user() -> UserRecord {
    serde_json::from_value(serde_json::json!({
        "uid": "u1",
        "phoneNumber": PHONE,
        "firstName": "Amy",
    }))
    .expect("fixture record is valid")
}

pub fn profile() -> ProfileForm {
    ProfileForm {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha.rao@example.com".to_string(),
        terms_accepted: true,
    }
}

/// Fresh session over the given mocks, with its tick receiver
pub fn start_session(
    deps: &TestDependencies,
) -> (VerificationSession, UnboundedReceiver<CountdownTick>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (VerificationSession::new(deps.deps(), tx), rx)
}
