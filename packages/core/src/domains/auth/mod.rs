//! Auth domain - phone-number sign-in with a one-time code
//!
//! Architecture (machines decide, effects execute):
//!   host event → VerificationSession → VerificationMachine::decide → command
//!   → session executes the command against AuthDeps → result fed back as event
//!
//! Responsibilities:
//! - Issuing, re-sending and verifying one-time codes
//! - Resolving returning vs. new users against the user directory
//! - Guarding the profile routes (SessionGate)
//! - Completing registration and signing out

pub mod actions;
pub mod commands;
pub mod events;
pub mod gate;
pub mod issuer;
pub mod machines;
pub mod models;
pub mod session;

pub use commands::VerificationCommand;
pub use events::VerificationEvent;
pub use gate::{GateDecision, SessionGate};
pub use issuer::{RandomOtpIssuer, RESEND_COOLDOWN_SECS};
pub use machines::{Phase, VerificationMachine};
pub use session::{SessionSnapshot, VerificationSession, VerifyOutcome};
