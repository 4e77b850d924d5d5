//! One module per screen. A view runs until the user leaves it and says
//! where to go next.

mod home;
mod login;
mod register;
mod verify;

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;
use travelwise_core::common::FlowError;
use travelwise_core::domains::auth::VerificationSession;
use travelwise_core::kernel::CountdownTick;
use travelwise_core::routes::Route;

pub use home::home;
pub use login::login;
pub use register::register;
pub use verify::verify;

use crate::context::AppContext;

/// A freshly issued verification handed from login to the verify screen
pub struct PendingVerification {
    pub session: VerificationSession,
    pub ticks: UnboundedReceiver<CountdownTick>,
}

pub enum ViewResult {
    Navigate(Route),
    StartVerification(PendingVerification),
    Quit,
}

/// Failures never end the app: show them and start over at login
pub fn back_to_login(ctx: &AppContext, error: &FlowError) -> ViewResult {
    warn!("Returning to login after: {}", error);
    ctx.print_warning(&error.to_string());
    ViewResult::Navigate(Route::Login)
}
