use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;
use travelwise_core::common::FlowError;
use travelwise_core::domains::auth::models::validate_code_input;
use travelwise_core::domains::auth::VerificationSession;
use travelwise_core::routes::Route;

use super::{back_to_login, PendingVerification, ViewResult};
use crate::context::AppContext;

const RESEND_COMMAND: &str = "r";
const BACK_COMMAND: &str = "b";

type Prompt = JoinHandle<dialoguer::Result<String>>;

/// Prompts block, so they run on the blocking pool while the loop keeps
/// applying countdown ticks.
fn spawn_prompt() -> Prompt {
    tokio::task::spawn_blocking(|| {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Enter OTP ({} = resend, {} = back to login)",
                RESEND_COMMAND, BACK_COMMAND
            ))
            .allow_empty(true)
            .interact_text()
    })
}

fn print_status(ctx: &AppContext, session: &VerificationSession) {
    let snapshot = session.snapshot();
    if let Some(phone_number) = &snapshot.phone_number {
        ctx.print_info(&format!("OTP sent to {}", phone_number));
    }
    if let Some(code) = session.pending_code() {
        ctx.print_dim(&format!("Current OTP: {}", code));
    }
    if snapshot.resend_available {
        ctx.print_dim("You can resend the OTP now");
    } else {
        ctx.print_dim(&format!("Resend OTP in {}s", snapshot.countdown));
    }
}

pub async fn verify(ctx: &AppContext, pending: Option<PendingVerification>) -> Result<ViewResult> {
    let (mut session, mut ticks) = match pending {
        Some(PendingVerification { session, ticks }) => (session, ticks),
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            match VerificationSession::resume(ctx.deps.clone(), tx) {
                Ok(Some(session)) => (session, rx),
                Ok(None) => {
                    debug!("Nothing to verify, back to login");
                    return Ok(ViewResult::Navigate(Route::Login));
                }
                Err(e) => return Ok(back_to_login(ctx, &e)),
            }
        }
    };

    ctx.print_header("Verify your phone number");
    print_status(ctx, &session);

    let mut prompt = spawn_prompt();
    loop {
        tokio::select! {
            Some(tick) = ticks.recv() => {
                let was_available = session.snapshot().resend_available;
                session.tick(tick);
                if !was_available && session.snapshot().resend_available {
                    ctx.print_dim("You can resend the OTP now");
                }
            }
            answer = &mut prompt => {
                let input = answer??;
                let input = input.trim();

                match input {
                    RESEND_COMMAND => match session.resend() {
                        Ok(Some(_)) => {}
                        Ok(None) => {
                            let countdown = session.snapshot().countdown;
                            ctx.print_warning(&format!("You can resend the OTP in {}s", countdown));
                        }
                        // Notice already shown
                        Err(e) => debug!("Resend failed: {}", e),
                    },
                    BACK_COMMAND => {
                        session.abandon();
                        return Ok(ViewResult::Navigate(Route::Login));
                    }
                    code => {
                        if let Err(e) = validate_code_input(code) {
                            ctx.print_warning(&e.message);
                        } else {
                            match session.verify(code).await {
                                Ok(outcome) => return Ok(ViewResult::Navigate(outcome.next)),
                                // Notice already shown
                                Err(FlowError::InvalidCode) => {}
                                Err(e) if e.is_retryable() => {}
                                Err(e) => {
                                    session.abandon();
                                    return Ok(back_to_login(ctx, &e));
                                }
                            }
                        }
                    }
                }

                print_status(ctx, &session);
                prompt = spawn_prompt();
            }
        }
    }
}
