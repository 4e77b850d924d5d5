use anyhow::Result;
use dialoguer::{Input, Select};
use tokio::sync::mpsc;
use travelwise_core::domains::auth::models::PhoneNumber;
use travelwise_core::domains::auth::VerificationSession;

use super::{PendingVerification, ViewResult};
use crate::context::AppContext;

pub async fn login(ctx: &AppContext) -> Result<ViewResult> {
    ctx.print_header("Sign in");

    loop {
        let options = ["Send OTP to my phone", "Quit"];
        let selection = Select::with_theme(&ctx.theme())
            .items(&options)
            .default(0)
            .interact_on(&ctx.term)?;
        if selection == 1 {
            return Ok(ViewResult::Quit);
        }

        let prefix = ctx.config.country_prefix.clone();
        let input: String = Input::with_theme(&ctx.theme())
            .with_prompt(format!("Phone number ({})", prefix))
            .allow_empty(true)
            .validate_with(|value: &String| -> Result<(), String> {
                PhoneNumber::parse(value, &prefix)
                    .map(|_| ())
                    .map_err(|e| e.message)
            })
            .interact_text_on(&ctx.term)?;

        let phone_number = match PhoneNumber::parse(&input, &ctx.config.country_prefix) {
            Ok(phone_number) => phone_number,
            Err(e) => {
                ctx.print_warning(&e.message);
                continue;
            }
        };

        let (tx, ticks) = mpsc::unbounded_channel();
        let mut session = VerificationSession::new(ctx.deps.clone(), tx);

        // Failure already surfaced as a notice; stay here
        if session.issue(phone_number).is_ok() {
            return Ok(ViewResult::StartVerification(PendingVerification {
                session,
                ticks,
            }));
        }
    }
}
