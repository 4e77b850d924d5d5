use anyhow::Result;
use dialoguer::{Confirm, Input};
use travelwise_core::common::FlowError;
use travelwise_core::domains::auth::actions::complete_registration;
use travelwise_core::domains::auth::models::{ProfileForm, UserRecord};
use travelwise_core::routes::Route;

use super::{back_to_login, ViewResult};
use crate::context::AppContext;

fn prompt_text(ctx: &AppContext, label: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ctx.theme())
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text_on(&ctx.term)?)
}

pub async fn register(ctx: &AppContext, user: Option<UserRecord>) -> Result<ViewResult> {
    let Some(draft) = user else {
        return Ok(ViewResult::Navigate(Route::Login));
    };

    ctx.print_header("Create your account");
    ctx.print_info(&format!("Phone number: {}", draft.phone_number));

    let mut form = ProfileForm::default();
    loop {
        form.first_name = prompt_text(ctx, "First name", &form.first_name)?;
        form.last_name = prompt_text(ctx, "Last name", &form.last_name)?;
        form.email = prompt_text(ctx, "Email", &form.email)?;
        form.terms_accepted = Confirm::with_theme(&ctx.theme())
            .with_prompt("I accept the terms and conditions")
            .default(form.terms_accepted)
            .interact_on(&ctx.term)?;

        match complete_registration(&draft, &form, &ctx.deps).await {
            Ok(_) => return Ok(ViewResult::Navigate(Route::Home)),
            Err(FlowError::Validation(errors)) => {
                for error in errors.iter() {
                    ctx.print_warning(&error.message);
                }
            }
            Err(e) if e.is_retryable() => {
                let retry = Confirm::with_theme(&ctx.theme())
                    .with_prompt("Try again?")
                    .default(true)
                    .interact_on(&ctx.term)?;
                if !retry {
                    return Ok(ViewResult::Quit);
                }
            }
            Err(e) => return Ok(back_to_login(ctx, &e)),
        }
    }
}
