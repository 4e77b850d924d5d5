use anyhow::Result;
use dialoguer::Select;
use travelwise_core::domains::auth::actions::logout;
use travelwise_core::domains::auth::models::UserRecord;
use travelwise_core::routes::Route;

use super::{back_to_login, ViewResult};
use crate::context::AppContext;

pub fn home(ctx: &AppContext, user: Option<UserRecord>) -> Result<ViewResult> {
    let Some(user) = user else {
        return Ok(ViewResult::Navigate(Route::Login));
    };

    match user.display_name() {
        Some(name) => ctx.print_header(&format!("Welcome, {}", name)),
        None => ctx.print_header(&format!("Welcome, {}", user.phone_number)),
    }
    if let Some(email) = &user.email {
        ctx.print_dim(email);
    }

    let options = ["Log out", "Quit"];
    let selection = Select::with_theme(&ctx.theme())
        .items(&options)
        .default(0)
        .interact_on(&ctx.term)?;

    match selection {
        0 => match logout(&ctx.deps) {
            Ok(next) => Ok(ViewResult::Navigate(next)),
            Err(e) => Ok(back_to_login(ctx, &e)),
        },
        _ => Ok(ViewResult::Quit),
    }
}
