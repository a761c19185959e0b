// handlers/public/auth.rs - current principal and session logout

use std::sync::Arc;

use crate::auth::Principal;
use crate::handlers::Success;
use crate::rpc::{Context, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("me", Procedure::public().query(me))
        .procedure("logout", Procedure::public().mutation(logout))
        .build()
}

/// The signed-in principal, or the placeholder user when nobody is signed in
async fn me(ctx: Arc<Context>, _: ()) -> anyhow::Result<Principal> {
    Ok(ctx.principal().cloned().unwrap_or_else(Principal::placeholder))
}

/// Expire the session cookie. Safe to call without a session.
async fn logout(ctx: Arc<Context>, _: ()) -> anyhow::Result<Success> {
    let cookie_name = &ctx.state().config.auth.session_cookie_name;
    ctx.response().clear_cookie(cookie_name, &ctx.session_cookie_options());
    tracing::info!(
        signed_in = ctx.principal().is_some(),
        "Session cookie cleared"
    );
    Ok(Success::ok())
}
