// handlers/protected/preferences.rs - job matching preferences

use std::sync::Arc;

use crate::models::{PreferencesPatch, UserPreferences};
use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("get", Procedure::protected().query(get))
        .procedure(
            "save",
            Procedure::protected()
                .input(
                    Contract::object()
                        .optional("employmentTypes", FieldKind::array_of(FieldKind::String))
                        .optional("workMode", FieldKind::String)
                        .optional("location", FieldKind::String),
                )
                .mutation(save),
        )
        .build()
}

async fn get(ctx: Arc<Context>, _: ()) -> anyhow::Result<Option<UserPreferences>> {
    let user_id = ctx.require_principal()?.id;
    Ok(ctx.state().preferences.find(|p| p.user_id == user_id).await)
}

/// Merge the given fields into the caller's preferences, creating them on first save
async fn save(ctx: Arc<Context>, input: PreferencesPatch) -> anyhow::Result<UserPreferences> {
    let user_id = ctx.require_principal()?.id;
    let saved = ctx
        .state()
        .preferences
        .upsert(
            |p| p.user_id == user_id,
            || UserPreferences::empty(user_id),
            |p| p.merge(input),
        )
        .await;
    Ok(saved)
}
