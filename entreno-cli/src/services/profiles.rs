use serde_json::Value;

use super::{credentials, Result, ServiceError};
use crate::backend::{BackendClient, BackendError, Session};
use crate::context::AppContext;
use crate::models::{BiometricEntry, Profile, ProfileForm, RecordId};

const PROFILES: &str = "profiles";
const HISTORY: &str = "biometric_history";

/// Make sure the signed-in user has a profile row, creating the default one
/// if the lookup reports no match. Returns whether a row was inserted.
pub async fn ensure_profile_exists(
    backend: &BackendClient,
    session: &Session,
) -> std::result::Result<bool, BackendError> {
    let user = &session.user;
    let lookup = backend
        .table(PROFILES, &session.access_token)
        .select("id")
        .eq("id", user.id)
        .single::<Value>()
        .await;

    match lookup {
        Ok(_) => Ok(false),
        Err(e) if e.is_not_found() => {
            let profile = Profile::initial(user.id, user.display_name());
            backend
                .table(PROFILES, &session.access_token)
                .insert(&profile)
                .await?;
            tracing::info!("Created profile for {}", user.id);
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

/// Current profile as an editable form. A missing row yields the defaults.
pub async fn load_profile(ctx: &AppContext) -> Result<ProfileForm> {
    let (token, user_id) = credentials(ctx).await?;

    let result = ctx
        .backend
        .table(PROFILES, &token)
        .eq("id", user_id)
        .single::<Profile>()
        .await;

    match result {
        Ok(profile) => Ok(ProfileForm::from(profile)),
        Err(e) if e.is_not_found() => Ok(ProfileForm::default()),
        Err(e) => Err(e.into()),
    }
}

/// Upsert the profile, then append a biometric snapshot.
///
/// The snapshot is best-effort: its failure is logged and the save still
/// counts as successful.
pub async fn save_profile(ctx: &AppContext, form: &ProfileForm) -> Result<()> {
    if form.full_name.trim().is_empty() {
        return Err(ServiceError::Validation(
            "El nombre es obligatorio".to_string(),
        ));
    }

    let (token, user_id) = credentials(ctx).await?;

    ctx.backend
        .table(PROFILES, &token)
        .upsert(&form.to_profile(user_id))
        .await?;

    if let Err(e) = ctx
        .backend
        .table(HISTORY, &token)
        .insert(&form.to_history_entry(user_id))
        .await
    {
        tracing::warn!("Failed to record biometric history: {}", e);
    }

    tracing::info!("Profile saved");
    Ok(())
}

/// Biometric snapshots, newest first
pub async fn list_history(ctx: &AppContext) -> Result<Vec<BiometricEntry>> {
    let (token, user_id) = credentials(ctx).await?;

    let entries = ctx
        .backend
        .table(HISTORY, &token)
        .eq("user_id", user_id)
        .order("created_at", false)
        .fetch()
        .await?;
    Ok(entries)
}

pub async fn delete_history_entry(
    ctx: &AppContext,
    entries: &mut Vec<BiometricEntry>,
    id: &RecordId,
) -> Result<()> {
    let (token, _) = credentials(ctx).await?;

    ctx.backend.table(HISTORY, &token).eq("id", id).delete().await?;
    entries.retain(|e| &e.id != id);
    Ok(())
}
