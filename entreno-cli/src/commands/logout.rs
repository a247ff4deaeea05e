use anyhow::Result;
use clap::Args;

use crate::context::AppContext;

#[derive(Args, Default)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if ctx.session.user().is_none() {
            println!("No has iniciado sesión.");
            return Ok(());
        }

        // The local session is gone even if the provider call failed
        if let Err(e) = ctx.session.sign_out().await {
            tracing::warn!("Remote sign-out failed: {}", e);
        }

        println!("✓ Sesión cerrada correctamente");

        Ok(())
    }
}
