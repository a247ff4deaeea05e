use anyhow::Result;
use clap::Args;

use crate::context::AppContext;

#[derive(Args, Default)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let Some(user) = ctx.session.user() else {
            println!("No has iniciado sesión.");
            println!();
            println!("Usa 'entreno login' para autenticarte.");
            return Ok(());
        };

        println!("✓ Sesión iniciada como:");
        println!();
        println!("  Nombre:   {}", user.display_name());
        println!("  Email:    {}", user.email.as_deref().unwrap_or("-"));
        println!("  ID:       {}", user.id);

        if let Some(expiry) = ctx.session.state().session().and_then(|s| s.expires_at()) {
            println!("  Expira:   {}", expiry.with_timezone(&chrono::Local).format("%d/%m/%Y %H:%M"));
        }

        Ok(())
    }
}
