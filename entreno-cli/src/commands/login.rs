use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Password};

use super::{failure, spinner, success};
use crate::context::AppContext;
use crate::session::{AuthFailure, Route};

#[derive(Args, Default)]
pub struct LoginCommand {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    email: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("Entreno - Iniciar sesión");
        println!();

        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = Password::new().with_prompt("Clave").interact()?;

        let bar = spinner(&format!("Iniciando sesión como {}...", email));
        let result = ctx.session.sign_in(email.trim(), &password).await;
        bar.finish_and_clear();

        match result {
            Ok(session) => {
                success("¡Sesión iniciada!");
                println!();
                println!("¡Bienvenido, {}!", session.user.display_name());
                println!("Siguiente: entreno dashboard ({})", Route::Dashboard);
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Sign-in failed: {:?}", e);
                let reason = AuthFailure::from_error(&e);
                failure(reason.message());
                Err(anyhow::anyhow!(reason))
            }
        }
    }
}
