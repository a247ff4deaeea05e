use anyhow::{bail, Result};
use clap::Args;
use dialoguer::{Input, Password};
use serde_json::json;

use super::{failure, spinner, success};
use crate::backend::SignUpOutcome;
use crate::context::AppContext;
use crate::session::AuthFailure;

const NO_USER: &str = "El servidor no devolvió datos de usuario.";

#[derive(Args, Default)]
pub struct RegisterCommand {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    email: Option<String>,

    /// Full name stored with the account
    #[arg(short, long)]
    name: Option<String>,
}

impl RegisterCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        println!("Entreno - Registro");
        println!();

        let full_name = match self.name {
            Some(name) => name,
            None => Input::new().with_prompt("Nombre completo").interact_text()?,
        };
        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };
        let password = Password::new()
            .with_prompt("Clave")
            .with_confirmation("Repite la clave", "Las claves no coinciden")
            .interact()?;

        let bar = spinner("Creando cuenta...");
        let result = ctx
            .session
            .sign_up(email.trim(), &password, json!({ "full_name": full_name.trim() }))
            .await;
        bar.finish_and_clear();

        match result {
            Ok(SignUpOutcome::Session(session)) => {
                success("¡Registro exitoso!");
                println!("Sesión iniciada como {}", session.user.display_name());
                Ok(())
            }
            Ok(SignUpOutcome::PendingConfirmation(_)) => {
                success("¡Registro exitoso!");
                println!("Revisa tu correo para confirmar tu cuenta.");
                println!("Después ejecuta: entreno login");
                Ok(())
            }
            Ok(SignUpOutcome::NoUser) => {
                failure(NO_USER);
                bail!(NO_USER)
            }
            Err(e) => {
                let reason = AuthFailure::from_error(&e);
                failure(reason.message());
                Err(anyhow::anyhow!(reason))
            }
        }
    }
}
