use anyhow::{bail, Result};
use clap::Args;
use dialoguer::{Input, Password};

use super::{failure, spinner, success};
use crate::context::AppContext;
use crate::session::parse_recovery_link;

const RESET_FAILED: &str = "Error al enviar el correo de recuperación.";
const NO_RECOVERY_SESSION: &str = "No se detectó una sesión de recuperación válida. Abre el enlace del correo con --link o solicita uno nuevo.";

#[derive(Args, Default)]
pub struct ForgotPasswordCommand {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    email: Option<String>,

    /// Where the recovery link should lead
    #[arg(long)]
    redirect_to: Option<String>,
}

impl ForgotPasswordCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        let email = match self.email {
            Some(email) => email,
            None => Input::new().with_prompt("Email").interact_text()?,
        };

        let bar = spinner("Enviando correo de recuperación...");
        let result = ctx
            .session
            .reset_password(email.trim(), self.redirect_to.as_deref())
            .await;
        bar.finish_and_clear();

        match result {
            Ok(()) => {
                success(&format!("Correo de recuperación enviado a {}", email.trim()));
                println!("Abre el enlace con: entreno update-password --link '<url>'");
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    RESET_FAILED.to_string()
                } else {
                    message
                };
                failure(&message);
                bail!(message)
            }
        }
    }
}

#[derive(Args, Default)]
pub struct UpdatePasswordCommand {
    /// Recovery link from the email; without it the current session is used
    #[arg(long)]
    link: Option<String>,
}

impl UpdatePasswordCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        if let Some(link) = &self.link {
            let Some(tokens) = parse_recovery_link(link) else {
                failure(NO_RECOVERY_SESSION);
                bail!(NO_RECOVERY_SESSION)
            };
            ctx.session.recover(&tokens).await?;
        }

        if ctx.session.user().is_none() {
            failure(NO_RECOVERY_SESSION);
            bail!(NO_RECOVERY_SESSION)
        }

        let password = Password::new()
            .with_prompt("Nueva clave")
            .with_confirmation("Repite la clave", "Las claves no coinciden")
            .interact()?;

        let bar = spinner("Actualizando contraseña...");
        let result = ctx.session.update_password(&password).await;
        bar.finish_and_clear();

        match result {
            Ok(()) => {
                success("✅ Contraseña actualizada correctamente. Redirigiendo...");
                println!("Siguiente: entreno dashboard");
                Ok(())
            }
            Err(e) => {
                failure(&e.to_string());
                Err(e.into())
            }
        }
    }
}
