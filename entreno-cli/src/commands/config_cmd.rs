use anyhow::Result;
use std::path::Path;

use crate::config::Config;

pub fn show_config(path: &Path) -> Result<()> {
    let mut config = Config::load_from(path)?;
    let signed_in = config.is_authenticated();
    mask(&mut config.auth.access_token);
    mask(&mut config.auth.refresh_token);
    mask(&mut config.backend.anon_key);

    let config_str = toml::to_string_pretty(&config)?;

    println!("Configuración actual ({})", path.display());
    println!("────────────────────────────────");
    println!();
    println!("{}", config_str);

    if signed_in {
        println!("Sesión: iniciada como {}", config.auth.email);
    } else {
        println!("Sesión: cerrada");
    }

    Ok(())
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("El archivo de configuración ya existe en: {}", path.display());
        println!("Usa --force para sobrescribirlo");
        return Ok(());
    }

    Config::default().save_to(path)?;

    println!("✓ Configuración creada en: {}", path.display());
    println!();
    println!("Define [backend] url y anon_key antes de ejecutar `entreno login`.");

    Ok(())
}

/// Keep a short prefix of a secret so it can still be recognised
fn mask(secret: &mut String) {
    if secret.is_empty() {
        return;
    }
    let prefix: String = secret.chars().take(6).collect();
    *secret = format!("{}…", prefix);
}
