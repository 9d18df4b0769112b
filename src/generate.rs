//! Site config generator
//!
//! Turns `SUPABASE_URL` / `SUPABASE_ANON_KEY` from the build environment
//! into the Rust module the browser crate compiles in.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{SiteConfig, ANON_KEY_VAR, URL_VAR};

/// Where the browser crate expects its site config
pub const DEFAULT_OUTPUT: &str = "chaos-feed-ui/src/site_config.rs";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Missing SUPABASE_URL or SUPABASE_ANON_KEY in environment variables.")]
    MissingEnv,

    #[error("Failed to write {path:?}: {error}")]
    Write {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

/// Read both values from the process environment
pub fn site_from_env() -> Result<SiteConfig, GenerateError> {
    site_from_lookup(|name| std::env::var(name).ok())
}

/// Read both values through `lookup`; unset or empty values are rejected
pub fn site_from_lookup<F>(lookup: F) -> Result<SiteConfig, GenerateError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup(URL_VAR).filter(|v| !v.is_empty());
    let key = lookup(ANON_KEY_VAR).filter(|v| !v.is_empty());
    match (url, key) {
        (Some(url), Some(key)) => Ok(SiteConfig::new(url, key)),
        _ => Err(GenerateError::MissingEnv),
    }
}

/// Source text of the generated module
pub fn render_config_module(site: &SiteConfig) -> String {
    format!(
        "// Generated by `chaos-feed generate-config`. Do not edit.\n\
         \n\
         pub const SUPABASE_URL: &str = {:?};\n\
         pub const SUPABASE_ANON_KEY: &str = {:?};\n",
        site.supabase_url, site.supabase_anon_key
    )
}

/// Write the module, creating parent directories as needed
pub fn write_config_module(path: &Path, site: &SiteConfig) -> Result<(), GenerateError> {
    let write_err = |error| GenerateError::Write {
        path: path.to_path_buf(),
        error,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, render_config_module(site)).map_err(write_err)?;

    tracing::info!("Wrote site config to {:?}", path);
    Ok(())
}
