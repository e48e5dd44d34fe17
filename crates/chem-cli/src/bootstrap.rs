use anyhow::Context;
use chem_config::LabConfig;

/// Load `.env` from the working directory (if any), then the layered
/// configuration.
pub fn load_config() -> anyhow::Result<LabConfig> {
    env_file_loaded(dotenvy::dotenv().map(drop))?;
    LabConfig::load().context("failed to load configuration")
}

/// A missing `.env` is fine; an unreadable or malformed one is not.
fn env_file_loaded(loaded: Result<(), dotenvy::Error>) -> anyhow::Result<()> {
    match loaded {
        Err(error) if !error.not_found() => Err(error).context("failed to load .env file"),
        _ => Ok(()),
    }
}
