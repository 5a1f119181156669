use particle_morph::MorphError;
use thiserror::Error;

use crate::config::ConfigError;

/// Anything that stops the application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Morph(#[from] MorphError),
}

pub type AppResult<T> = Result<T, AppError>;
