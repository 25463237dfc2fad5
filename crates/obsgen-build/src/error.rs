use obsgen_config::ConfigError;
use thiserror::Error as ThisError;

///
/// Error
///
/// Fatal generation errors. Anything that only affects one type or one
/// member is skipped and logged instead.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("cannot find marker type `{0}` in the type universe")]
    MarkerNotFound(String),

    #[error(transparent)]
    Schema(#[from] obsgen_schema::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
