use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A factor outside of 1..=9 reached code that only works on the times table.
    #[error("factor {0} is outside of 1..=9")]
    InvalidFactor(u32),

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("environment variable {name} has an invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("tutor request failed: {0}")]
    Tutor(#[from] chatgpt::err::Error),
}
