use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaveletError {
    #[error("Invalid pyramid height: {height} (must be between 0 and {max})")]
    InvalidHeight { height: u32, max: u32 },

    #[error("{what} out of range: {value} (limit {limit})")]
    OutOfRange {
        what: &'static str,
        value: i64,
        limit: i64,
    },

    #[error("Invalid range: start position {start} is after end position {end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl WaveletError {
    pub(crate) fn out_of_range(what: &'static str, value: impl TryInto<i64>, limit: impl TryInto<i64>) -> Self {
        WaveletError::OutOfRange {
            what,
            value: value.try_into().unwrap_or(i64::MAX),
            limit: limit.try_into().unwrap_or(i64::MAX),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaveletError>;
