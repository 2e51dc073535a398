use thiserror::Error;

#[derive(Debug, Error)]
pub enum YarikuriError {
    #[error("Invalid value: {0}")]
    Parse(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Ledger file error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Deserialization error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Prompt error: {0}")]
    Prompt(#[from] inquire::InquireError),
}
