//! Errors returned while reading, ranking or writing reads.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TopqError>;

#[derive(Error, Debug)]
pub enum TopqError {
    /// Input could not be read or output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input does not follow the four-line FASTQ layout.
    #[error("Malformed FASTQ input: {0}")]
    MalformedInput(String),

    #[error("Invalid quality character '{found}' (below Phred offset {offset})")]
    InvalidQuality { found: char, offset: u8 },

    /// Missing or unparsable parameter.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not parse config file: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("Invalid command line: {0}")]
    Cli(#[from] clap::Error),

    #[error("Could not start logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
