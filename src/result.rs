use compact_str::CompactString;
use thiserror::Error;

use crate::{client::error::ClientError, domain::StatusParseError, notifier::NotifyError};

pub type Result<T> = std::result::Result<T, HomewatchError>;

/// Top-level error for the bot process.
///
/// Component errors convert in via `#[from]`; the poll loop matches on the
/// variant to decide whether a cycle failure is merely logged or also
/// reported to the chat.
#[derive(Debug, Error)]
pub enum HomewatchError {
    #[error("required environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("failure reading configuration file: {0}")]
    ConfigError(CompactString),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    StatusParse(#[from] StatusParseError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("{0}")]
    GeneralError(CompactString),
}
