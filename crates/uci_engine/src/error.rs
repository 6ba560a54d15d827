use std::path::PathBuf;

use thiserror::Error;

/// A command line that could not be turned into a [`crate::Command`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("'{command}' is missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("invalid value '{value}' for {field}")]
    InvalidValue { field: String, value: String },
}

impl ProtocolError {
    pub(crate) fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        ProtocolError::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Why the channel did not act on a command. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("engine not initialized")]
    NotReady,

    #[error("engine terminated")]
    Terminated,

    #[error("request {0} was cancelled before it completed")]
    Cancelled(u64),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
