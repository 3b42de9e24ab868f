use std::{io, path::PathBuf};
use thiserror::Error;

/**
Result type to simplify function signatures.

This is a custom result type that uses our custom `TableViewError` for the error type.

Functions can return `TableViewResult<T>` and then use `?` to automatically propagate errors.
*/
pub type TableViewResult<T> = Result<T, TableViewError>;

/**
Custom error type for Table View.

The only failure the application can observe at runtime is the initial dataset load,
so most variants describe the ways reading and decoding the JSON document can fail.

We use the `thiserror` crate to derive the `Error` trait and automatically
implement `Display` using the `#[error(...)]` attribute.
*/
#[derive(Error, Debug)]
pub enum TableViewError {
    // Wrapper for standard IO errors (missing file, permission denied, ...).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // The document is not valid JSON, or its rows are not JSON objects.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // Errors occurring when receiving data from asynchronous channels.
    #[error("Channel receive error: {0}")]
    ChannelReceive(String),

    // Indicates that the dataset file could not be found, storing the attempted path.
    #[error("File not found: {0:#?}")]
    FileNotFound(PathBuf),

    #[error("Invalid value for command-line argument '{arg_name}': {reason}")]
    InvalidArgument {
        arg_name: String, // Context about *which* argument failed
        reason: String,   // The specific error reason
    },
}
