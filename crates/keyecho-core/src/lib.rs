//! keyecho core crate - shared types, configuration and errors for spoken
//! feedback on text-field edits.

pub mod config;
pub mod error;
pub mod types;

pub use config::{EchoConfig, GeneralConfig, KeyechoConfig, MessageConfig};
pub use error::{KeyechoError, Result};
pub use types::*;
