//! Codescout Core - Result envelope, error taxonomy, settings, path sandbox

pub mod envelope;
pub mod error;
pub mod path;
pub mod settings;

pub use envelope::Envelope;
pub use error::{Error, Result};
pub use path::safe_join;
pub use settings::Settings;
