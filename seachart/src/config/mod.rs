//! User configuration stored in `~/.seachart/config.ini`.
//!
//! Values are overlaid onto defaults, so a partial file is valid. The parsed
//! [`ConfigFile`] converts into the runtime configs consumed by the engine.
//!
//! # Example
//!
//! ```ignore
//! use seachart::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let coordinator_config = config.coordinator_config();
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    AnnotationSettings, BoundarySettings, ConfigFile, FollowSettings, LoggingSettings,
    TilesSettings,
};
