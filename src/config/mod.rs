//! Configuration system
//!
//! Layering, lowest to highest precedence:
//! 1. Defaults embedded in the schema (`config_struct!`)
//! 2. `data/config.toml` (or `--config <path>`), when present
//! 3. Environment variables (`PORT`, `TZ`, `MAIL_*`, credentials)
//! 4. `--port` on the command line

#[macro_use]
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{load_config_from_path, CONFIG_FILE_PATH, ENV_KEYS};
