//! Settings: scan root and extensions, favorites file, UI and logging.
//!
//! `Settings::load` layers an optional TOML file under `CADENZA__*`
//! environment variables; every section falls back to its defaults.

mod load;
mod schema;

pub use schema::*;
