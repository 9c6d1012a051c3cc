//! Application module: the `App` context and the commands it accepts.
//!
//! `App` lives in `app::model` and owns the library, playback controller,
//! favorites store, selection and status line.

mod command;
mod model;

pub use command::*;
pub use model::*;

#[cfg(test)]
mod tests;
