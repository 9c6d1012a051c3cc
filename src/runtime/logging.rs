use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::config::Settings;

/// Install the `log` backend. Records go to the log file because the
/// terminal belongs to the UI; without a usable file nothing is logged.
pub fn init_logging(settings: &Settings) {
    let Some(path) = settings.log_file() else {
        return;
    };

    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("cadenza: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let mut builder =
        Builder::from_env(Env::default().default_filter_or(settings.logging.level.as_str()));
    builder.target(Target::Pipe(Box::new(file)));
    if builder.try_init().is_ok() {
        log::info!("logging to {}", path.display());
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
