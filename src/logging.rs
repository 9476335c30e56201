use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Result;

pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyrush")
        .join("keyrush.log")
}

/// Install the logger, writing to `path` so the terminal UI stays clean.
/// Level comes from `RUST_LOG`, defaulting to info.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut builder = colog::default_builder();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(file)));
    builder.try_init()?;
    Ok(())
}
