use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

const APPLICATION_DIR_NAME: &str = "luleme";

/// Resolves the per-user data directory for the application. Only fails when the environment
/// doesn't describe a home directory at all.
pub fn application_default_path() -> Result<PathBuf> {
    let mut path = data_home()?;
    path.push(APPLICATION_DIR_NAME);
    Ok(path)
}

pub fn create_application_dir(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(_) => Ok(()),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(v) => Err(v).with_context(|| format!("Can't create application directory {path:?}")),
    }
}

fn data_home() -> Result<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            env::var("APPDATA")
                .map(PathBuf::from)
                .context("APPDATA should be present on Windows")
        } else if #[cfg(target_os = "macos")] {
            env::var("HOME")
                .map(|home| {
                    let mut path = PathBuf::from(home);
                    path.push("Library/Application Support");
                    path
                })
                .context("HOME should be present on macOS")
        } else {
            env::var("XDG_DATA_HOME")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .map(Ok)
                .unwrap_or_else(|| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/share");
                        path
                    })
                })
                .context("Couldn't find neither XDG_DATA_HOME nor HOME")
        }
    }
}
