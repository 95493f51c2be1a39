use std::env;
use std::path::PathBuf;

use dirs_next::{data_local_dir, home_dir};

/// Environment variable overriding where the TUI writes its log file.
pub const LOG_PATH_ENV: &str = "MARQUEE_LOG_PATH";

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Log file used while the terminal UI owns stdout.
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }
    data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("marquee")
        .join("marquee.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_untouched() {
        assert_eq!(expand_tilde(" /tmp/marquee.log "), PathBuf::from("/tmp/marquee.log"));
    }

    #[test]
    fn log_path_honours_override() {
        temp_env::with_var(LOG_PATH_ENV, Some("/var/tmp/m.log"), || {
            assert_eq!(default_log_path(), PathBuf::from("/var/tmp/m.log"));
        });
    }
}
