//! Locations of everything emoji-palette keeps on disk.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Application directory name under the config base.
const APP_DIR: &str = "emoji-palette";

/// Value of `var` as a path, unless unset or blank.
fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|v| !v.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}

/// `dir` once it exists on disk.
fn created(dir: PathBuf) -> Option<PathBuf> {
    fs::create_dir_all(&dir).ok().map(|()| dir)
}

/// What: Directory holding settings, recents, logs and dictionaries.
///
/// Output:
/// - `$HOME/.config/emoji-palette` when it can be created.
/// - Else `$XDG_CONFIG_HOME/emoji-palette`.
/// - Else `./.config/emoji-palette` relative to the working directory.
pub fn config_dir() -> PathBuf {
    env_path("HOME")
        .and_then(|home| created(home.join(".config").join(APP_DIR)))
        .or_else(|| env_path("XDG_CONFIG_HOME").and_then(|base| created(base.join(APP_DIR))))
        .unwrap_or_else(|| {
            let dir = PathBuf::from(".config").join(APP_DIR);
            let _ = fs::create_dir_all(&dir);
            dir
        })
}

/// Logs directory under config (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = fs::create_dir_all(&dir);
    dir
}

/// Root of the dictionary cache under config; created on first install.
pub fn dicts_dir() -> PathBuf {
    config_dir().join("dicts")
}

/// Settings file path.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// Persisted recents path.
pub fn recents_path() -> PathBuf {
    config_dir().join("recent_emoji.json")
}

#[cfg(test)]
mod tests {
    /// Restore `var` to `value` (or remove it).
    fn restore(var: &str, value: Option<std::ffi::OsString>) {
        unsafe {
            match value {
                Some(v) => std::env::set_var(var, v),
                None => std::env::remove_var(var),
            }
        }
    }

    #[test]
    /// What: All paths live under `$HOME/.config/emoji-palette`.
    ///
    /// Details:
    /// - Swaps `HOME` for a temp directory under the config test mutex and restores it afterwards.
    fn paths_live_under_home_config() {
        let _guard = crate::config::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let orig_home = std::env::var_os("HOME");
        let base = tempfile::tempdir().expect("tempdir");
        unsafe { std::env::set_var("HOME", base.path()) };

        let cfg = super::config_dir();
        assert_eq!(cfg, base.path().join(".config").join("emoji-palette"));
        assert!(cfg.is_dir());
        assert!(super::logs_dir().ends_with("logs"));
        assert!(super::logs_dir().is_dir());
        assert_eq!(super::dicts_dir(), cfg.join("dicts"));
        assert_eq!(super::settings_path(), cfg.join("settings.conf"));
        assert_eq!(super::recents_path(), cfg.join("recent_emoji.json"));

        restore("HOME", orig_home);
    }

    #[test]
    /// What: Without `HOME` the directory lives under `XDG_CONFIG_HOME`.
    fn falls_back_to_xdg_config_home() {
        let _guard = crate::config::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let orig_home = std::env::var_os("HOME");
        let orig_xdg = std::env::var_os("XDG_CONFIG_HOME");
        let base = tempfile::tempdir().expect("tempdir");
        unsafe {
            std::env::set_var("HOME", " ");
            std::env::set_var("XDG_CONFIG_HOME", base.path());
        }

        let cfg = super::config_dir();
        assert_eq!(cfg, base.path().join("emoji-palette"));
        assert!(cfg.is_dir());

        restore("HOME", orig_home);
        restore("XDG_CONFIG_HOME", orig_xdg);
    }
}
