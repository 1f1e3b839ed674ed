//! User configuration: paths under the config directory and `settings.conf`.

mod paths;
mod settings;

pub use paths::{config_dir, dicts_dir, logs_dir, recents_path, settings_path};
pub use settings::{
    SKELETON_SETTINGS_CONTENT, Settings, load_settings_from, parse_settings, settings,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a global mutex to serialize tests that touch `HOME` or shared config files.
///
/// Output:
/// - Static reference to a lazily initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
