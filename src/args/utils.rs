//! Shared utilities for argument processing.

use crate::config::Settings;

use super::Args;

/// What: Determine the log level based on command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `--log-level`.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Apply command-line overrides on top of file settings.
///
/// Details:
/// - `--incognito` only ever turns incognito on.
pub fn apply_overrides(args: &Args, settings: &mut Settings) {
    if let Some(locale) = args.locale.as_deref().filter(|l| !l.trim().is_empty()) {
        locale.clone_into(&mut settings.locale);
    }
    if let Some(catalog) = &args.catalog {
        settings.catalog_path = Some(catalog.clone());
    }
    if args.incognito {
        settings.incognito = true;
    }
}
