//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, so paths
//! from user configuration need translating before the plugin can open them.

use std::path::PathBuf;

/// Returns the data directory for FoodQuest files.
///
/// Resolves to `/host/.local/share/zellij/foodquest`. `/host` points to the
/// cwd of the last focused terminal (usually the home directory), so on the
/// host this is typically `~/.local/share/zellij/foodquest`. The recent-search
/// list and the trace file live here.
///
/// # Examples
///
/// ```
/// use foodquest::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/foodquest"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("foodquest")
}

/// Expands a leading `~` to the sandbox's `/host` mount.
///
/// Used for the `theme_file` option so users can write `~/themes/x.toml`.
///
/// # Examples
///
/// ```
/// use foodquest::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
