//! Per-platform configuration directories.
//!
//! | Platform    | User                                      | System                          |
//! |-------------|-------------------------------------------|---------------------------------|
//! | Linux, BSD  | `$XDG_CONFIG_HOME` or `$HOME/.config`     | first of `$XDG_CONFIG_DIRS`, or `/etc` |
//! | macOS       | `$HOME/Library/Application Support`       | `/Library/Application Support`  |
//! | Windows     | `%APPDATA%`                               | `%PROGRAMDATA%`                 |
//!
//! ```rust
//! let dirs = quill::dirs::config_dirs("quill");
//! for dir in &dirs {
//!     assert!(dir.ends_with("quill"));
//! }
//! ```

use std::path::PathBuf;

/// The per-user configuration directory.
pub fn user_config_dir() -> Option<PathBuf> {
    ::dirs::config_dir()
}

/// The system-wide configuration directory.
pub fn system_config_dir() -> Option<PathBuf> {
    system_dir()
}

/// Directories to search for `app`'s configuration, most specific first.
pub fn config_dirs(app: &str) -> Vec<PathBuf> {
    user_config_dir()
        .into_iter()
        .chain(system_config_dir())
        .map(|dir| dir.join(app))
        .collect()
}

#[cfg(target_os = "macos")]
fn system_dir() -> Option<PathBuf> {
    Some(PathBuf::from("/Library/Application Support"))
}

#[cfg(windows)]
fn system_dir() -> Option<PathBuf> {
    std::env::var_os("PROGRAMDATA")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(all(unix, not(target_os = "macos")))]
fn system_dir() -> Option<PathBuf> {
    let first = std::env::var_os("XDG_CONFIG_DIRS").and_then(|dirs| {
        std::env::split_paths(&dirs).find(|p| p.is_absolute())
    });
    match first {
        Some(dir) => Some(dir),
        None => {
            tracing::debug!("XDG_CONFIG_DIRS unset or empty, using /etc");
            Some(PathBuf::from("/etc"))
        }
    }
}

#[cfg(not(any(unix, windows)))]
fn system_dir() -> Option<PathBuf> {
    None
}

#[cfg(all(test, unix, not(target_os = "macos")))]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn user_dir_prefers_xdg_config_home() {
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", tmp.path());
        assert_eq!(user_config_dir(), Some(tmp.path().to_path_buf()));
        std::env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    #[serial]
    fn user_dir_falls_back_to_home() {
        let home = std::env::var_os("HOME");
        std::env::remove_var("XDG_CONFIG_HOME");
        std::env::set_var("HOME", "/home/quill");
        assert_eq!(user_config_dir(), Some(PathBuf::from("/home/quill/.config")));
        match home {
            Some(h) => std::env::set_var("HOME", h),
            None => std::env::remove_var("HOME"),
        }
    }

    #[test]
    #[serial]
    fn system_dir_takes_first_xdg_entry() {
        std::env::set_var("XDG_CONFIG_DIRS", "/opt/quill/etc:/usr/local/etc");
        assert_eq!(system_config_dir(), Some(PathBuf::from("/opt/quill/etc")));
        std::env::remove_var("XDG_CONFIG_DIRS");
    }

    #[test]
    #[serial]
    fn system_dir_defaults_to_etc() {
        std::env::remove_var("XDG_CONFIG_DIRS");
        assert_eq!(system_config_dir(), Some(PathBuf::from("/etc")));
        std::env::set_var("XDG_CONFIG_DIRS", "");
        assert_eq!(system_config_dir(), Some(PathBuf::from("/etc")));
        std::env::remove_var("XDG_CONFIG_DIRS");
    }

    #[test]
    #[serial]
    fn config_dirs_join_app_name() {
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", tmp.path());
        std::env::remove_var("XDG_CONFIG_DIRS");
        assert_eq!(
            config_dirs("quill"),
            vec![tmp.path().join("quill"), PathBuf::from("/etc/quill")]
        );
        std::env::remove_var("XDG_CONFIG_HOME");
    }
}
