// docbrowser platform paths
// Config and data directories per OS, chosen at compile time.
//
// Linux:   $XDG_CONFIG_HOME/docbrowser, $XDG_DATA_HOME/docbrowser
//          (falling back to ~/.config and ~/.local/share)
// macOS:   ~/Library/Application Support/DocBrowser for both
// Windows: %APPDATA%\DocBrowser for both

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

#[cfg(target_os = "windows")]
fn app_data_dir() -> PathBuf {
    env::var("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("C:\\ProgramData"))
        .join("DocBrowser")
}

/// Directory holding `settings.json`.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        app_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        home_dir()
            .join("Library")
            .join("Application Support")
            .join("DocBrowser")
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("docbrowser"),
            Err(_) => home_dir().join(".config").join("docbrowser"),
        }
    }
}

/// Directory holding the local store database.
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        app_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        get_config_dir()
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_DATA_HOME") {
            Ok(xdg) => PathBuf::from(xdg).join("docbrowser"),
            Err(_) => home_dir().join(".local").join("share").join("docbrowser"),
        }
    }
}
