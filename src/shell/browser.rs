//! Open links in the user's browser through the platform opener.

use std::process::{Command, Stdio};

/// Only web links are handed to the opener.
pub fn is_openable(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")) && !url.chars().any(char::is_whitespace)
}

/// Attempt to open `url`.  Returns `false` if the URL was rejected or no
/// opener could be started.
pub fn open_link(url: &str) -> bool {
    if !is_openable(url) {
        tracing::warn!(url, "refusing to open non-web link");
        return false;
    }

    #[cfg(target_os = "macos")]
    {
        return spawn_opener("open", &[url]);
    }

    #[cfg(target_os = "windows")]
    {
        return spawn_opener("cmd", &["/C", "start", "", url]);
    }

    #[cfg(target_os = "linux")]
    {
        if spawn_opener("xdg-open", &[url]) {
            return true;
        }
        return spawn_opener("gio", &["open", url]);
    }

    #[allow(unreachable_code)]
    false
}

fn spawn_opener(cmd: &str, args: &[&str]) -> bool {
    // Detached: the browser outlives us and must not write into the TUI.
    match Command::new(cmd)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(mut child) => {
            tracing::info!(cmd, "opened link");
            std::thread::spawn(move || {
                let _ = child.wait();
            });
            true
        }
        Err(e) => {
            tracing::debug!(cmd, "opener unavailable: {e}");
            false
        }
    }
}
