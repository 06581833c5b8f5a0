// src/guard.rs

//! Dev-mode gate.
//!
//! The watch workflow needs an upstream URL to proxy; without one there is
//! nothing to serve and nothing to reload. The guard turns that missing
//! piece of configuration into a clear instruction for the user rather than
//! an error with a backtrace.

use crate::config::model::DevSection;

/// Marker for "no dev URL configured". Deliberately not an error type: the
/// caller prints the instruction and halts, nothing catches this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevUrlMissing;

/// Check that a dev URL is configured.
///
/// Unset or blank both count as missing. With a URL present this is a
/// no-op that hands the value back.
pub fn require_dev_url(dev: &DevSection) -> Result<&str, DevUrlMissing> {
    match dev.url.as_deref() {
        Some(url) if !url.trim().is_empty() => Ok(url),
        _ => Err(DevUrlMissing),
    }
}

/// Clear the terminal and print the one thing the user has to do next.
pub fn print_dev_url_help() {
    // ANSI clear-screen so the instruction is all that's visible.
    print!("\x1B[2J\x1B[1;1H");
    println!("Set `url` under [dev] in Plugsync.toml before starting the watcher.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_is_rejected() {
        let dev = DevSection { url: None, port: 1234 };
        assert_eq!(require_dev_url(&dev), Err(DevUrlMissing));
    }

    #[test]
    fn blank_url_counts_as_missing() {
        let dev = DevSection {
            url: Some("   ".to_string()),
            port: 1234,
        };
        assert_eq!(require_dev_url(&dev), Err(DevUrlMissing));
    }

    #[test]
    fn present_url_is_a_noop() {
        let dev = DevSection {
            url: Some("http://plugin.test".to_string()),
            port: 1234,
        };
        assert_eq!(require_dev_url(&dev), Ok("http://plugin.test"));
    }
}
