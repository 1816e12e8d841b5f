//! Logging setup
//!
//! Logs go to stderr through `tracing-subscriber` so stdout carries nothing
//! but program output. `RUST_LOG` takes precedence over the `-v` count.

use tracing_subscriber::EnvFilter;

/// Log targets raised by `-v`: the two libraries (by the shared `recursa`
/// prefix) and the binary crates, whose targets are their own names
const TARGETS: [&str; 3] = ["recursa", "fibonacci", "power"];

/// Filter directives for a `-v` count: warn, then info, then debug
pub fn directive_for(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the filter: `RUST_LOG` if set and valid, otherwise [`directive_for`]
pub fn filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)))
}

/// Install the global stderr subscriber. Later calls keep the first one.
pub fn init(verbosity: u8) {
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Emit one info and one debug event per target, return what got through
    fn captured(verbosity: u8) -> String {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(directive_for(verbosity)))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "power", "power startup");
            tracing::info!(target: "fibonacci", "fibonacci startup");
            tracing::info!(target: "recursa_cli::drivers", "driver info");
            tracing::debug!(target: "power", "power detail");
            tracing::info!(target: "unrelated", "other crate");
        });
        let bytes = capture.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_directive_for() {
        assert_eq!(
            directive_for(0),
            "recursa=warn,fibonacci=warn,power=warn"
        );
        assert_eq!(
            directive_for(1),
            "recursa=info,fibonacci=info,power=info"
        );
        assert_eq!(directive_for(9), directive_for(2));
    }

    #[test]
    fn test_quiet_by_default() {
        assert_eq!(captured(0), "");
    }

    #[test]
    fn test_verbose_enables_binary_targets() {
        let logs = captured(1);
        assert!(logs.contains("power startup"));
        assert!(logs.contains("fibonacci startup"));
        assert!(logs.contains("driver info"));
        assert!(!logs.contains("power detail"));
        assert!(!logs.contains("other crate"));
    }

    #[test]
    fn test_very_verbose_enables_debug() {
        assert!(captured(2).contains("power detail"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(0);
        init(2);
    }
}
