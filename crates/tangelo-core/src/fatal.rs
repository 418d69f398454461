//! Fatal errors
//!
//! A fatal error is bad enough to halt execution: a broken host library, a
//! malformed plugin manifest, a missing dependency. The core never retries
//! after reporting one.

use std::sync::Arc;
use tracing::error;

/// Receives fatal errors. Implementations must not return.
pub trait FatalHandler: Send + Sync {
    fn fatal(&self, module: Option<&str>, message: &str) -> !;
}

/// Panics with the formatted message. The default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicOnFatal;

impl FatalHandler for PanicOnFatal {
    fn fatal(&self, module: Option<&str>, message: &str) -> ! {
        let text = report_fatal(module, message);
        panic!("{}", text);
    }
}

/// Logs the message and exits the process
#[derive(Debug, Clone, Copy)]
pub struct ExitOnFatal {
    pub exit_code: i32,
}

impl Default for ExitOnFatal {
    fn default() -> Self {
        Self { exit_code: 70 }
    }
}

impl FatalHandler for ExitOnFatal {
    fn fatal(&self, module: Option<&str>, message: &str) -> ! {
        report_fatal(module, message);
        std::process::exit(self.exit_code)
    }
}

/// Emit the single `error!` event for a fatal error and return its text
fn report_fatal(module: Option<&str>, message: &str) -> String {
    let text = format_fatal(module, message);
    error!(fatal = true, "{}", text);
    text
}

/// `"[module] message"`, or just the message when there is no module
pub fn format_fatal(module: Option<&str>, message: &str) -> String {
    match module {
        Some(module) => format!("[{}] {}", module, message),
        None => message.to_string(),
    }
}

/// Stand-in for a dependency that failed to load. Using it is fatal.
#[derive(Clone)]
pub struct Unavailable {
    plugin: String,
    required: String,
    handler: Arc<dyn FatalHandler>,
}

impl Unavailable {
    pub fn new(
        plugin: impl Into<String>,
        required: &[&str],
        handler: Arc<dyn FatalHandler>,
    ) -> Self {
        Self {
            plugin: plugin.into(),
            required: join_requirements(required),
            handler,
        }
    }

    pub fn message(&self) -> String {
        format!(
            "JavaScript include error: {} requires {}",
            self.plugin, self.required
        )
    }

    /// Report the missing dependency through the fatal handler
    pub fn invoke(&self) -> ! {
        self.handler.fatal(None, &self.message())
    }
}

impl std::fmt::Debug for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unavailable")
            .field("plugin", &self.plugin)
            .field("required", &self.required)
            .finish()
    }
}

/// `a`, `a and b`, `a, b, and c`
pub fn join_requirements(required: &[&str]) -> String {
    match required {
        [] => String::new(),
        [one] => one.to_string(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fatal() {
        assert_eq!(format_fatal(Some("mod"), "broke"), "[mod] broke");
        assert_eq!(format_fatal(None, "broke"), "broke");
    }

    #[test]
    fn test_report_fatal_logs_once() {
        use std::io::{self, Write};
        use std::sync::Mutex;

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let text = tracing::subscriber::with_default(subscriber, || {
            report_fatal(Some("tangelo.test()"), "halt")
        });

        assert_eq!(text, "[tangelo.test()] halt");
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("[tangelo.test()] halt").count(), 1);
        assert!(output.contains("ERROR"));
    }

    #[test]
    fn test_join_requirements() {
        assert_eq!(join_requirements(&["jQuery"]), "jQuery");
        assert_eq!(join_requirements(&["jQuery", "d3"]), "jQuery and d3");
        assert_eq!(
            join_requirements(&["jQuery", "d3", "Google Maps API"]),
            "jQuery, d3, and Google Maps API"
        );
        assert_eq!(join_requirements(&[]), "");
    }

    #[test]
    fn test_unavailable_message() {
        let stub = Unavailable::new("geoplot", &["d3", "Google Maps API"], Arc::new(PanicOnFatal));
        assert_eq!(
            stub.message(),
            "JavaScript include error: geoplot requires d3 and Google Maps API"
        );
    }

    #[test]
    #[should_panic(expected = "JavaScript include error: geoplot requires d3")]
    fn test_unavailable_invoke_is_fatal() {
        let stub = Unavailable::new("geoplot", &["d3"], Arc::new(PanicOnFatal));
        stub.invoke();
    }

    #[test]
    #[should_panic(expected = "[tangelo.test()] halt")]
    fn test_panic_on_fatal() {
        PanicOnFatal.fatal(Some("tangelo.test()"), "halt");
    }
}
