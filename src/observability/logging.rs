//! Structured logging.
//!
//! # Responsibilities
//! - Build the log subscriber once, as an explicit handle
//! - Choose verbosity (debug flag, `RUST_LOG`, or info)
//! - Render error cause chains on a single line
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Human-readable text format with full timestamps, written to stderr
//! - The handle is installed by the entry point only; tests scope it per thread

use std::error::Error;
use std::fmt;
use std::io::IsTerminal;

use tracing::dispatcher::{DefaultGuard, SetGlobalDefaultError};
use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// A fully built log pipeline that has not necessarily been installed yet.
#[derive(Clone)]
pub struct LogHandle {
    dispatch: Dispatch,
}

impl LogHandle {
    /// Log to stderr, with colours only when stderr is a terminal.
    pub fn new(debug: bool) -> Self {
        let ansi = std::io::stderr().is_terminal();
        Self::build(debug, std::io::stderr, ansi)
    }

    /// Log to an arbitrary writer without colours.
    pub fn with_writer<W>(debug: bool, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(debug, writer, false)
    }

    fn build<W>(debug: bool, writer: W, ansi: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::registry()
            .with(level_filter(debug))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi),
            );

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }

    /// Underlying dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Make this the process-wide subscriber. Call once, from `main`.
    pub fn install(self) -> Result<(), SetGlobalDefaultError> {
        tracing::dispatcher::set_global_default(self.dispatch)
    }

    /// Make this the subscriber for the current thread until the guard drops.
    pub fn scoped(&self) -> DefaultGuard {
        tracing::dispatcher::set_default(&self.dispatch)
    }
}

fn level_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Displays an error followed by every `source()` in its chain,
/// separated by `": "`.
pub struct ErrorChain<'a>(pub &'a (dyn Error + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }
}
