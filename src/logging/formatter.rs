use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Formatter that wraps each field in brackets
///
/// Format: `[TIMESTAMP]  [LEVEL] [SCOPE] [TARGET: FILE:LINE]: MESSAGE`.
/// The console drops the `[TARGET: FILE:LINE]` part so progress output stays readable.
#[derive(Debug, Clone, Copy)]
pub struct BracketedFormatter {
    with_location: bool,
}

impl BracketedFormatter {
    /// Full format, used for the log file
    pub fn detailed() -> Self {
        Self { with_location: true }
    }

    /// Without target and source location, used for stdout
    pub fn compact() -> Self {
        Self {
            with_location: false,
        }
    }
}

impl<S, N> FormatEvent<S, N> for BracketedFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let now = chrono::Local::now();
        write!(writer, "[{}]  ", now.format("%Y-%m-%dT%H:%M:%S%.3f"))?;
        write!(writer, "[{:5}] ", metadata.level())?;

        // Innermost span if any, otherwise the last segment of the module path
        let scope = match ctx.event_scope() {
            Some(scope) => scope.from_root().last().map(|span| span.name()),
            None => metadata.target().rsplit("::").next(),
        };
        write!(writer, "[{}] ", scope.unwrap_or("unknown"))?;

        if self.with_location {
            match (metadata.file(), metadata.line()) {
                (Some(file), Some(line)) => {
                    write!(writer, "[{}: {}:{}]: ", metadata.target(), file, line)?
                }
                _ => write!(writer, "[{}]: ", metadata.target())?,
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(formatter: BracketedFormatter, emit: impl FnOnce()) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(formatter)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_detailed_format_has_location() {
        let line = capture(BracketedFormatter::detailed(), || {
            tracing::warn!("source missing");
        });
        assert!(line.contains("[WARN ] [tests] "));
        assert!(line.contains("formatter.rs:"));
        assert!(line.trim_end().ends_with("]: source missing"));
    }

    #[test]
    fn test_compact_format_uses_span_name() {
        let line = capture(BracketedFormatter::compact(), || {
            let span = tracing::info_span!("materialize");
            let _guard = span.enter();
            tracing::info!("copying");
        });
        assert!(line.contains("[INFO ] [materialize] copying"));
        assert!(!line.contains("formatter.rs"));
    }
}
