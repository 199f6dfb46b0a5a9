//! Log formatter that stamps every line with the wall clock and the simulation tick

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Simulation tick of the most recently advanced session, shared with the formatter.
static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

/// Formats `HH:MM:SS.ssss #tick LEVEL span{..}: target: fields`.
pub struct TickFormatter;

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|e| {
            eprintln!("Failed to format timestamp: {}", e);
            fmt::Error
        })?;
        write_styled(&mut writer, ansi, DIM, format_args!("{timestamp} #{:06}", get_tick_count()))?;
        writer.write_char(' ')?;

        write_level(&mut writer, ansi, meta.level())?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write_styled(&mut writer, ansi, BOLD, span.metadata().name())?;
                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>().filter(|f| !f.is_empty()) {
                    write!(writer, "{{{}}}", fields)?;
                }
                write_styled(&mut writer, ansi, DIM, ':')?;
            }
            writer.write_char(' ')?;
        }

        // Module paths inside this crate are shown relative to it.
        let target = meta.target();
        let target = target.strip_prefix("pollo::").unwrap_or(target);
        write_styled(&mut writer, ansi, DIM, format_args!("{target}:"))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";

fn write_styled(writer: &mut Writer<'_>, ansi: bool, style: &str, s: impl fmt::Display) -> fmt::Result {
    if ansi {
        write!(writer, "{style}{s}\x1b[0m")
    } else {
        write!(writer, "{s}")
    }
}

fn write_level(writer: &mut Writer<'_>, ansi: bool, level: &Level) -> fmt::Result {
    let (color, text) = match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", "INFO"),
        Level::WARN => ("\x1b[33m", "WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    };
    write_styled(writer, ansi, color, format_args!("{text:>5}"))
}

/// Advance the tick shown in log lines. Called once per simulation tick.
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

/// Restart the displayed tick, e.g. when a level is reset.
pub fn reset_tick() {
    TICK_COUNTER.store(0, Ordering::Relaxed);
}

pub fn get_tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
