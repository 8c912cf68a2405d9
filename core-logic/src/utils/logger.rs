use chrono::Local;
use nu_ansi_term::{Color, Style};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Targets,
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields, FormattedFields},
    prelude::*,
    registry::LookupSpan,
    Layer,
};

/// Installs console + hourly file logging. `app` names both the log file
/// prefix and the crate target that is shown at INFO.
pub fn setup_logger(app: &str) -> Option<WorkerGuard> {
    std::fs::create_dir_all("logs").ok();

    let file_appender = tracing_appender::rolling::hourly("logs", app);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(FileFormatter)
        .with_filter(workspace_targets(app));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(TerminalFormatter)
        .with_filter(workspace_targets(app));

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    // Already-installed subscriber means the guard would flush nowhere.
    installed.ok().map(|_| guard)
}

/// Our crates at INFO, dependencies (ethers, hyper, ...) only at WARN.
fn workspace_targets(app: &str) -> Targets {
    Targets::new()
        .with_target(app.replace('-', "_"), Level::INFO)
        .with_target("core_logic", Level::INFO)
        .with_default(Level::WARN)
}

// --- Formatters ---

struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Writes `[n=3] ` for each entered span that has fields, outermost first.
fn write_span_fields<S, N>(ctx: &FmtContext<'_, S, N>, writer: &mut Writer<'_>) -> fmt::Result
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    if let Some(scope) = ctx.event_scope() {
        for span in scope.from_root() {
            let extensions = span.extensions();
            if let Some(fields) = extensions.get::<FormattedFields<N>>() {
                if !fields.is_empty() {
                    write!(writer, "[{}] ", fields)?;
                }
            }
        }
    }
    Ok(())
}

fn event_message(event: &Event<'_>) -> String {
    let mut visitor = MessageVisitor {
        message: String::new(),
    };
    event.record(&mut visitor);
    visitor.message
}

pub struct TerminalFormatter;

impl<S, N> FormatEvent<S, N> for TerminalFormatter
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
        let msg = event_message(event);

        let colored_msg = if msg.contains("Success") {
            let green_text = Style::new().fg(Color::LightGreen).bold();
            msg.replace("Success", &format!("{}", green_text.paint("Success")))
        } else if msg.contains("Failed") {
            let red_text = Style::new().fg(Color::LightRed).bold();
            msg.replace("Failed", &format!("{}", red_text.paint("Failed")))
        } else {
            msg
        };

        match *event.metadata().level() {
            Level::ERROR => write!(writer, "{} ", Color::Red.paint("ERROR"))?,
            Level::WARN => write!(writer, "{} ", Color::Yellow.paint("WARN"))?,
            _ => {}
        }
        write_span_fields(ctx, &mut writer)?;

        writeln!(writer, "{}", colored_msg)
    }
}

pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
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
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let level = event.metadata().level();

        write!(writer, "{} [{}] ", timestamp, level)?;
        write_span_fields(ctx, &mut writer)?;
        writeln!(writer, "{}", event_message(event))
    }
}
