use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

// sqlx logs every statement at info
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz players",
        &["category"]
    )
    .expect("quiz counter registers once");
}

/// Installs the global subscriber.
///
/// `LOG_LEVEL` holds `EnvFilter` directives, `INCLUDE_SPAN_EVENTS=true` also logs
/// handler spans being entered and left.
pub fn init_tracing() {
    let directives = std::env::var("LOG_LEVEL").ok();
    let span_events = std::env::var("INCLUDE_SPAN_EVENTS").ok();

    tracing_subscriber::registry()
        .with(log_filter(directives.as_deref()))
        .with(fmt::layer().with_span_events(span_events_for(span_events.as_deref())))
        .init();
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| match EnvFilter::try_new(value) {
            Ok(filter) => Some(filter),
            Err(err) => {
                eprintln!("Ignoring LOG_LEVEL={value:?}: {err}");
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn span_events_for(flag: Option<&str>) -> FmtSpan {
    match flag {
        Some(value) if value.eq_ignore_ascii_case("true") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::NONE,
    }
}
