pub mod build_info;
pub mod system_clock;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default directive applied on top of `RUST_LOG`.
pub const DEFAULT_LOG_DIRECTIVE: &str = "scan_feed=info";

/// Initializes the global tracing subscriber, writing to stderr.
///
/// `directive` is added to whatever `RUST_LOG` specifies; an unparsable
/// directive falls back to [`DEFAULT_LOG_DIRECTIVE`].
pub fn init_tracing(directive: &str) {
    TRACING_INIT.call_once(|| {
        let parsed: Result<Directive, _> = directive
            .parse()
            .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse());
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = parsed {
            filter = filter.add_directive(directive);
        }

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
