use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the process-wide subscriber.
///
/// Does nothing unless `FX_LOG` (or `RUST_LOG`) is set, e.g.
/// `FX_LOG=fx_lexer=trace`. Set `FX_LOG_TREE=1` for indented span trees.
/// Output goes to stderr so `--json` stays machine-readable. Safe to call
/// more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Some(directives) = std::env::var("FX_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
        else {
            return;
        };
        let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
        let registry = tracing_subscriber::registry().with(filter);

        let installed = if std::env::var_os("FX_LOG_TREE").is_some() {
            registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
        if let Err(e) = installed {
            eprintln!("warning: tracing already initialized: {e}");
        }
    });
}
