use clap::Args;

use crate::utils::{QUIET, is_quiet};

/// Output options shared by every subcommand.
#[derive(Clone, Args)]
pub struct LogOptions {
    /// Do not print status messages or logs
    #[arg(short, long, global = true)]
    pub quiet: bool,
    /// Coloring: auto, always, never
    #[arg(long, global = true)]
    pub color: Option<String>,
    /// Profiling granularity.
    /// Setting any value restricts logs to profiling information
    #[arg(long, global = true)]
    pub profiling: Option<usize>,
}

impl LogOptions {
    /// Set the global options based on the command line arguments.
    pub fn set_global(&self) {
        // only the first call wins; later calls keep the original setting
        let _ = QUIET.set(self.quiet);
        match self.color.as_deref() {
            Some("always") => console::set_colors_enabled_stderr(true),
            Some("never") => console::set_colors_enabled_stderr(false),
            _ => {}
        }
    }

    /// Try set up the logger based on the verbosity level
    pub fn try_setup_logger(&self) {
        use tracing_forest::ForestLayer;
        use tracing_subscriber::{
            EnvFilter, Registry,
            filter::{LevelFilter, filter_fn},
            fmt,
            layer::SubscriberExt,
            util::SubscriberInitExt,
        };

        if is_quiet() {
            return;
        }

        // default filter
        let default_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        // spans with level i contain the field "profiling_{i}"
        // this restricts statistics to first (args.profiling) levels
        let profiling_level = self.profiling.unwrap_or(1);
        let filter_by_profiling_level = filter_fn(move |metadata| {
            (1..=profiling_level)
                .map(|i| format!("profiling_{i}"))
                .any(|field| metadata.fields().field(&field).is_some())
        });

        let fmt_layer = fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_thread_ids(false)
            .with_thread_names(false)
            .without_time();

        Registry::default()
            .with(self.profiling.is_some().then_some(ForestLayer::default()))
            .with(fmt_layer)
            .with(
                self.profiling
                    .is_some()
                    .then_some(filter_by_profiling_level),
            )
            .with(self.profiling.is_none().then_some(default_filter))
            .try_init()
            .ok();
    }
}
