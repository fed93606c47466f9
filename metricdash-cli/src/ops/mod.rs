mod output;
mod raw;
mod snapshot;
mod ui;
mod watch;

pub use output::OutputFormat;
pub use raw::raw_metrics;
pub use snapshot::snapshot;
pub use watch::watch;
