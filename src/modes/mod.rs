pub mod headless;
pub mod watch;

pub use headless::{HeadlessConfig, HeadlessRun, RunOutcome, RunSummary};
pub use watch::WatchMode;
