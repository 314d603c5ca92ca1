pub mod config;
pub mod error;
pub mod features;
pub mod na;
pub mod temporal;

// Re-export commonly used types
pub use config::{ExpandingTrendConfig, ExpandingTrendConfigBuilder};
pub use error::{Error, PandRSError, Result};
pub use features::{ExpandingTrend, TimeUnit, TrendEstimator};
pub use na::NA;
pub use temporal::{Temporal, TimeSeries};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
