//! 時系列データから特徴量を生成するモジュール

mod expanding_trend;
pub mod trend;

pub use self::expanding_trend::ExpandingTrend;
pub use self::trend::{calculate_trend, ols_slope, TimeUnit, TrendEstimator, MIN_TREND_POINTS};
