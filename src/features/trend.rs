//! 経過時間に対する値の最小二乗トレンド

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::na::NA;
use crate::temporal::{Temporal, WindowAggregation, WindowView};

/// トレンドを計算するのに必要な有効値の最小数
pub const MIN_TREND_POINTS: usize = 3;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// 経過時間の単位（傾きの分母）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// 最初の有効なタイムスタンプから単位を決める
    #[default]
    Auto,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// `Auto` をウィンドウ最初の有効なタイムスタンプから解決
    ///
    /// UNIX秒を割り切れる最も粗い単位を選びます。
    /// 0時ちょうどなら日単位、分の境界なら分単位になります。
    pub fn resolve(self, anchor_unix_seconds: i64) -> TimeUnit {
        match self {
            TimeUnit::Auto => {
                if anchor_unix_seconds.rem_euclid(SECONDS_PER_DAY) == 0 {
                    TimeUnit::Days
                } else if anchor_unix_seconds.rem_euclid(SECONDS_PER_HOUR) == 0 {
                    TimeUnit::Hours
                } else if anchor_unix_seconds.rem_euclid(SECONDS_PER_MINUTE) == 0 {
                    TimeUnit::Minutes
                } else {
                    TimeUnit::Seconds
                }
            }
            fixed => fixed,
        }
    }

    /// 1単位あたりの秒数。`Auto` は秒として扱うので先に解決しておくこと
    pub fn seconds(self) -> f64 {
        match self {
            TimeUnit::Auto | TimeUnit::Seconds => 1.0,
            TimeUnit::Minutes => SECONDS_PER_MINUTE as f64,
            TimeUnit::Hours => SECONDS_PER_HOUR as f64,
            TimeUnit::Days => SECONDS_PER_DAY as f64,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Auto => "auto",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        write!(f, "{}", name)
    }
}

/// `x` に対する `y` の最小二乗法による傾き
///
/// 2点未満、`x` の分散が0、または結果が有限でない場合は `NA` を返します。
pub fn ols_slope(x: &[f64], y: &[f64]) -> NA<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return NA::NA;
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (xi, yi) in x[..n].iter().zip(&y[..n]) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }

    if sxx == 0.0 {
        return NA::NA;
    }
    NA::Value(sxy / sxx).finite()
}

/// `timestamps`/`values` の有効な観測値のトレンド
///
/// 欠損値を除いたうえで、最初の有効なタイムスタンプからの経過時間を `unit` で測ります。
/// `Auto` の場合はそのタイムスタンプから単位を決めます。
pub fn calculate_trend<T: Temporal>(timestamps: &[T], values: &[NA<f64>], unit: TimeUnit) -> NA<f64> {
    let pairs: Vec<(&T, f64)> = timestamps
        .iter()
        .zip(values)
        .filter_map(|(ts, v)| v.value().map(|val| (ts, *val)))
        .collect();

    if pairs.len() < MIN_TREND_POINTS {
        return NA::NA;
    }

    let origin = pairs[0].0;
    let unit_seconds = unit.resolve(origin.unix_seconds()).seconds();

    let x: Vec<f64> = pairs
        .iter()
        .map(|(ts, _)| ts.seconds_since(origin) / unit_seconds)
        .collect();
    let y: Vec<f64> = pairs.iter().map(|(_, v)| *v).collect();

    ols_slope(&x, &y)
}

/// 各ウィンドウのトレンドを計算する集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendEstimator {
    time_unit: TimeUnit,
}

impl TrendEstimator {
    pub fn new(time_unit: TimeUnit) -> Self {
        TrendEstimator { time_unit }
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }
}

impl<T: Temporal> WindowAggregation<T> for TrendEstimator {
    fn aggregate(&self, window: &WindowView<'_, T>) -> NA<f64> {
        calculate_trend(window.timestamps(), window.values(), self.time_unit)
    }
}
