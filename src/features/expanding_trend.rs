//! 拡大トレンド特徴量
//!
//! 各行について、`gap` 行前までのすべての観測値のトレンド
//! （経過時間に対する最小二乗法の傾き）を計算します。
//! 拡大特徴量は、その時点までに得られるすべてのデータを使って値を求めます。

use rayon::prelude::*;

use crate::config::ExpandingTrendConfig;
use crate::error::{Error, Result};
use crate::features::trend::{TimeUnit, TrendEstimator};
use crate::na::NA;
use crate::temporal::{expanding_aggregate, gap, is_monotonic, Temporal, TimeSeries};

/// ギャップ分ずらした系列に対する拡大トレンド
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use pandrs_trend::features::ExpandingTrend;
/// use pandrs_trend::temporal::{date_range_periods, Frequency};
/// use pandrs_trend::NA;
///
/// let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
/// let times = date_range_periods(start, 5, Frequency::Daily).unwrap();
/// let values: Vec<NA<f64>> = [5.0, 4.0, 3.0, 2.0, 1.0].iter().map(|v| NA::Value(*v)).collect();
///
/// let trend = ExpandingTrend::default().compute(&times, &values).unwrap();
/// assert_eq!(trend, vec![NA::NA, NA::NA, NA::NA, NA::Value(-1.0), NA::Value(-1.0)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExpandingTrend {
    config: ExpandingTrendConfig,
}

impl ExpandingTrend {
    /// 特徴量名
    pub const NAME: &'static str = "expanding_trend";

    /// 時間単位を自動選択する特徴量を作成
    pub fn new(gap: usize, min_periods: usize) -> Result<Self> {
        Self::from_config(ExpandingTrendConfig {
            gap,
            min_periods,
            time_unit: TimeUnit::Auto,
        })
    }

    /// 設定を検証して特徴量を作成
    pub fn from_config(config: ExpandingTrendConfig) -> Result<Self> {
        config.validate()?;
        Ok(ExpandingTrend { config })
    }

    /// 経過時間の単位を推定せずに固定する
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.config.time_unit = time_unit;
        self
    }

    pub fn gap(&self) -> usize {
        self.config.gap
    }

    pub fn min_periods(&self) -> usize {
        self.config.min_periods
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.config.time_unit
    }

    pub fn config(&self) -> &ExpandingTrendConfig {
        &self.config
    }

    /// 時刻列と数値列から特徴量を計算
    ///
    /// 出力は入力と同じ行数です。先頭の `gap` 行は常に欠損になります。
    /// 有効値が `min_periods` 未満のウィンドウ、またはトレンドに必要な点数に
    /// 満たないウィンドウも欠損になります。
    pub fn compute<T: Temporal>(&self, timestamps: &[T], values: &[NA<f64>]) -> Result<Vec<NA<f64>>> {
        if timestamps.len() != values.len() {
            return Err(Error::LengthMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }

        log::debug!(
            "{}: rows={}, gap={}, min_periods={}, time_unit={}",
            Self::NAME,
            values.len(),
            self.config.gap,
            self.config.min_periods,
            self.config.time_unit
        );

        if !is_monotonic(timestamps) {
            log::warn!(
                "{}: timestamps are not monotonically non-decreasing; elapsed times may be negative",
                Self::NAME
            );
        }

        let shifted = gap::shift(values, self.config.gap);
        let estimator = TrendEstimator::new(self.config.time_unit);
        let result = expanding_aggregate(timestamps, &shifted, self.config.min_periods, &estimator)?;

        log::debug!(
            "{}: {} of {} rows produced a value",
            Self::NAME,
            result.iter().filter(|v| v.is_value()).count(),
            result.len()
        );

        Ok(result)
    }

    /// [`compute`](Self::compute) と同じ。入力・出力とも NaN を欠損として扱う
    pub fn compute_f64<T: Temporal>(&self, timestamps: &[T], values: &[f64]) -> Result<Vec<f64>> {
        let values: Vec<NA<f64>> = values.iter().map(|v| NA::from_f64(*v)).collect();
        let result = self.compute(timestamps, &values)?;
        Ok(result.into_iter().map(|v| v.to_f64()).collect())
    }

    /// 時系列に対して特徴量を計算。タイムスタンプと名前は保持する
    pub fn transform<T: Temporal>(&self, series: &TimeSeries<T>) -> Result<TimeSeries<T>> {
        let result = self.compute(series.timestamps(), series.values())?;
        TimeSeries::new(result, series.timestamps().to_vec(), series.name().cloned())
    }

    /// 1つの時刻列を共有する複数の数値列に対して特徴量を計算
    ///
    /// 各列は独立しているため並列に処理します。
    pub fn compute_columns<T: Temporal>(
        &self,
        timestamps: &[T],
        columns: &[Vec<NA<f64>>],
    ) -> Result<Vec<Vec<NA<f64>>>> {
        columns
            .par_iter()
            .enumerate()
            .map(|(idx, column)| {
                log::trace!("{}: column {}", Self::NAME, idx);
                self.compute(timestamps, column)
            })
            .collect()
    }
}

impl<T: Temporal> TimeSeries<T> {
    /// この系列の拡大トレンド（[`ExpandingTrend`] を参照）
    pub fn expanding_trend(&self, gap: usize, min_periods: usize) -> Result<TimeSeries<T>> {
        ExpandingTrend::new(gap, min_periods)?.transform(self)
    }
}
