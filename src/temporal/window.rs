//! 時系列データの拡大ウィンドウ操作を行うモジュール
//!
//! ウィンドウの反復と集計処理を分離し、集計は [`WindowAggregation`] として差し替えられます。

use crate::error::{PandRSError, Result};
use crate::na::NA;
use crate::temporal::{Temporal, TimeSeries};

/// 1つのウィンドウに含まれるタイムスタンプと値への参照
#[derive(Debug, Clone, Copy)]
pub struct WindowView<'w, T> {
    timestamps: &'w [T],
    values: &'w [NA<f64>],
}

impl<'w, T> WindowView<'w, T> {
    /// 同じ長さのタイムスタンプと値からビューを作成
    pub fn new(timestamps: &'w [T], values: &'w [NA<f64>]) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(PandRSError::LengthMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }
        Ok(WindowView { timestamps, values })
    }

    /// ウィンドウの行数（NAを含む）
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn timestamps(&self) -> &'w [T] {
        self.timestamps
    }

    pub fn values(&self) -> &'w [NA<f64>] {
        self.values
    }

    /// NAでない値の個数
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_value()).count()
    }

    /// NAでない (タイムスタンプ, 値) の組
    pub fn valid_pairs(&self) -> impl Iterator<Item = (&'w T, f64)> + 'w {
        let timestamps: &'w [T] = self.timestamps;
        let values: &'w [NA<f64>] = self.values;
        timestamps
            .iter()
            .zip(values.iter())
            .filter_map(|(ts, v)| match v {
                NA::Value(val) => Some((ts, *val)),
                NA::NA => None,
            })
    }
}

/// ウィンドウ1つ分を1つの値に集計する戦略
pub trait WindowAggregation<T> {
    /// ウィンドウを集計する。計算できない場合は NA を返す
    fn aggregate(&self, window: &WindowView<'_, T>) -> NA<f64>;
}

impl<T, F> WindowAggregation<T> for F
where
    F: Fn(&WindowView<'_, T>) -> NA<f64>,
{
    fn aggregate(&self, window: &WindowView<'_, T>) -> NA<f64> {
        self(window)
    }
}

/// 平均値による集計
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl<T> WindowAggregation<T> for Mean {
    fn aggregate(&self, window: &WindowView<'_, T>) -> NA<f64> {
        // 有効値が無ければ合計がNA、個数0の除算もNA
        Sum.aggregate(window) / NA::Value(window.valid_count() as f64)
    }
}

/// 合計による集計
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl<T> WindowAggregation<T> for Sum {
    fn aggregate(&self, window: &WindowView<'_, T>) -> NA<f64> {
        window
            .valid_pairs()
            .map(|(_, v)| NA::Value(v))
            .reduce(|acc, v| acc + v)
            .unwrap_or(NA::NA)
    }
}

/// 拡大ウィンドウに集計を適用する
///
/// 位置 `i` のウィンドウは `[0..=i]` で、NAでない値が `min_periods` 個未満なら NA になります。
/// 各ウィンドウは先頭から毎回集計し直すため、結果は逐次更新による誤差を含みません。
pub fn expanding_aggregate<T, A>(
    timestamps: &[T],
    values: &[NA<f64>],
    min_periods: usize,
    aggregation: &A,
) -> Result<Vec<NA<f64>>>
where
    A: WindowAggregation<T> + ?Sized,
{
    if min_periods == 0 {
        return Err(PandRSError::InvalidInput(
            "min_periods は1以上である必要があります。".to_string(),
        ));
    }
    if timestamps.len() != values.len() {
        return Err(PandRSError::LengthMismatch {
            expected: timestamps.len(),
            actual: values.len(),
        });
    }

    let mut result_values = Vec::with_capacity(values.len());
    let mut valid = 0usize;

    for i in 0..values.len() {
        if values[i].is_value() {
            valid += 1;
        }

        if valid < min_periods {
            result_values.push(NA::NA);
            continue;
        }

        let window = WindowView {
            timestamps: &timestamps[..=i],
            values: &values[..=i],
        };
        result_values.push(aggregation.aggregate(&window));
    }

    Ok(result_values)
}

/// 拡大ウィンドウ操作を行うための構造体
#[derive(Debug)]
pub struct ExpandingWindow<'a, T: Temporal> {
    /// 元の時系列データへの参照
    time_series: &'a TimeSeries<T>,

    /// 結果を出すのに必要な非NA値の最小数
    min_periods: usize,
}

impl<'a, T: Temporal> ExpandingWindow<'a, T> {
    /// 新しい拡大ウィンドウ操作インスタンスを作成
    pub fn new(time_series: &'a TimeSeries<T>, min_periods: usize) -> Result<Self> {
        if min_periods == 0 {
            return Err(PandRSError::InvalidInput(
                "min_periods は1以上である必要があります。".to_string(),
            ));
        }

        Ok(ExpandingWindow {
            time_series,
            min_periods,
        })
    }

    pub fn min_periods(&self) -> usize {
        self.min_periods
    }

    /// 任意の集計を適用
    pub fn aggregate<A>(&self, aggregation: &A) -> Result<TimeSeries<T>>
    where
        A: WindowAggregation<T> + ?Sized,
    {
        let result_values = expanding_aggregate(
            self.time_series.timestamps(),
            self.time_series.values(),
            self.min_periods,
            aggregation,
        )?;

        TimeSeries::new(
            result_values,
            self.time_series.timestamps().to_vec(),
            self.time_series.name().cloned(),
        )
    }

    /// 平均を計算
    pub fn mean(&self) -> Result<TimeSeries<T>> {
        self.aggregate(&Mean)
    }

    /// 合計を計算
    pub fn sum(&self) -> Result<TimeSeries<T>> {
        self.aggregate(&Sum)
    }
}

impl<T: Temporal> TimeSeries<T> {
    /// 拡大ウィンドウ操作を作成
    pub fn expanding(&self, min_periods: usize) -> Result<ExpandingWindow<'_, T>> {
        ExpandingWindow::new(self, min_periods)
    }
}
