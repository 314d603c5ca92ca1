//! 時系列データ操作のためのモジュール

mod date_range;
mod frequency;
pub mod gap;
pub mod window;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};
use std::ops::Add;

use crate::error::{PandRSError, Result};
use crate::na::NA;

pub use self::date_range::{date_range, date_range_periods};
pub use self::frequency::Frequency;
pub use self::window::{expanding_aggregate, ExpandingWindow, Mean, Sum, WindowAggregation, WindowView};

/// 日時を表す型のトレイト
pub trait Temporal:
    Clone + std::fmt::Debug + PartialOrd + Add<Duration, Output = Self> + Send + Sync + 'static
{
    /// UTCタイムゾーンに変換
    fn to_utc(&self) -> DateTime<Utc>;

    /// 文字列から変換
    fn parse_str(s: &str) -> Result<Self>;

    /// UNIXエポックからの秒数（小数部は切り捨て）
    fn unix_seconds(&self) -> i64 {
        self.to_utc().timestamp()
    }

    /// `origin` からの経過秒数。`origin` より前なら負になる
    fn seconds_since(&self, origin: &Self) -> f64 {
        let elapsed = self.to_utc() - origin.to_utc();
        elapsed.num_seconds() as f64 + f64::from(elapsed.subsec_nanos()) * 1e-9
    }
}

// Chronoの各種日時型に対するTemporalトレイトの実装

impl Temporal for DateTime<Utc> {
    fn to_utc(&self) -> DateTime<Utc> {
        *self
    }

    fn parse_str(s: &str) -> Result<Self> {
        s.parse::<DateTime<Utc>>()
            .map_err(|e| PandRSError::Format(format!("日時の解析エラー: {}", e)))
    }
}

impl Temporal for DateTime<Local> {
    fn to_utc(&self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }

    fn parse_str(s: &str) -> Result<Self> {
        s.parse::<DateTime<Local>>()
            .map_err(|e| PandRSError::Format(format!("日時の解析エラー: {}", e)))
    }
}

impl Temporal for NaiveDateTime {
    fn to_utc(&self) -> DateTime<Utc> {
        // NaiveDateTimeはタイムゾーン情報を持たないため、UTCと仮定
        DateTime::<Utc>::from_naive_utc_and_offset(*self, Utc)
    }

    fn parse_str(s: &str) -> Result<Self> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
            .map_err(|e| PandRSError::Format(format!("日時の解析エラー: {}", e)))
    }
}

impl Temporal for NaiveDate {
    fn to_utc(&self) -> DateTime<Utc> {
        // 日付の 00:00:00 をUTCとして扱う
        DateTime::<Utc>::from_naive_utc_and_offset(NaiveDateTime::from(*self), Utc)
    }

    fn parse_str(s: &str) -> Result<Self> {
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Ok(date),
            Err(_) => chrono::DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.date_naive())
                .map_err(|e| PandRSError::Format(format!("日付の解析エラー: {}", e))),
        }
    }
}

/// 時系列シリーズを表す構造体
#[derive(Debug, Clone)]
pub struct TimeSeries<T: Temporal> {
    /// 時系列データの値
    values: Vec<NA<f64>>,

    /// 時系列の時間インデックス
    timestamps: Vec<T>,

    /// シリーズの名前
    name: Option<String>,
}

impl<T: Temporal> TimeSeries<T> {
    /// 新しい時系列シリーズを作成
    pub fn new(values: Vec<NA<f64>>, timestamps: Vec<T>, name: Option<String>) -> Result<Self> {
        if values.len() != timestamps.len() {
            return Err(PandRSError::LengthMismatch {
                expected: timestamps.len(),
                actual: values.len(),
            });
        }

        Ok(TimeSeries {
            values,
            timestamps,
            name,
        })
    }

    /// f64 の値から作成（NaN は NA として扱う）
    pub fn from_f64(values: &[f64], timestamps: Vec<T>, name: Option<String>) -> Result<Self> {
        let values = values.iter().map(|v| NA::from_f64(*v)).collect();
        Self::new(values, timestamps, name)
    }

    /// 長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// タイムスタンプを取得
    pub fn timestamps(&self) -> &[T] {
        &self.timestamps
    }

    /// 値を取得
    pub fn values(&self) -> &[NA<f64>] {
        &self.values
    }

    /// NAをNaNに置き換えたf64ベクトルを取得
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.to_f64()).collect()
    }

    /// タイムスタンプが非減少かどうか
    pub fn is_monotonic(&self) -> bool {
        is_monotonic(&self.timestamps)
    }

    /// 値を `gap` 行後ろにずらした時系列を作成（タイムスタンプはそのまま）
    pub fn shift(&self, gap: usize) -> Self {
        TimeSeries {
            values: gap::shift(&self.values, gap),
            timestamps: self.timestamps.clone(),
            name: self.name.clone(),
        }
    }
}

/// タイムスタンプ列が非減少かどうか
pub(crate) fn is_monotonic<T: PartialOrd>(timestamps: &[T]) -> bool {
    timestamps.windows(2).all(|pair| pair[0] <= pair[1])
}
