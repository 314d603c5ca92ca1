//! 等間隔のタイムスタンプ列を生成するモジュール

use crate::error::{PandRSError, Result};
use crate::temporal::{Frequency, Temporal};

/// 開始から終了までの等間隔のタイムスタンプを生成
///
/// `inclusive` が true の場合、終了時刻がグリッド上にあれば含めます。
pub fn date_range<T: Temporal>(start: T, end: T, freq: Frequency, inclusive: bool) -> Result<Vec<T>> {
    let step = freq.to_duration();
    if step <= chrono::Duration::zero() {
        return Err(PandRSError::InvalidInput(format!(
            "周期 ({}) は正の時間間隔である必要があります",
            freq
        )));
    }
    if start > end {
        return Err(PandRSError::InvalidInput(format!(
            "開始 ({:?}) が終了 ({:?}) より後になっています",
            start, end
        )));
    }

    let mut dates = Vec::new();
    let mut current = start;
    while current < end || (inclusive && current == end) {
        let next = advance(&current, step, freq)?;
        dates.push(current);
        current = next;
    }

    Ok(dates)
}

/// 開始時刻から `periods` 個のタイムスタンプを生成
pub fn date_range_periods<T: Temporal>(start: T, periods: usize, freq: Frequency) -> Result<Vec<T>> {
    let step = freq.to_duration();
    if step <= chrono::Duration::zero() {
        return Err(PandRSError::InvalidInput(format!(
            "周期 ({}) は正の時間間隔である必要があります",
            freq
        )));
    }

    let mut dates = Vec::with_capacity(periods);
    let mut current = start;
    for _ in 0..periods {
        let next = advance(&current, step, freq)?;
        dates.push(current);
        current = next;
    }

    Ok(dates)
}

/// 1周期進める。型の分解能より細かい周期では時刻が進まないためエラー
fn advance<T: Temporal>(current: &T, step: chrono::Duration, freq: Frequency) -> Result<T> {
    let next = current.clone() + step;
    if next > *current {
        Ok(next)
    } else {
        Err(PandRSError::InvalidInput(format!(
            "周期 ({}) はタイムスタンプ型 ({}) で表現できる分解能より細かいです",
            freq,
            std::any::type_name::<T>()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rejects_reversed_bounds() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert!(date_range(start, end, Frequency::Daily, true).is_err());
    }

    #[test]
    fn test_exclusive_end() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();
        let dates = date_range(start, end, Frequency::Daily, false).unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates.last(), NaiveDate::from_ymd_opt(2023, 1, 3).as_ref());
    }

    #[test]
    fn test_sub_day_step_on_dates_rejected() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert!(date_range(start, end, Frequency::Minutely, true).is_err());
        assert!(date_range_periods(start, 2, Frequency::Custom(chrono::Duration::hours(6))).is_err());
    }
}
