use std::fmt::{self, Debug, Display};
use std::ops::{Add, Div};

use num_traits::Zero;

/// 欠損値（NA, Not Available）を表現する型
///
/// 浮動小数点の NaN を欠損の目印として使わず、値の有無を型で区別します。
/// 外部との受け渡しには [`NA::from_f64`] と [`NA::to_f64`] を使います。
#[derive(Clone, Copy)]
pub enum NA<T> {
    /// 値が存在する場合
    Value(T),
    /// 値が存在しない場合
    NA,
}

impl<T> NA<T> {
    /// 欠損しているかどうか
    pub fn is_na(&self) -> bool {
        matches!(self, NA::NA)
    }

    /// 値があるかどうか
    pub fn is_value(&self) -> bool {
        !self.is_na()
    }

    /// 値への参照を取得（存在する場合）
    pub fn value(&self) -> Option<&T> {
        match self {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Copy> NA<T> {
    /// 値を取り出す。欠損ならデフォルト値
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            NA::Value(v) => v,
            NA::NA => default,
        }
    }
}

impl NA<f64> {
    /// f64 から変換する。NaN は欠損として扱う
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            NA::NA
        } else {
            NA::Value(value)
        }
    }

    /// f64 に変換する。欠損は NaN になる
    pub fn to_f64(self) -> f64 {
        self.unwrap_or(f64::NAN)
    }

    /// 有限値のみを残す。無限大やNaNは欠損にする
    pub fn finite(self) -> Self {
        match self {
            NA::Value(v) if v.is_finite() => NA::Value(v),
            _ => NA::NA,
        }
    }
}

impl<T> Default for NA<T> {
    fn default() -> Self {
        NA::NA
    }
}

impl<T> From<T> for NA<T> {
    fn from(value: T) -> Self {
        NA::Value(value)
    }
}

impl<T> From<Option<T>> for NA<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => NA::Value(v),
            None => NA::NA,
        }
    }
}

impl<T> From<NA<T>> for Option<T> {
    fn from(na: NA<T>) -> Self {
        match na {
            NA::Value(v) => Some(v),
            NA::NA => None,
        }
    }
}

impl<T: Debug> Debug for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{:?}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

impl<T: Display> Display for NA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NA::Value(v) => write!(f, "{}", v),
            NA::NA => write!(f, "NA"),
        }
    }
}

// NA同士は等しいとみなす（NaNと異なり比較が反射的になる）
impl<T: PartialEq> PartialEq for NA<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => a == b,
            (NA::NA, NA::NA) => true,
            _ => false,
        }
    }
}

impl<T: Add<Output = T>> Add for NA<T> {
    type Output = NA<T>;

    fn add(self, other: Self) -> Self::Output {
        match (self, other) {
            (NA::Value(a), NA::Value(b)) => NA::Value(a + b),
            _ => NA::NA, // どちらかがNAならNA
        }
    }
}

impl<T: Div<Output = T> + Zero> Div for NA<T> {
    type Output = NA<T>;

    fn div(self, other: Self) -> Self::Output {
        match (self, other) {
            (NA::Value(_), NA::Value(b)) if b.is_zero() => NA::NA, // ゼロ除算はNA
            (NA::Value(a), NA::Value(b)) => NA::Value(a / b),
            _ => NA::NA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_boundary_conversion() {
        assert!(NA::from_f64(f64::NAN).is_na());
        assert_eq!(NA::from_f64(2.5), NA::Value(2.5));
        assert!(NA::<f64>::NA.to_f64().is_nan());
        assert_eq!(NA::Value(1.5).to_f64(), 1.5);
    }

    #[test]
    fn test_arithmetic_propagates_na() {
        assert_eq!(NA::Value(2.0) + NA::Value(3.0), NA::Value(5.0));
        assert!((NA::Value(2.0) + NA::NA).is_na());
        assert!((NA::<f64>::NA / NA::Value(2.0)).is_na());
        assert!((NA::Value(1.0) / NA::Value(0.0)).is_na());
        assert_eq!(NA::Value(6.0) / NA::Value(3.0), NA::Value(2.0));
    }

    #[test]
    fn test_finite_drops_infinities() {
        assert!(NA::Value(f64::INFINITY).finite().is_na());
        assert_eq!(NA::Value(-1.0).finite(), NA::Value(-1.0));
    }
}
