use chrono::Duration;
use std::fmt;
use std::str::FromStr;

use crate::error::PandRSError;

/// 時系列データの頻度（周期）を表す列挙型
///
/// 経過時間の計算に使うため、固定長の周期のみを扱います。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// 1秒ごと
    Secondly,
    /// 1分ごと
    Minutely,
    /// 1時間ごと
    Hourly,
    /// 1日ごと
    Daily,
    /// 1週間ごと
    Weekly,
    /// カスタム周期
    Custom(Duration),
}

impl Frequency {
    /// この頻度に対応する時間間隔
    pub fn to_duration(&self) -> Duration {
        match self {
            Frequency::Secondly => Duration::seconds(1),
            Frequency::Minutely => Duration::minutes(1),
            Frequency::Hourly => Duration::hours(1),
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
            Frequency::Custom(duration) => *duration,
        }
    }

    /// この頻度に対応する秒数
    pub fn to_seconds(&self) -> i64 {
        self.to_duration().num_seconds()
    }
}

impl FromStr for Frequency {
    type Err = PandRSError;

    /// `"D"`, `"min"`, `"1D"`, `"15min"`, `"2H"` のような pandas 風の表記を解析
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PandRSError::Format(format!("無効な周期の指定です: {:?}", s));

        let trimmed = s.trim();
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (num_part, unit_part) = trimmed.split_at(digits_end);

        let multiple: i32 = if num_part.is_empty() {
            1
        } else {
            num_part.parse().map_err(|_| invalid())?
        };
        if multiple <= 0 {
            return Err(invalid());
        }

        let base = match unit_part.to_uppercase().as_str() {
            "S" | "SEC" | "SECOND" | "SECONDS" => Frequency::Secondly,
            "T" | "MIN" | "MINUTE" | "MINUTES" | "MINUTELY" => Frequency::Minutely,
            "H" | "HOUR" | "HOURS" | "HOURLY" => Frequency::Hourly,
            "D" | "DAY" | "DAYS" | "DAILY" => Frequency::Daily,
            "W" | "WEEK" | "WEEKS" | "WEEKLY" => Frequency::Weekly,
            _ => return Err(invalid()),
        };

        if multiple == 1 {
            Ok(base)
        } else {
            Ok(Frequency::Custom(base.to_duration() * multiple))
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Secondly => write!(f, "S"),
            Frequency::Minutely => write!(f, "T"),
            Frequency::Hourly => write!(f, "H"),
            Frequency::Daily => write!(f, "D"),
            Frequency::Weekly => write!(f, "W"),
            Frequency::Custom(duration) => write!(f, "{}s", duration.num_seconds()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplied_aliases() {
        assert_eq!("1D".parse::<Frequency>().ok(), Some(Frequency::Daily));
        assert_eq!("1min".parse::<Frequency>().ok(), Some(Frequency::Minutely));
        assert_eq!(
            "15min".parse::<Frequency>().ok(),
            Some(Frequency::Custom(Duration::minutes(15)))
        );
        assert!(matches!("0D".parse::<Frequency>(), Err(PandRSError::Format(_))));
        assert!("D3".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for freq in [Frequency::Hourly, Frequency::Custom(Duration::minutes(15))] {
            assert_eq!(freq.to_string().parse::<Frequency>().ok(), Some(freq));
        }
    }

    #[test]
    fn test_to_seconds() {
        assert_eq!(Frequency::Hourly.to_seconds(), 3600);
        assert_eq!("2H".parse::<Frequency>().map(|f| f.to_seconds()).ok(), Some(7200));
    }
}
