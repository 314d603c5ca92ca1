//! 拡大トレンド特徴量の設定
//!
//! [`ExpandingTrendConfigBuilder`] でコードから組み立てるか、TOML/YAML/JSON から読み込みます。
//! 不正な値は設定の構築時に拒否され、計算時にはエラーになりません。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::features::TimeUnit;

/// 各ウィンドウから除外する末尾の行数のデフォルト値
pub const DEFAULT_GAP: usize = 1;

/// ウィンドウごとに必要な有効値の最小数のデフォルト値
pub const DEFAULT_MIN_PERIODS: usize = 1;

/// 検証済みの [`crate::features::ExpandingTrend`] の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExpandingTrendConfig")]
pub struct ExpandingTrendConfig {
    /// 現在の行と利用可能な最新の観測値との間の行数
    pub gap: usize,
    /// 欠損でない結果を出すのに必要な有効値の数
    pub min_periods: usize,
    /// 傾きの計算に使う経過時間の単位
    pub time_unit: TimeUnit,
}

impl Default for ExpandingTrendConfig {
    fn default() -> Self {
        ExpandingTrendConfig {
            gap: DEFAULT_GAP,
            min_periods: DEFAULT_MIN_PERIODS,
            time_unit: TimeUnit::Auto,
        }
    }
}

impl ExpandingTrendConfig {
    /// 型だけでは保証できない条件を検証
    pub fn validate(&self) -> Result<()> {
        if self.min_periods == 0 {
            return Err(Error::InvalidInput(
                "min_periods は1以上である必要があります。".to_string(),
            ));
        }
        Ok(())
    }

    /// TOML文書を解析
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawExpandingTrendConfig = toml::from_str(s)?;
        Self::try_from(raw)
    }

    /// YAML文書を解析
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let raw: RawExpandingTrendConfig = serde_yaml::from_str(s)?;
        Self::try_from(raw)
    }

    /// JSON文書を解析
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: RawExpandingTrendConfig = serde_json::from_str(s)?;
        Self::try_from(raw)
    }

    /// 設定ファイルを読み込む。形式は拡張子から判断する
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            Some("json") => Self::from_json_str(&contents),
            _ => Err(Error::Config(format!(
                "未対応の設定ファイル形式です: {}",
                path.display()
            ))),
        }
    }

    /// TOML文書にシリアライズ
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// 検証前の、文書に書かれたままの設定
///
/// 負の値に対して型不一致ではなく分かりやすいエラーを返すため、件数は符号付きで受け取ります。
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExpandingTrendConfig {
    #[serde(default = "default_gap")]
    gap: i64,
    #[serde(default = "default_min_periods")]
    min_periods: i64,
    #[serde(default)]
    time_unit: TimeUnit,
}

fn default_gap() -> i64 {
    DEFAULT_GAP as i64
}

fn default_min_periods() -> i64 {
    DEFAULT_MIN_PERIODS as i64
}

impl TryFrom<RawExpandingTrendConfig> for ExpandingTrendConfig {
    type Error = Error;

    fn try_from(raw: RawExpandingTrendConfig) -> Result<Self> {
        let gap = usize::try_from(raw.gap)
            .map_err(|_| Error::Config(format!("gap は0以上である必要があります: {}", raw.gap)))?;
        let min_periods = usize::try_from(raw.min_periods)
            .ok()
            .filter(|&m| m >= 1)
            .ok_or_else(|| {
                Error::Config(format!(
                    "min_periods は正の整数である必要があります: {}",
                    raw.min_periods
                ))
            })?;

        Ok(ExpandingTrendConfig {
            gap,
            min_periods,
            time_unit: raw.time_unit,
        })
    }
}

/// ExpandingTrendConfig のビルダー
#[derive(Debug, Default)]
pub struct ExpandingTrendConfigBuilder {
    config: ExpandingTrendConfig,
}

impl ExpandingTrendConfigBuilder {
    /// デフォルト設定で新しいビルダーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// gap を設定
    pub fn gap(mut self, gap: usize) -> Self {
        self.config.gap = gap;
        self
    }

    /// 有効値の最小数を設定
    pub fn min_periods(mut self, min_periods: usize) -> Self {
        self.config.min_periods = min_periods;
        self
    }

    /// 経過時間の単位を設定
    pub fn time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.config.time_unit = time_unit;
        self
    }

    /// 検証して設定を返す
    pub fn build(self) -> Result<ExpandingTrendConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExpandingTrendConfig::default();
        assert_eq!(config.gap, 1);
        assert_eq!(config.min_periods, 1);
        assert_eq!(config.time_unit, TimeUnit::Auto);
    }

    #[test]
    fn test_builder_rejects_zero_min_periods() {
        let err = ExpandingTrendConfigBuilder::new().min_periods(0).build();
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_negative_gap_is_config_error() {
        let err = ExpandingTrendConfig::from_json_str(r#"{"gap": -1}"#).unwrap_err();
        match err {
            Error::Config(msg) => assert!(msg.contains("gap")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ExpandingTrendConfig::from_toml_str("window = 3").is_err());
    }
}
