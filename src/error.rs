use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("無効な入力です: {0}")]
    InvalidInput(String),

    #[error("長さが一致しません: 期待値 {expected}, 実際 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データ形式エラー: {0}")]
    Format(String),

    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),

    #[error("YAMLエラー")]
    Yaml(#[source] serde_yaml::Error),

    #[error("TOMLエラー")]
    Toml(#[source] toml::de::Error),
}

// pandrs の命名との互換性を維持する
pub type PandRSError = Error;

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}
