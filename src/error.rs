//! エラー型

use std::{io, path::PathBuf};

use thiserror::Error;

/// ロガーの構築や設定の読み込みで発生するエラー。
#[derive(Debug, Error)]
pub enum Error {
    /// ログファイルを開けなかった。ディレクトリが存在しない場合もこれになる。
    #[error("failed to open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `logger_level`に未知のレベル名が指定されていた。
    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    #[error("invalid timestamp format: {0}")]
    InvalidTimestampFormat(#[from] time::error::InvalidFormatDescription),

    #[error("failed to read logger config {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse logger config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
