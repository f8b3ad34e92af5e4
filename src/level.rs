//! ログレベル

use std::{fmt, str::FromStr};

use crate::error::Error;

/// ログの重要度。
///
/// `Debug < Info < Warn < Error < Fatal`の順に順序付けられている。
/// 設定されたレベル以上の重要度を持つメッセージのみ出力される。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// 開発者向けの低レベルな情報
    Debug,
    /// システム動作に関する一般的な情報
    Info,
    /// 警告
    #[default]
    Warn,
    /// 処理可能なエラー
    Error,
    /// プログラムの停止につながる処理不能なエラー
    Fatal,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// ログ行に出力するラベルを返却する。
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// レベル名を`Severity`に変換する。大文字と小文字は区別しない。
impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_parse_severity() {
        assert_eq!(Severity::Debug, "debug".parse().unwrap());
        assert_eq!(Severity::Fatal, "FATAL".parse().unwrap());
        assert_eq!(Severity::Warn, "Warn".parse().unwrap());
    }

    #[test]
    fn test_parse_unknown_severity() {
        let err = "verbose".parse::<Severity>().unwrap_err();
        assert!(matches!(err, Error::UnknownLevel(name) if name == "verbose"));
    }

    #[test]
    fn test_default_severity_is_warn() {
        assert_eq!(Severity::Warn, Severity::default());
    }
}
