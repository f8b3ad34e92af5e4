//! ログ出力オブジェクト

use std::{
    path::Path,
    sync::{PoisonError, RwLock},
};

use time::{
    format_description::{self, OwnedFormatItem},
    OffsetDateTime,
};

use crate::{appenders::FileAppender, error::Result, level::Severity};

/// 既定のタイムスタンプ書式（`YYYY-MM-DD HH:MM:SS`）。
pub const DEFAULT_DATETIME_FORMAT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

/// ファイルにログを出力するロガー。
///
/// 出力する行の書式は`<timestamp> <LEVEL> -- : <message>`。
/// 設定されたレベル未満のメッセージは、何もせずに捨てる。
/// レベルと書式は、コンテキストから共有参照で受け取った後でも変更できる。
#[derive(Debug)]
pub struct Logger {
    options: RwLock<LoggerOptions>,
    appender: FileAppender,
}

#[derive(Debug)]
struct LoggerOptions {
    level: Severity,
    datetime_format: String,
    timestamp_format: OwnedFormatItem,
}

impl Logger {
    /// `Logger`を作成する。
    ///
    /// # 引数
    ///
    /// * path: ログファイルパス。ファイルを含むディレクトリは存在している必要がある。
    /// * level: 出力する最低のレベル。
    ///
    /// # 戻り値
    ///
    /// `Logger`インスタンス。
    pub fn new(path: impl AsRef<Path>, level: Severity) -> Result<Logger> {
        let path = path.as_ref();
        let appender = FileAppender::open(path).map_err(|source| crate::Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let options = LoggerOptions {
            level,
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            timestamp_format: format_description::parse_owned::<2>(DEFAULT_DATETIME_FORMAT)?,
        };

        Ok(Self {
            options: RwLock::new(options),
            appender,
        })
    }

    pub fn level(&self) -> Severity {
        self.options.read().unwrap_or_else(PoisonError::into_inner).level
    }

    pub fn set_level(&self, level: Severity) {
        self.options
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .level = level;
    }

    pub fn datetime_format(&self) -> String {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .datetime_format
            .clone()
    }

    /// タイムスタンプの書式を変更する。書式は`time`クレートの書式記述で指定する。
    ///
    /// 書式が不正な場合は、現在の書式を変更しない。
    pub fn set_datetime_format(&self, format: &str) -> Result<()> {
        let timestamp_format = format_description::parse_owned::<2>(format)?;

        let mut options = self.options.write().unwrap_or_else(PoisonError::into_inner);
        options.timestamp_format = timestamp_format;
        options.datetime_format = format.to_string();

        Ok(())
    }

    pub fn path(&self) -> &Path {
        self.appender.path()
    }

    /// 指定されたレベルのメッセージが出力されるかを返却する。
    pub fn enabled(&self, severity: Severity) -> bool {
        severity >= self.level()
    }

    /// メッセージを出力する。
    ///
    /// 書き込みに失敗しても呼び出し元にはエラーを返さない。
    pub fn log(&self, severity: Severity, message: impl AsRef<str>) {
        if !self.enabled(severity) {
            return;
        }

        let line = self.format_line(severity, message.as_ref());
        if let Err(err) = self.appender.write_line(&line) {
            tracing::warn!(
                path = %self.path().display(),
                error = %err,
                "failed to write log line"
            );
        }
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(Severity::Debug, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.log(Severity::Error, message);
    }

    pub fn fatal(&self, message: impl AsRef<str>) {
        self.log(Severity::Fatal, message);
    }

    fn format_line(&self, severity: Severity, message: &str) -> String {
        // 複数スレッドで動作している場合、ローカルオフセットを取得できないことがある
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        let options = self.options.read().unwrap_or_else(PoisonError::into_inner);

        format_log_line(&now, &options.timestamp_format, severity, message)
    }
}

/// ログ行を作成して、返却する。
///
/// # 引数
///
/// * now: タイムスタンプに使う日時。
/// * format: タイムスタンプの書式。
/// * severity: レベル。
/// * message: メッセージ。
///
/// # 戻り値
///
/// 改行を含まないログ行。
fn format_log_line(
    now: &OffsetDateTime,
    format: &OwnedFormatItem,
    severity: Severity,
    message: &str,
) -> String {
    // 書式は構築時に検証済みなので、失敗するのは日時の値が書式に合わない場合のみ
    let timestamp = now.format(format).unwrap_or_default();

    format!("{} {} -- : {}", timestamp, severity.label(), message)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use time::macros::datetime;

    use super::*;

    fn read(logger: &Logger) -> String {
        fs::read_to_string(logger.path()).unwrap()
    }

    #[test]
    fn test_format_log_line() {
        let now = datetime!(2022-05-26 15:25:32 +09:00);
        let format = format_description::parse_owned::<2>(DEFAULT_DATETIME_FORMAT).unwrap();

        assert_eq!(
            "2022-05-26 15:25:32 WARN -- : Message: this-works",
            format_log_line(&now, &format, Severity::Warn, "Message: this-works")
        );
    }

    #[test]
    fn test_lower_levels_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("test.log"), Severity::Warn).unwrap();

        logger.debug("default-debug");
        logger.info("default-info");
        assert_eq!("", read(&logger));

        logger.warn("warned");
        logger.error("errored");
        logger.fatal("crashed");

        let content = read(&logger);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(3, lines.len());
        assert!(lines[0].ends_with("WARN -- : warned"));
        assert!(lines[1].ends_with("ERROR -- : errored"));
        assert!(lines[2].ends_with("FATAL -- : crashed"));
    }

    #[test]
    fn test_each_enabled_severity_writes_one_line() {
        for level in Severity::ALL {
            let dir = tempfile::tempdir().unwrap();
            let logger = Logger::new(dir.path().join("test.log"), level).unwrap();

            for severity in Severity::ALL {
                logger.log(severity, format!("at {}", severity));
            }

            let content = read(&logger);
            for severity in Severity::ALL {
                let suffix = format!("{} -- : at {}", severity.label(), severity);
                let count = content.lines().filter(|l| l.ends_with(&suffix)).count();
                let expected = usize::from(severity >= level);
                assert_eq!(expected, count, "level {} severity {}", level, severity);
            }
        }
    }

    #[test]
    fn test_set_level() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("test.log"), Severity::Warn).unwrap();
        assert!(!logger.enabled(Severity::Debug));

        logger.set_level(Severity::Debug);
        assert_eq!(Severity::Debug, logger.level());
        logger.debug("now visible");

        assert!(read(&logger).contains("DEBUG -- : now visible"));
    }

    #[test]
    fn test_set_datetime_format() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("test.log"), Severity::Info).unwrap();
        assert_eq!(DEFAULT_DATETIME_FORMAT, logger.datetime_format());

        logger.set_datetime_format("[year]").unwrap();
        logger.info("short");

        let content = read(&logger);
        let (timestamp, rest) = content.trim_end().split_once(' ').unwrap();
        assert_eq!(4, timestamp.len());
        assert_eq!("INFO -- : short", rest);
    }

    #[test]
    fn test_invalid_datetime_format() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(dir.path().join("test.log"), Severity::Info).unwrap();

        assert!(logger.set_datetime_format("[nonsense]").is_err());
        assert_eq!(DEFAULT_DATETIME_FORMAT, logger.datetime_format());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log").join("test.log");

        let err = Logger::new(&path, Severity::Warn).unwrap_err();
        assert!(matches!(err, crate::Error::Open { path: p, .. } if p == path));
    }
}
