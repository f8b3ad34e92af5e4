//! ハンドラーやヘルパーから使うロガーのアクセサー

use once_cell::sync::OnceCell;

use crate::{error::Result, logger::Logger, settings::Settings};

/// コンテキストごとに1つだけロガーを保持するセル。
///
/// 最初のアクセスでロガーを作成し、以降は同じインスタンスを返却する。
/// 作成に失敗した場合は何も保持せず、次のアクセスで再び作成を試みる。
#[derive(Debug, Default)]
pub struct LoggerCell(OnceCell<Logger>);

impl LoggerCell {
    pub fn new() -> LoggerCell {
        Self::default()
    }

    pub fn get_or_open(&self, settings: &Settings) -> Result<&Logger> {
        self.0.get_or_try_init(|| settings.open_logger())
    }

    pub fn is_initialized(&self) -> bool {
        self.0.get().is_some()
    }
}

/// ロガーを提供するコンテキストが実装するトレイト。
///
/// ```no_run
/// use app_file_logger::{AppContext, LoggerHelpers, Settings};
///
/// let app = AppContext::new(Settings::new("/srv/app"));
/// app.logger()?.warn("something odd happened");
/// # Ok::<(), app_file_logger::Error>(())
/// ```
pub trait LoggerHelpers {
    fn settings(&self) -> &Settings;

    fn logger_cell(&self) -> &LoggerCell;

    /// コンテキストのロガーを返却する。
    ///
    /// 最初の呼び出しで設定を評価してログファイルを開く。
    fn logger(&self) -> Result<&Logger> {
        self.logger_cell().get_or_open(self.settings())
    }
}

/// アプリケーションの存続期間に渡ってロガーを保持するコンテキスト。
#[derive(Debug)]
pub struct AppContext {
    settings: Settings,
    logger: LoggerCell,
}

impl AppContext {
    pub fn new(settings: Settings) -> AppContext {
        Self {
            settings,
            logger: LoggerCell::new(),
        }
    }

    /// ロガー作成前であれば設定を変更できる。
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

impl LoggerHelpers for AppContext {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn logger_cell(&self) -> &LoggerCell {
        &self.logger
    }
}
