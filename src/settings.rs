//! アプリケーション設定
//!
//! ロガーが参照する設定は`logger_level`と`logger_log_file`の2つ。
//! `logger_log_file`は遅延評価されるパスで、最初にロガーへアクセスしたときに評価される。
//! そのため、登録後に`root`や`environment`を変更しても、評価時点の値が使われる。

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    level::Severity,
    logger::Logger,
};

/// 既定のログレベル名。
pub const DEFAULT_LOGGER_LEVEL: &str = "warn";

/// 既定の実行環境名。
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// 最初に使われるときに評価されるログファイルパス。
pub type DeferredPath = Arc<dyn Fn(&Settings) -> PathBuf + Send + Sync>;

/// アプリケーションの設定。
#[derive(Clone)]
pub struct Settings {
    root: PathBuf,
    environment: String,
    logger_level: Option<String>,
    logger_log_file: DeferredPath,
}

impl Settings {
    /// `Settings`を作成する。
    ///
    /// 実行環境は環境変数`APP_ENV`から読み込み、無ければ`development`とする。
    /// ロガーの設定には既定値（レベル`warn`、パス`<root>/log/<environment>.log`）が登録される。
    ///
    /// # 引数
    ///
    /// * root: アプリケーションのルートディレクトリ。
    ///
    /// # 戻り値
    ///
    /// `Settings`インスタンス。
    pub fn new(root: impl Into<PathBuf>) -> Settings {
        let environment = env::var("APP_ENV")
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        Self {
            root: root.into(),
            environment,
            logger_level: Some(DEFAULT_LOGGER_LEVEL.to_string()),
            logger_log_file: Arc::new(default_log_file),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, root: impl Into<PathBuf>) -> &mut Self {
        self.root = root.into();
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn set_environment(&mut self, environment: impl Into<String>) -> &mut Self {
        self.environment = environment.into();
        self
    }

    /// ログレベル名を設定する。名前の検証はロガーを作成するときに行う。
    pub fn set_logger_level(&mut self, level: impl Into<String>) -> &mut Self {
        self.logger_level = Some(level.into());
        self
    }

    /// ログレベルの設定を消す。ロガーは`warn`で作成される。
    pub fn unset_logger_level(&mut self) -> &mut Self {
        self.logger_level = None;
        self
    }

    /// ログファイルパスを返す関数を設定する。
    ///
    /// 関数は最初にロガーへアクセスしたときに、その時点の設定を引数に呼び出される。
    pub fn set_logger_log_file<F>(&mut self, log_file: F) -> &mut Self
    where
        F: Fn(&Settings) -> PathBuf + Send + Sync + 'static,
    {
        self.logger_log_file = Arc::new(log_file);
        self
    }

    /// ログファイルパスを固定値で設定する。相対パスはルートディレクトリからのパスとして扱う。
    pub fn set_logger_log_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        self.set_logger_log_file(move |settings| settings.root().join(&path))
    }

    /// 設定ファイルから読み込んだ値を反映する。指定されていない項目は変更しない。
    pub fn apply(&mut self, config: LoggerConfig) -> &mut Self {
        if let Some(level) = config.level {
            self.set_logger_level(level);
        }
        if let Some(log_file) = config.log_file {
            self.set_logger_log_path(log_file);
        }
        self
    }

    /// ログレベル名を返却する。設定されていない場合は`warn`。
    pub fn logger_level(&self) -> &str {
        self.logger_level.as_deref().unwrap_or(DEFAULT_LOGGER_LEVEL)
    }

    /// ログレベル名を`Severity`に変換して返却する。
    pub fn logger_severity(&self) -> Result<Severity> {
        self.logger_level().parse()
    }

    /// ログファイルパスを評価して返却する。
    pub fn logger_log_file(&self) -> PathBuf {
        (self.logger_log_file)(self)
    }

    /// 現在の設定でロガーを作成する。
    ///
    /// ログファイルは追記モードで開かれ、無ければ作成される。
    /// ディレクトリが存在しない場合は`Error::Open`を返却する。
    pub fn open_logger(&self) -> Result<Logger> {
        let path = self.logger_log_file();
        let level = self.logger_severity()?;
        let logger = Logger::new(&path, level)?;
        tracing::debug!(path = %path.display(), %level, "opened application logger");

        Ok(logger)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("root", &self.root)
            .field("environment", &self.environment)
            .field("logger_level", &self.logger_level)
            .finish_non_exhaustive()
    }
}

/// `<root>/log/<environment>.log`
fn default_log_file(settings: &Settings) -> PathBuf {
    settings
        .root()
        .join("log")
        .join(format!("{}.log", settings.environment()))
}

/// 設定ファイル（TOML）から読み込むロガーの設定。
///
/// ```toml
/// level = "debug"
/// log_file = "log/custom.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl LoggerConfig {
    pub fn from_toml(content: &str) -> Result<LoggerConfig> {
        Ok(toml::from_str(content)?)
    }

    /// 設定ファイルを読み込む。
    pub fn load(path: impl AsRef<Path>) -> Result<LoggerConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }
}
