//! Application File Logger
//!
//! ----------------------------------------------------------------------------
//!
//! このクレートは、Webアプリケーションにアプリケーション単位のロガーを追加する。
//! ロガーは、ログファイルのパスとログレベルの2つの設定を持ち、ルートのハンドラーや
//! ヘルパーから`logger()`でアクセスできる。
//!
//! - ログレベルの既定値は`warn`
//! - ログファイルの既定値は`<アプリケーションのルート>/log/<実行環境>.log`
//!
//! ロガーは、コンテキスト（リクエストまたはアプリケーション）ごとに、最初のアクセスで
//! 作成される。ログファイルのパスは、このときに評価される。
//! ログファイルを含むディレクトリは作成しないため、事前に用意しておく必要がある。
//!
//! ログファイルには、次の書式で1行ずつ出力される。
//!
//! ```text
//! 2022-05-26 15:25:32 WARN -- : Message: this-works
//! ```

pub mod appenders;
pub mod error;
pub mod extract;
pub mod helpers;
pub mod level;
pub mod logger;
pub mod settings;

pub use error::{Error, Result};
pub use extract::RequestContext;
pub use helpers::{AppContext, LoggerCell, LoggerHelpers};
pub use level::Severity;
pub use logger::Logger;
pub use settings::{LoggerConfig, Settings};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// バージョン文字列を返却する。
///
/// ```
/// assert_eq!("app-file-logger v0.1.0", app_file_logger::version());
/// ```
pub fn version() -> String {
    format!("app-file-logger v{}", VERSION)
}
