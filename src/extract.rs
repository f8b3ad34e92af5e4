//! axumとの統合
//!
//! `RequestContext`をハンドラーの引数に書くと、リクエストごとのロガーを使える。
//! ルーターの状態からは`Arc<Settings>`を取り出せる必要がある。
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::{extract::Path, routing::get, Router};
//! use app_file_logger::{Error, LoggerHelpers, RequestContext, Settings};
//!
//! async fn hello(ctx: RequestContext, Path(name): Path<String>) -> Result<String, Error> {
//!     ctx.logger()?.info(format!("hello {}", name));
//!     Ok(format!("Hello, {}", name))
//! }
//!
//! let app: Router = Router::new()
//!     .route("/hello/{name}", get(hello))
//!     .with_state(Arc::new(Settings::new("/srv/app")));
//! ```

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    error::Error,
    helpers::{LoggerCell, LoggerHelpers},
    settings::Settings,
};

/// 1つのリクエストの間だけロガーを保持するコンテキスト。
///
/// ロガーはリクエスト内で最初に`logger()`を呼んだときに作成され、
/// レスポンスを返した後に破棄される。リクエスト間でロガーは共有しない。
#[derive(Debug)]
pub struct RequestContext {
    settings: Arc<Settings>,
    logger: LoggerCell,
}

impl RequestContext {
    pub fn new(settings: Arc<Settings>) -> RequestContext {
        Self {
            settings,
            logger: LoggerCell::new(),
        }
    }
}

impl LoggerHelpers for RequestContext {
    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn logger_cell(&self) -> &LoggerCell {
        &self.logger
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    Arc<Settings>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::new(Arc::<Settings>::from_ref(state)))
    }
}

/// ロガーを作成できなかったリクエストは500で終える。
///
/// エラーの内容（ファイルパスやOSのエラー）はログにだけ出力し、レスポンスには含めない。
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");

        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
