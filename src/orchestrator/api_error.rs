use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, CycleStep};

/// HTTP 层统一错误
///
/// 响应体固定为 `{ "error": ..., "step": ... }`，页面据此提示出错的步骤
#[derive(Debug)]
pub enum ApiError {
    /// 生成周期失败
    Cycle(AppError),
    /// 请求体无法解析，按组装步骤处理
    BadRequest(String),
    /// 已达到同时进行的周期上限
    Busy,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    step: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Cycle(e) => match e.step() {
                CycleStep::Composition => StatusCode::UNPROCESSABLE_ENTITY,
                CycleStep::Generation => StatusCode::BAD_GATEWAY,
                CycleStep::Rendering => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Busy => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    pub fn step(&self) -> &'static str {
        match self {
            ApiError::Cycle(e) => e.step().as_str(),
            ApiError::BadRequest(_) => CycleStep::Composition.as_str(),
            ApiError::Busy => "busy",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let step = self.step();
        let message = match self {
            ApiError::Cycle(e) => e.to_string(),
            ApiError::BadRequest(msg) => msg,
            ApiError::Busy => "a generation is already in progress, try again shortly".to_string(),
        };

        (status, Json(ErrorBody { error: message, step })).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError::Cycle(e)
    }
}
