use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Spreadsheet import failures. Any of these aborts the whole import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("파일을 읽을 수 없습니다: {0}")]
    Workbook(String),
    #[error("데이터가 없습니다")]
    EmptySheet,
    #[error("이름 열을 찾을 수 없습니다")]
    MissingNameColumn,
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        Self::bad_request(err.to_string())
    }
}

#[derive(Debug, Error)]
#[error("내보내기에 실패했습니다: {0}")]
pub struct ExportError(#[from] pub rust_xlsxwriter::XlsxError);

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        Self::internal(err)
    }
}
