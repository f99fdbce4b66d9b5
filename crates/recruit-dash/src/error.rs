use crate::config::ConfigError;
use crate::recruitment::dashboard::router::pipeline_status;
use crate::recruitment::{DataLoadError, PipelineError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    DataLoad(DataLoadError),
    Pipeline(PipelineError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::DataLoad(err) => write!(f, "dataset error: {}", err),
            AppError::Pipeline(err) => write!(f, "dashboard error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::DataLoad(err) => Some(err),
            AppError::Pipeline(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Load errors other than an unreadable dataset file come from posted records.
        let status = match &self {
            AppError::Pipeline(err) => pipeline_status(err),
            AppError::DataLoad(DataLoadError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DataLoad(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DataLoadError> for AppError {
    fn from(value: DataLoadError) -> Self {
        Self::DataLoad(value)
    }
}

impl From<PipelineError> for AppError {
    fn from(value: PipelineError) -> Self {
        Self::Pipeline(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_errors_map_to_bad_request() {
        let response =
            AppError::from(PipelineError::InvalidFilterColumn("Region".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unparseable_dates_map_to_unprocessable_entity() {
        let response = AppError::from(PipelineError::UnparseableDate {
            column: "Month".to_string(),
            value: "Q1".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn malformed_records_map_to_bad_request() {
        let error = AppError::from(DataLoadError::Empty);
        assert_eq!(
            error.to_string(),
            "dataset error: recruitment data contains no records"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);

        let unknown = AppError::from(DataLoadError::UnknownStatus {
            row: 1,
            value: "Withdrawn".to_string(),
        });
        assert_eq!(unknown.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unreadable_dataset_file_maps_to_internal_error() {
        let error = AppError::from(DataLoadError::Io {
            path: "missing.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
