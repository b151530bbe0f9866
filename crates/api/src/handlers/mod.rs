//! Request handlers.
//!
//! Every generation endpoint follows the same order: credential check,
//! body parsing, validation, one vendor call. The credential check comes
//! first so an unconfigured vendor fails the same way for any body.

pub mod health;
pub mod images;
pub mod status;
pub mod video;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body, turning any extractor rejection (bad syntax, wrong
/// content type, wrong field types) into a 400.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    })
}
