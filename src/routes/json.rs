use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` extractor whose rejections render as `AppError::InvalidInput`,
/// so a body with the wrong shape gets the same `{"error": ...}` 400 as any
/// other validation failure
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
