use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` body extractor whose rejections are reported as [`AppError`],
/// so malformed bodies get the same `{ "error": ... }` reply as other 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
