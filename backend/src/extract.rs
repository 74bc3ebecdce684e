//! Request extractors

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejections render as the service's error
/// envelope (`INVALID_PAYLOAD`) instead of axum's plain-text default
#[derive(Debug, Clone)]
pub struct PayloadJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for PayloadJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(PayloadJson(value))
    }
}
