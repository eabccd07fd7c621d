//! JSON body extractor that runs `validator` rules before the handler.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use userhub_core::error::AppError;

use crate::error::ApiError;

/// A JSON request body that has been deserialized and validated.
///
/// Malformed JSON, missing fields and rule violations are all rejected
/// with `InvalidParameter`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::invalid_parameter(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::invalid_parameter(errors.to_string()))?;

        Ok(Self(value))
    }
}
