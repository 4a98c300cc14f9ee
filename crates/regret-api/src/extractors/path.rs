//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use regret_core::ReactionKind;
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Path extractor whose rejection renders as an [`ApiError`]
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

/// Path parameters of a reaction endpoint
#[derive(Debug, serde::Deserialize)]
pub struct ReactionPath {
    pub id: String,
    pub kind: String,
}

impl ReactionPath {
    /// Parse the reaction kind segment
    pub fn kind(&self) -> Result<ReactionKind, ApiError> {
        self.kind.parse().map_err(ApiError::invalid_path)
    }
}
