//! Anonymous author extractor
//!
//! Stories, comments and votes are attributed to a client-held pseudonym sent
//! in the `x-anonymous-id` header. Requests without one get a fresh id, which
//! is echoed back so the client can keep it.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue},
    response::{IntoResponseParts, ResponseParts},
};
use regret_core::AnonymousId;

use crate::response::ApiError;

/// Header carrying the anonymous id, in both directions
pub const ANONYMOUS_ID_HEADER: &str = "x-anonymous-id";

/// Pseudonymous author of the current request
#[derive(Debug, Clone)]
pub struct AnonymousAuthor {
    pub id: AnonymousId,
    /// `true` when the request carried no id and one was generated
    pub generated: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for AnonymousAuthor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ANONYMOUS_ID_HEADER) else {
            return Ok(Self {
                id: AnonymousId::generate(),
                generated: true,
            });
        };

        let id = value
            .to_str()
            .map_err(|_| ApiError::InvalidHeader(format!("{ANONYMOUS_ID_HEADER} is not ASCII")))?
            .parse::<AnonymousId>()
            .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;

        Ok(Self {
            id,
            generated: false,
        })
    }
}

impl IntoResponseParts for AnonymousAuthor {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Ok(value) = HeaderValue::from_str(self.id.as_str()) {
            res.headers_mut()
                .insert(HeaderName::from_static(ANONYMOUS_ID_HEADER), value);
        }
        Ok(res)
    }
}
