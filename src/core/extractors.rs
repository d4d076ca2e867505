//! Axum extractor for filter/sort request parameters
//!
//! Lets handlers take [`RequestParams`] directly:
//!
//! ```rust,ignore
//! async fn list_items(params: RequestParams) -> impl IntoResponse {
//!     let context = FilterContext::new(&schema, params);
//!     // ...
//! }
//! ```
//!
//! The query string is decoded into ordered pairs and grouped by the bracket
//! syntax (`filter[path]`, `filter[path][bound]`, `sort[]`). A query string
//! that cannot be decoded at all is rejected with `400 Bad Request`;
//! unrecognized keys are simply ignored.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::core::error::FilterError;
use crate::core::params::RequestParams;

impl<S> FromRequestParts<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = FilterError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|err| FilterError::InvalidQueryString {
                message: err.to_string(),
            })?;

        Ok(Self::from_pairs(pairs))
    }
}
