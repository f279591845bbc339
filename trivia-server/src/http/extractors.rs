//! Custom Axum extractors
//!
//! Rejections are converted into [`ApiError`] so malformed requests get the
//! same envelope as every other failure.

use std::convert::Infallible;

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use trivia_core::PageNumber;

use super::error::ApiError;

/// JSON body whose rejection is a 400 envelope
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Integer id from the single path segment.
///
/// Anything that is not an integer does not name a resource, so it is a 404.
pub struct ValidId(pub i32);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;

        raw.parse::<i32>()
            .map(Self)
            .map_err(|_| ApiError::NotFound(format!("'{}' is not an id", raw)))
    }
}

#[derive(Deserialize)]
struct PageParams {
    page: Option<String>,
}

/// `?page=N`, lenient: anything unparseable means page 1
pub struct PageQuery(pub PageNumber);

impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<PageParams>::try_from_uri(&parts.uri)
            .map(|Query(params)| PageNumber::parse(params.page.as_deref()))
            .unwrap_or_default();
        Ok(Self(page))
    }
}

/// Integer that clients may send as a JSON number or a numeric string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexibleInt(pub i32);

impl FlexibleInt {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()).map(Self),
            Value::String(s) => s.trim().parse().ok().map(Self),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for FlexibleInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| de::Error::custom("expected an integer or a numeric string"))
    }
}
