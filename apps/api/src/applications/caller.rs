use std::convert::Infallible;
use std::fmt;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

pub const CALLER_HEADER: &str = "x-user-id";

/// Identity of whoever issued the request, taken from the `x-user-id` header
/// set by the auth gateway. Passed explicitly into services; nothing reads a
/// process-wide session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    Anonymous,
    User(String),
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caller::Anonymous => f.write_str("anonymous"),
            Caller::User(id) => f.write_str(id),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| Caller::User(id.to_string()))
            .unwrap_or(Caller::Anonymous);
        Ok(caller)
    }
}
