use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::error::AppError;

/// Raw query pairs in request order. Repeated keys are kept; lookups see the
/// first occurrence.
#[derive(Debug)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::error!("Invalid query string: {}", rejection.body_text());
                AppError::InvalidQuery
            })?;

        Ok(Self(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(uri: &str) -> QueryParams {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        QueryParams::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn repeated_keys_resolve_to_first_value() {
        let params = extract("/x?id=1&id=2&name=a%20b").await;

        assert_eq!(params.first("id"), Some("1"));
        assert_eq!(params.first("name"), Some("a b"));
        assert_eq!(params.first("missing"), None);
    }

    #[tokio::test]
    async fn absent_query_is_empty() {
        let params = extract("/x").await;

        assert_eq!(params.first("id"), None);
    }
}
