//! Store selector taken from the query string.

use axum::{async_trait, extract::FromRequestParts, extract::Query, http::request::Parts};
use serde::Deserialize;
use utoipa::IntoParams;

use common::{AppError, AppResult};
use domain::{DomainError, StoreKind};

/// Store selector for read and delete routes
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SelectorQuery {
    /// `mysql` or `mongodb`
    pub database: Option<String>,
}

/// Store named by `?database=`.
///
/// A query string that does not deserialize is answered like a missing
/// selector.
#[derive(Debug, Clone, Copy)]
pub struct Selector(pub StoreKind);

#[async_trait]
impl<S> FromRequestParts<S> for Selector
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = match Query::<SelectorQuery>::from_request_parts(parts, state).await {
            Ok(Query(query)) => query,
            Err(rejection) => {
                tracing::warn!("Unreadable query string: {}", rejection.body_text());
                return Err(DomainError::StoreUnspecified.into());
            }
        };

        resolve_store(query.database.as_deref()).map(Selector)
    }
}

/// Resolve a selector value, logging rejected ones.
pub fn resolve_store(selector: Option<&str>) -> AppResult<StoreKind> {
    StoreKind::from_selector(selector).map_err(|e| {
        tracing::warn!(selector = ?selector, "Rejected store selector");
        AppError::from(e)
    })
}

#[cfg(test)]
mod tests {
    use axum::http;

    use super::*;

    async fn extract(uri: &str) -> AppResult<Selector> {
        let (mut parts, _) = http::Request::builder().uri(uri).body(()).unwrap().into_parts();
        Selector::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_known_selectors() {
        assert_eq!(extract("/x?database=mysql").await.unwrap().0, StoreKind::Relational);
        assert_eq!(extract("/x?database=mongodb").await.unwrap().0, StoreKind::Document);
    }

    #[tokio::test]
    async fn test_missing_selector() {
        let result = extract("/x").await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == domain::MSG_STORE_UNSPECIFIED));
    }

    #[tokio::test]
    async fn test_duplicate_selector_reads_as_unspecified() {
        let result = extract("/x?database=mysql&database=mongodb").await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg == domain::MSG_STORE_UNSPECIFIED));
    }
}
