//! Correlation identifier for one HTTP request.
//!
//! The `Trace` middleware puts a fresh [`TraceId`] into task-local storage
//! before the handler runs. Domain errors built anywhere under that request
//! pick it up through [`TraceId::current`], so an error response, its
//! `trace-id` header and the request's log lines all share one value.
//!
//! Task locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] to carry the identifier along.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Random UUID naming one request.
///
/// ```
/// use backend::domain::TraceId;
///
/// let id: TraceId = "6f1c1a8e-2d6b-4c1e-9a55-0c8f4b1d2e3f".parse().expect("uuid");
/// assert_eq!(id.to_string(), "6f1c1a8e-2d6b-4c1e-9a55-0c8f4b1d2e3f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being handled, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Await `fut` with `self` as the current identifier.
    pub async fn scope<Fut: Future>(self, fut: Fut) -> Fut::Output {
        CURRENT.scope(self, fut).await
    }

    /// Run `f` with `self` as the current identifier.
    pub fn sync_scope<R>(self, f: impl FnOnce() -> R) -> R {
        CURRENT.sync_scope(self, f)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn scope_exposes_the_identifier_to_awaited_code() {
        let id = TraceId::generate();
        let seen = id
            .scope(async {
                tokio::task::yield_now().await;
                TraceId::current()
            })
            .await;
        assert_eq!(seen, Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    fn sync_scope_is_visible_inside_only() {
        let id = TraceId::generate();
        assert_eq!(id.sync_scope(TraceId::current), Some(id));
        assert_eq!(TraceId::current(), None);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn rejects_non_uuid_text(#[case] raw: &str) {
        assert!(raw.parse::<TraceId>().is_err());
    }
}
