/// Outcome of a remote query as the presentation layer sees it.
///
/// Failures are terminal: nothing retries, the error text is shown as is.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Error(String),
    Data(T),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Loading
    }
}

impl<T> QueryState<T> {
    pub fn from_result(result: anyhow::Result<T>) -> Self {
        match result {
            Ok(data) => QueryState::Data(data),
            Err(err) => QueryState::Error(format!("{err:#}")),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            QueryState::Loading => QueryState::Loading,
            QueryState::Error(message) => QueryState::Error(message),
            QueryState::Data(data) => QueryState::Data(f(data)),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn errors_keep_their_context_chain() {
        let result: anyhow::Result<u8> = Err(anyhow!("connection refused")).context("fetching members");
        assert_eq!(
            QueryState::from_result(result),
            QueryState::Error("fetching members: connection refused".to_string())
        );
    }

    #[test]
    fn map_only_touches_data() {
        assert_eq!(QueryState::Data(2).map(|n| n * 10), QueryState::Data(20));
        assert!(QueryState::<u8>::default().map(|n| n + 1).is_loading());
        assert_eq!(QueryState::<u8>::Error("x".into()).data(), None);
    }
}
