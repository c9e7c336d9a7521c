use postboard_provider::ProviderError;

/// Result of a guarded fetch.
///
/// Separates "the server returned nothing" (`Data` with an empty list) from
/// "no request was made" and "the request failed".
#[derive(Debug, Clone)]
pub enum FetchOutcome<T> {
    /// Response decoded.
    Data(T),
    /// Required id was absent or zero; no request issued.
    Skipped,
    /// Request or decoding failed. Already logged.
    Failed(ProviderError),
}

impl<T> FetchOutcome<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn as_data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            Self::Data(data) => FetchOutcome::Data(f(data)),
            Self::Skipped => FetchOutcome::Skipped,
            Self::Failed(e) => FetchOutcome::Failed(e),
        }
    }
}
