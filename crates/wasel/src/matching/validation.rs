use super::domain::SearchIntent;
use super::scoring::MatchingConfig;

/// Validation errors raised before any candidate is scored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchValidationError {
    #[error("search origin is required")]
    MissingOrigin,
    #[error("search destination is required")]
    MissingDestination,
    #[error("max price must be a positive amount (found {0})")]
    InvalidPriceCap(f64),
}

/// Checks the intent and returns the price cap the price scorer should use.
pub(crate) fn validate_intent(
    intent: &SearchIntent,
    config: &MatchingConfig,
) -> Result<f64, SearchValidationError> {
    if intent.origin.trim().is_empty() {
        return Err(SearchValidationError::MissingOrigin);
    }
    if intent.destination.trim().is_empty() {
        return Err(SearchValidationError::MissingDestination);
    }

    match intent.max_price {
        Some(cap) if !cap.is_finite() || cap <= 0.0 => {
            Err(SearchValidationError::InvalidPriceCap(cap))
        }
        Some(cap) => Ok(cap),
        None => Ok(config.default_price_cap()),
    }
}
