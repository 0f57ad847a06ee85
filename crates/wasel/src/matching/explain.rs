use super::domain::{FactorBreakdown, TripCandidate};
use super::scoring::ReasonThresholds;

pub const MAX_REASONS: usize = 3;

/// Builds up to three advisory reasons in fixed priority order.
pub fn explain(
    candidate: &TripCandidate,
    factors: &FactorBreakdown,
    thresholds: &ReasonThresholds,
) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_REASONS);

    if factors.route >= thresholds.strong_route {
        reasons.push("route strongly matches".to_string());
    } else if factors.route >= thresholds.partial_route {
        reasons.push("route partially matches".to_string());
    }

    if factors.preferences >= thresholds.preference_fit {
        reasons.push("strong preference fit".to_string());
    }

    if candidate.driver_rating >= thresholds.driver_rating {
        reasons.push("highly rated driver".to_string());
    }

    if candidate.driver_verified {
        reasons.push("verified driver".to_string());
    }

    if factors.price >= thresholds.attractive_price {
        reasons.push("attractive price".to_string());
    }

    if candidate.available_seats >= thresholds.seats_available {
        reasons.push(format!("{} seats available", candidate.available_seats));
    }

    reasons.truncate(MAX_REASONS);
    reasons
}
