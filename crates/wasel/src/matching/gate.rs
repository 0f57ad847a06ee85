use chrono::{DateTime, Utc};

use super::domain::{TripCandidate, UserId};

/// Drops trips a rider can never book: finished or withdrawn trips, full trips, and trips the
/// rider is driving themselves.
pub fn admit(candidates: Vec<TripCandidate>, rider: &UserId) -> Vec<TripCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| is_eligible(candidate, rider))
        .collect()
}

pub fn is_eligible(candidate: &TripCandidate, rider: &UserId) -> bool {
    candidate.status.is_bookable()
        && candidate.available_seats > 0
        && &candidate.driver_id != rider
}

/// Record-level defects that keep a single trip out of scoring.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MalformedCandidate {
    #[error("departure time is missing")]
    MissingDeparture,
    #[error("price per seat must be a finite, non-negative amount (found {0})")]
    InvalidPrice(f64),
    #[error("origin and destination are required")]
    BlankRoute,
    #[error("{available} seats available exceeds {total} total seats")]
    SeatCount { available: u8, total: u8 },
}

/// Returns the departure time of a candidate that is complete enough to score.
pub fn well_formed(candidate: &TripCandidate) -> Result<DateTime<Utc>, MalformedCandidate> {
    if candidate.origin.trim().is_empty() || candidate.destination.trim().is_empty() {
        return Err(MalformedCandidate::BlankRoute);
    }

    if !candidate.price_per_seat.is_finite() || candidate.price_per_seat < 0.0 {
        return Err(MalformedCandidate::InvalidPrice(candidate.price_per_seat));
    }

    if candidate.available_seats > candidate.total_seats {
        return Err(MalformedCandidate::SeatCount {
            available: candidate.available_seats,
            total: candidate.total_seats,
        });
    }

    candidate
        .departure_time
        .ok_or(MalformedCandidate::MissingDeparture)
}
