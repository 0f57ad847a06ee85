use chrono::{DateTime, Utc};

use super::super::domain::{FactorBreakdown, RidePreferences};

const MAX_RATING: f64 = 5.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

const TOO_SOON_HOURS: f64 = 2.0;
const IDEAL_WINDOW_HOURS: f64 = 24.0;
const NEAR_TERM_HOURS: f64 = 72.0;

const DEPARTED_SCORE: f64 = 0.0;
const TOO_SOON_SCORE: f64 = 50.0;
const IDEAL_SCORE: f64 = 100.0;
const NEAR_TERM_SCORE: f64 = 70.0;
const FAR_OUT_SCORE: f64 = 40.0;

/// Unrounded 0-100 factor scores. The aggregate is taken from these; callers only ever see the
/// rounded [`FactorBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub route: f64,
    pub preferences: f64,
    pub rating: f64,
    pub price: f64,
    pub timing: f64,
}

impl FactorScores {
    pub fn rounded(&self) -> FactorBreakdown {
        FactorBreakdown {
            route: to_percent(self.route),
            preferences: to_percent(self.preferences),
            rating: to_percent(self.rating),
            price: to_percent(self.price),
            timing: to_percent(self.timing),
        }
    }
}

/// Rounds a percentage to the nearest integer and clamps it into 0-100.
pub(crate) fn to_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

pub(crate) fn preference_score(rider: &RidePreferences, trip: &RidePreferences) -> f64 {
    let mut points = 0.0;

    for (wanted, offered) in [
        (rider.smoking, trip.smoking),
        (rider.music, trip.music),
        (rider.pets, trip.pets),
    ] {
        if wanted == offered {
            points += 1.0;
        }
    }

    points += match rider
        .conversation
        .ordinal()
        .abs_diff(trip.conversation.ordinal())
    {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    };

    points / 4.0 * 100.0
}

pub(crate) fn rating_score(driver_rating: f64) -> f64 {
    if !driver_rating.is_finite() {
        return 0.0;
    }
    let rating = driver_rating.clamp(0.0, MAX_RATING);
    rating / MAX_RATING * 100.0
}

/// `price_cap` is validated positive before scoring starts.
pub(crate) fn price_score(price: f64, price_cap: f64) -> f64 {
    if price >= price_cap {
        return 0.0;
    }
    let price = price.max(0.0);
    (price_cap - price) / price_cap * 100.0
}

pub(crate) fn timing_score(departure: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = (departure - now).num_milliseconds() as f64 / MILLIS_PER_HOUR;

    if hours < 0.0 {
        DEPARTED_SCORE
    } else if hours < TOO_SOON_HOURS {
        TOO_SOON_SCORE
    } else if hours <= IDEAL_WINDOW_HOURS {
        IDEAL_SCORE
    } else if hours <= NEAR_TERM_HOURS {
        NEAR_TERM_SCORE
    } else {
        FAR_OUT_SCORE
    }
}
