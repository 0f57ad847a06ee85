use serde::{Deserialize, Serialize};

pub const DEFAULT_PRICE_CAP: f64 = 500.0;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative importance of each factor in the aggregate score.
///
/// Fields are private so a set that does not sum to 1.0 cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    route: f64,
    preferences: f64,
    rating: f64,
    price: f64,
    timing: f64,
}

impl ScoreWeights {
    pub fn new(
        route: f64,
        preferences: f64,
        rating: f64,
        price: f64,
        timing: f64,
    ) -> Result<Self, MatchingConfigError> {
        let named = [
            ("route", route),
            ("preferences", preferences),
            ("rating", rating),
            ("price", price),
            ("timing", timing),
        ];

        for (factor, weight) in named {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatchingConfigError::InvalidWeight { factor, weight });
            }
        }

        let sum: f64 = named.iter().map(|(_, weight)| weight).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchingConfigError::WeightSum { sum });
        }

        Ok(Self {
            route,
            preferences,
            rating,
            price,
            timing,
        })
    }

    pub fn route(&self) -> f64 {
        self.route
    }

    pub fn preferences(&self) -> f64 {
        self.preferences
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn timing(&self) -> f64 {
        self.timing
    }

    pub fn sum(&self) -> f64 {
        self.route + self.preferences + self.rating + self.price + self.timing
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            route: 0.35,
            preferences: 0.20,
            rating: 0.20,
            price: 0.15,
            timing: 0.10,
        }
    }
}

#[derive(Deserialize)]
struct RawWeights {
    route: f64,
    preferences: f64,
    rating: f64,
    price: f64,
    timing: f64,
}

impl<'de> Deserialize<'de> for ScoreWeights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawWeights::deserialize(deserializer)?;
        ScoreWeights::new(raw.route, raw.preferences, raw.rating, raw.price, raw.timing)
            .map_err(serde::de::Error::custom)
    }
}

/// Cut-offs used when attaching reason strings to a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReasonThresholds {
    pub strong_route: u8,
    pub partial_route: u8,
    pub preference_fit: u8,
    pub driver_rating: f64,
    pub attractive_price: u8,
    pub seats_available: u8,
}

impl Default for ReasonThresholds {
    fn default() -> Self {
        Self {
            strong_route: 80,
            partial_route: 60,
            preference_fit: 75,
            driver_rating: 4.5,
            attractive_price: 70,
            seats_available: 2,
        }
    }
}

/// Everything the ranking engine needs beyond its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingConfig {
    weights: ScoreWeights,
    default_price_cap: f64,
    reasons: ReasonThresholds,
}

impl MatchingConfig {
    pub fn new(
        weights: ScoreWeights,
        default_price_cap: f64,
        reasons: ReasonThresholds,
    ) -> Result<Self, MatchingConfigError> {
        if !default_price_cap.is_finite() || default_price_cap <= 0.0 {
            return Err(MatchingConfigError::InvalidPriceCap(default_price_cap));
        }

        Ok(Self {
            weights,
            default_price_cap,
            reasons,
        })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn default_price_cap(&self) -> f64 {
        self.default_price_cap
    }

    pub fn reasons(&self) -> &ReasonThresholds {
        &self.reasons
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            default_price_cap: DEFAULT_PRICE_CAP,
            reasons: ReasonThresholds::default(),
        }
    }
}

/// Rejected matching configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchingConfigError {
    #[error("weight for {factor} must be a finite, non-negative number (found {weight})")]
    InvalidWeight { factor: &'static str, weight: f64 },
    #[error("score weights must sum to 1.0 (found {sum})")]
    WeightSum { sum: f64 },
    #[error("default price cap must be a positive amount (found {0})")]
    InvalidPriceCap(f64),
}
