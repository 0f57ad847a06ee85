use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier shared by riders and drivers so the gate can detect self-owned trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for published trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TripId(pub String);

/// Lifecycle status reported by the trip store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Upcoming,
    Active,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TripStatus::Upcoming => "upcoming",
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Only trips that have not finished or been withdrawn can take riders.
    pub const fn is_bookable(self) -> bool {
        matches!(self, TripStatus::Upcoming | TripStatus::Active)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Some(Self::Upcoming),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Wasel is a one-way trip, Raje3 a there-and-back trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    #[default]
    Wasel,
    Raje3,
}

impl TripType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wasel" | "one_way" | "one-way" => Some(Self::Wasel),
            "raje3" | "round_trip" | "round-trip" => Some(Self::Raje3),
            _ => None,
        }
    }
}

/// How much talking a rider or driver is comfortable with during the ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationLevel {
    Quiet,
    #[default]
    Moderate,
    Chatty,
}

impl ConversationLevel {
    pub const fn ordinal(self) -> u8 {
        match self {
            ConversationLevel::Quiet => 0,
            ConversationLevel::Moderate => 1,
            ConversationLevel::Chatty => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quiet" => Some(Self::Quiet),
            "moderate" => Some(Self::Moderate),
            "chatty" => Some(Self::Chatty),
            _ => None,
        }
    }
}

/// Comfort preferences captured for both riders and published trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RidePreferences {
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub music: bool,
    #[serde(default)]
    pub pets: bool,
    #[serde(default)]
    pub conversation: ConversationLevel,
}

/// What the rider typed into the search form, plus their saved preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    pub rider_id: UserId,
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub trip_type: Option<TripType>,
    #[serde(default)]
    pub preferences: RidePreferences,
}

/// Trip record handed over by the trip store for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripCandidate {
    pub id: TripId,
    pub driver_id: UserId,
    pub status: TripStatus,
    pub origin: String,
    pub destination: String,
    /// Absent when the upstream record is incomplete; such trips are skipped during ranking.
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
    pub price_per_seat: f64,
    pub total_seats: u8,
    pub available_seats: u8,
    pub driver_rating: f64,
    #[serde(default)]
    pub driver_verified: bool,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub preferences: RidePreferences,
}

/// Normalized 0-100 sub-scores backing an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub route: u8,
    pub preferences: u8,
    pub rating: u8,
    pub price: u8,
    pub timing: u8,
}

/// Ranked, explained outcome for one admitted trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub trip_id: TripId,
    pub score: u8,
    pub factors: FactorBreakdown,
    pub reasons: Vec<String>,
}

impl MatchResult {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.score)
    }
}

/// Coarse presentation bucket for an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Low,
}

impl MatchTier {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => MatchTier::Excellent,
            60..=79 => MatchTier::Good,
            40..=59 => MatchTier::Fair,
            _ => MatchTier::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "Excellent Match",
            MatchTier::Good => "Good Match",
            MatchTier::Fair => "Fair Match",
            MatchTier::Low => "Low Match",
        }
    }
}
