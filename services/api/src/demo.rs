use crate::infra::{parse_date, parse_timestamp, InMemoryTripRepository};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use wasel::config::AppConfig;
use wasel::error::AppError;
use wasel::matching::{
    ConversationLevel, MatchResult, MatchingConfig, RidePreferences, SearchIntent, TripCandidate,
    TripCsvImporter, TripId, TripSearchService, TripStatus, TripType, UserId,
};
use wasel::telemetry;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Where the rider starts (matched by place-name containment)
    #[arg(long)]
    pub(crate) from: String,
    /// Where the rider is going
    #[arg(long)]
    pub(crate) to: String,
    /// Highest acceptable price per seat (defaults to the configured cap)
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
    /// Rider identifier; trips driven by this user are excluded
    #[arg(long, default_value = "cli-rider")]
    pub(crate) rider: String,
    /// Trip-store CSV export to rank
    #[arg(long)]
    pub(crate) trips: PathBuf,
    /// Only consider trips departing on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Evaluation time as RFC 3339 (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Rider is fine with smoking
    #[arg(long)]
    pub(crate) smoking: bool,
    /// Rider wants music
    #[arg(long)]
    pub(crate) music: bool,
    /// Rider travels with pets
    #[arg(long)]
    pub(crate) pets: bool,
    /// Preferred conversation level: quiet, moderate or chatty
    #[arg(long, value_parser = parse_conversation, default_value = "moderate")]
    pub(crate) conversation: ConversationLevel,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation time as RFC 3339 (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
}

fn parse_conversation(raw: &str) -> Result<ConversationLevel, String> {
    ConversationLevel::parse(raw)
        .ok_or_else(|| format!("'{raw}' is not one of quiet, moderate, chatty"))
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let RankArgs {
        from,
        to,
        max_price,
        rider,
        trips,
        date,
        now,
        smoking,
        music,
        pets,
        conversation,
    } = args;

    let candidates = TripCsvImporter::from_path(&trips)?;
    let supplied = candidates.len();
    let intent = SearchIntent {
        rider_id: UserId(rider),
        origin: from,
        destination: to,
        date,
        max_price,
        trip_type: None,
        preferences: RidePreferences {
            smoking,
            music,
            pets,
            conversation,
        },
    };

    let now = now.unwrap_or_else(Utc::now);
    let matches = search(candidates, &intent, config.matching, now)?;
    render_matches(&intent, &matches, supplied, now);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(Utc::now);
    let trips = demo_trips(now);
    let supplied = trips.len();
    let intent = demo_intent();

    println!("Wasel trip matching demo");
    let matches = search(trips, &intent, MatchingConfig::default(), now)?;
    render_matches(&intent, &matches, supplied, now);

    Ok(())
}

fn search(
    trips: Vec<TripCandidate>,
    intent: &SearchIntent,
    config: MatchingConfig,
    now: DateTime<Utc>,
) -> Result<Vec<MatchResult>, AppError> {
    let repository = Arc::new(InMemoryTripRepository::with_trips(trips));
    let service = TripSearchService::new(repository, config);
    Ok(service.search(intent, now)?)
}

pub(crate) const DEMO_RIDER: &str = "rider-demo";

pub(crate) fn demo_intent() -> SearchIntent {
    SearchIntent {
        rider_id: UserId(DEMO_RIDER.to_string()),
        origin: "Dubai Marina".to_string(),
        destination: "Abu Dhabi".to_string(),
        date: None,
        max_price: Some(100.0),
        trip_type: None,
        preferences: RidePreferences {
            smoking: false,
            music: true,
            pets: false,
            conversation: ConversationLevel::Moderate,
        },
    }
}

struct DemoTrip {
    id: &'static str,
    driver: &'static str,
    status: TripStatus,
    origin: &'static str,
    destination: &'static str,
    hours_out: Option<i64>,
    price: f64,
    seats: (u8, u8),
    rating: f64,
    verified: bool,
    conversation: ConversationLevel,
    trip_type: TripType,
}

const DEMO_TRIPS: [DemoTrip; 8] = [
    DemoTrip {
        id: "trip-marina-corniche",
        driver: "driver-ahmed",
        status: TripStatus::Upcoming,
        origin: "Dubai Marina",
        destination: "Abu Dhabi Corniche",
        hours_out: Some(10),
        price: 50.0,
        seats: (4, 2),
        rating: 4.8,
        verified: true,
        conversation: ConversationLevel::Moderate,
        trip_type: TripType::Wasel,
    },
    DemoTrip {
        id: "trip-jbr-yas",
        driver: "driver-fatima",
        status: TripStatus::Upcoming,
        origin: "JBR, Dubai Marina",
        destination: "Yas Island, Abu Dhabi",
        hours_out: Some(30),
        price: 35.0,
        seats: (3, 3),
        rating: 4.6,
        verified: true,
        conversation: ConversationLevel::Chatty,
        trip_type: TripType::Raje3,
    },
    DemoTrip {
        id: "trip-downtown-ad",
        driver: "driver-omar",
        status: TripStatus::Active,
        origin: "Downtown Dubai",
        destination: "Abu Dhabi",
        hours_out: Some(1),
        price: 40.0,
        seats: (4, 1),
        rating: 4.2,
        verified: false,
        conversation: ConversationLevel::Quiet,
        trip_type: TripType::Wasel,
    },
    DemoTrip {
        id: "trip-marina-alain",
        driver: "driver-sara",
        status: TripStatus::Upcoming,
        origin: "Dubai Marina",
        destination: "Al Ain",
        hours_out: Some(96),
        price: 120.0,
        seats: (4, 4),
        rating: 3.9,
        verified: true,
        conversation: ConversationLevel::Moderate,
        trip_type: TripType::Wasel,
    },
    DemoTrip {
        id: "trip-cancelled",
        driver: "driver-khalid",
        status: TripStatus::Cancelled,
        origin: "Dubai Marina",
        destination: "Abu Dhabi",
        hours_out: Some(12),
        price: 30.0,
        seats: (4, 3),
        rating: 4.9,
        verified: true,
        conversation: ConversationLevel::Moderate,
        trip_type: TripType::Wasel,
    },
    DemoTrip {
        id: "trip-full",
        driver: "driver-layla",
        status: TripStatus::Upcoming,
        origin: "Dubai Marina",
        destination: "Abu Dhabi",
        hours_out: Some(8),
        price: 45.0,
        seats: (3, 0),
        rating: 5.0,
        verified: true,
        conversation: ConversationLevel::Moderate,
        trip_type: TripType::Wasel,
    },
    DemoTrip {
        id: "trip-own",
        driver: DEMO_RIDER,
        status: TripStatus::Upcoming,
        origin: "Dubai Marina",
        destination: "Abu Dhabi",
        hours_out: Some(6),
        price: 25.0,
        seats: (4, 3),
        rating: 4.7,
        verified: true,
        conversation: ConversationLevel::Moderate,
        trip_type: TripType::Wasel,
    },
    DemoTrip {
        id: "trip-unscheduled",
        driver: "driver-yousef",
        status: TripStatus::Upcoming,
        origin: "Dubai Marina",
        destination: "Abu Dhabi",
        hours_out: None,
        price: 20.0,
        seats: (4, 4),
        rating: 4.4,
        verified: false,
        conversation: ConversationLevel::Moderate,
        trip_type: TripType::Wasel,
    },
];

/// Sample pool covering every gate rule plus one record without a departure time.
pub(crate) fn demo_trips(now: DateTime<Utc>) -> Vec<TripCandidate> {
    DEMO_TRIPS
        .iter()
        .map(|trip| TripCandidate {
            id: TripId(trip.id.to_string()),
            driver_id: UserId(trip.driver.to_string()),
            status: trip.status,
            origin: trip.origin.to_string(),
            destination: trip.destination.to_string(),
            departure_time: trip.hours_out.map(|hours| now + Duration::hours(hours)),
            price_per_seat: trip.price,
            total_seats: trip.seats.0,
            available_seats: trip.seats.1,
            driver_rating: trip.rating,
            driver_verified: trip.verified,
            trip_type: trip.trip_type,
            preferences: RidePreferences {
                smoking: false,
                music: true,
                pets: false,
                conversation: trip.conversation,
            },
        })
        .collect()
}

fn render_matches(
    intent: &SearchIntent,
    matches: &[MatchResult],
    supplied: usize,
    now: DateTime<Utc>,
) {
    println!(
        "Search: {} -> {} for {} (evaluated {})",
        intent.origin,
        intent.destination,
        intent.rider_id.0,
        now.to_rfc3339()
    );
    match intent.max_price {
        Some(cap) => println!("Price cap: {cap:.2} per seat"),
        None => println!("Price cap: configured default"),
    }

    if matches.is_empty() {
        println!("\nNo eligible trips among {supplied} supplied");
        return;
    }

    println!("\nRanked {} of {} supplied trips", matches.len(), supplied);
    for (position, result) in matches.iter().enumerate() {
        let factors = &result.factors;
        println!(
            "{}. {} | score {} ({})",
            position + 1,
            result.trip_id.0,
            result.score,
            result.tier().label()
        );
        println!(
            "   route {} | preferences {} | rating {} | price {} | timing {}",
            factors.route, factors.preferences, factors.rating, factors.price, factors.timing
        );
        if !result.reasons.is_empty() {
            println!("   why: {}", result.reasons.join("; "));
        }
    }
}
