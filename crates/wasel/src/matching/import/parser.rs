use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw row from a trip-store CSV export; enum columns stay textual until mapped.
#[derive(Debug, Deserialize)]
pub(crate) struct TripRow {
    pub(crate) trip_id: String,
    pub(crate) driver_id: String,
    pub(crate) status: String,
    pub(crate) origin: String,
    pub(crate) destination: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) departure_time: Option<String>,
    pub(crate) price_per_seat: f64,
    pub(crate) total_seats: u8,
    pub(crate) available_seats: u8,
    pub(crate) driver_rating: f64,
    #[serde(default, deserialize_with = "flag")]
    pub(crate) driver_verified: bool,
    #[serde(default, deserialize_with = "flag")]
    pub(crate) smoking: bool,
    #[serde(default, deserialize_with = "flag")]
    pub(crate) music: bool,
    #[serde(default, deserialize_with = "flag")]
    pub(crate) pets: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) conversation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) trip_type: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<TripRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<TripRow>() {
        rows.push(record?);
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" => Ok(true),
        other => Err(serde::de::Error::custom(format!(
            "expected a yes/no flag, found '{other}'"
        ))),
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` values (read as UTC) and bare dates.
pub(crate) fn parse_departure(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}
