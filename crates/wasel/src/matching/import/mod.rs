mod parser;

use std::io::Read;
use std::path::Path;

use tracing::warn;

use super::domain::{
    ConversationLevel, RidePreferences, TripCandidate, TripId, TripStatus, TripType, UserId,
};
use parser::TripRow;

#[derive(Debug)]
pub enum TripImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { row: usize, detail: String },
}

impl std::fmt::Display for TripImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripImportError::Io(err) => write!(f, "failed to read trip export: {}", err),
            TripImportError::Csv(err) => write!(f, "invalid trip CSV data: {}", err),
            TripImportError::Row { row, detail } => {
                write!(f, "trip export row {}: {}", row, detail)
            }
        }
    }
}

impl std::error::Error for TripImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TripImportError::Io(err) => Some(err),
            TripImportError::Csv(err) => Some(err),
            TripImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for TripImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TripImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads candidate trips from a trip-store CSV export.
pub struct TripCsvImporter;

impl TripCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<TripCandidate>, TripImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<TripCandidate>, TripImportError> {
        parser::parse_rows(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, row)| candidate_from_row(index + 1, row))
            .collect()
    }
}

fn candidate_from_row(row_number: usize, row: TripRow) -> Result<TripCandidate, TripImportError> {
    let row_error = |detail: String| TripImportError::Row {
        row: row_number,
        detail,
    };

    let status = TripStatus::parse(&row.status)
        .ok_or_else(|| row_error(format!("unknown trip status '{}'", row.status)))?;

    let conversation = match row.conversation.as_deref() {
        Some(value) => ConversationLevel::parse(value)
            .ok_or_else(|| row_error(format!("unknown conversation level '{value}'")))?,
        None => ConversationLevel::default(),
    };

    let trip_type = match row.trip_type.as_deref() {
        Some(value) => TripType::parse(value)
            .ok_or_else(|| row_error(format!("unknown trip type '{value}'")))?,
        None => TripType::default(),
    };

    let departure_time = row.departure_time.as_deref().and_then(|raw| {
        let parsed = parser::parse_departure(raw);
        if parsed.is_none() {
            warn!(trip_id = %row.trip_id, value = raw, "unparseable departure time in trip export");
        }
        parsed
    });

    Ok(TripCandidate {
        id: TripId(row.trip_id),
        driver_id: UserId(row.driver_id),
        status,
        origin: row.origin,
        destination: row.destination,
        departure_time,
        price_per_seat: row.price_per_seat,
        total_seats: row.total_seats,
        available_seats: row.available_seats,
        driver_rating: row.driver_rating,
        driver_verified: row.driver_verified,
        trip_type,
        preferences: RidePreferences {
            smoking: row.smoking,
            music: row.music,
            pets: row.pets,
            conversation,
        },
    })
}
