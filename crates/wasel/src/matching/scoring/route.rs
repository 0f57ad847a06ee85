/// Origin and destination text for one side of a route comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
}

impl<'a> Leg<'a> {
    pub fn new(origin: &'a str, destination: &'a str) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Scores how well an offered route serves the requested one, on a 0-100 scale.
///
/// Implementations must be pure: the same legs always produce the same score.
pub trait RouteCompatibility: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, requested: Leg<'_>, offered: Leg<'_>) -> u8;
}

pub const BOTH_LEGS_MATCH: u8 = 100;
pub const ONE_LEG_MATCHES: u8 = 60;
pub const NO_LEG_MATCHES: u8 = 20;

/// Place-name containment heuristic. Not a distance measure.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextContainmentRoute;

impl RouteCompatibility for TextContainmentRoute {
    fn name(&self) -> &'static str {
        "text_containment"
    }

    fn score(&self, requested: Leg<'_>, offered: Leg<'_>) -> u8 {
        let origin_match = places_overlap(requested.origin, offered.origin);
        let destination_match = places_overlap(requested.destination, offered.destination);

        match (origin_match, destination_match) {
            (true, true) => BOTH_LEGS_MATCH,
            (true, false) | (false, true) => ONE_LEG_MATCHES,
            (false, false) => NO_LEG_MATCHES,
        }
    }
}

fn places_overlap(left: &str, right: &str) -> bool {
    let left = left.to_lowercase();
    let right = right.to_lowercase();
    left.contains(&right) || right.contains(&left)
}
