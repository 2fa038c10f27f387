use amigo_core::Session;
use amigo_shared::Masked;
use serde::{Deserialize, Serialize};

// ==== Auth ====

/// Body for both `/users/signup` and `/users/login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: Masked<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Masked::new(password.into()),
        }
    }
}

/// Login response. The deployed backend has drifted across revisions, so every
/// field is optional and `into_session` applies the same fallback chain the
/// login page used.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

impl LoginResponse {
    pub fn into_session(self, entered_username: &str) -> Session {
        match (self.username, self.user_id) {
            (Some(username), Some(user_id)) => Session::new(username, user_id),
            (_, user_id) => {
                // Fall back to the entered username when the API omits fields.
                let user_id = user_id
                    .or(self.id)
                    .unwrap_or_else(|| entered_username.to_string());
                Session::new(entered_username, user_id)
            }
        }
    }
}

// ==== Trips ====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planning,
    Consensus,
    Booking,
    Finalized,
}

/// Travel-preference ids offered by the create-trip form.
pub const TRAVEL_PREFERENCES: [&str; 4] = ["beach", "culture", "adventure", "food"];

/// Must-have amenity ids offered by the create-trip form.
pub const MUST_HAVE_AMENITIES: [&str; 4] = ["wifi", "pool", "nightlife", "shopping"];

#[derive(Debug, Clone, Serialize)]
pub struct CreateTripRequest {
    pub trip_name: String,
    pub user_id: String,
    pub date_ranges: Vec<String>,
    pub preferred_places: Vec<String>,
    pub budget: f64,
    pub preferences: Vec<String>,
    pub must_haves: Vec<String>,
}

impl CreateTripRequest {
    pub fn new(trip_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            trip_name: trip_name.into(),
            user_id: user_id.into(),
            date_ranges: Vec::new(),
            preferred_places: Vec::new(),
            budget: 0.0,
            preferences: Vec::new(),
            must_haves: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateTripResponse {
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub trip_name: Option<String>,
    #[serde(default)]
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripSummary {
    pub trip_id: String,
    pub trip_name: String,
    #[serde(default)]
    pub status: TripStatus,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinTripRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

// ==== Chat ====

/// One transcript entry as the backend sends it. The wire carries no message
/// id; `time` is the client-formatted clock string echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub trip_id: String,
    pub username: String,
    pub message: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusPayload>,
}

/// Body for `POST /chats`. Sends never carry a consensus payload.
#[derive(Debug, Clone, Serialize)]
pub struct SendChatRequest {
    pub trip_id: String,
    pub username: String,
    pub message: String,
    pub time: String,
}

// ==== Consensus ====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusStatus {
    MultipleCandidates,
    SingleCandidate,
    NoCandidates,
    ConsensusReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    Budget,
    MidRange,
    Luxury,
}

/// AI consensus attachment. Every field is defaulted: a half-filled payload
/// from the backend must never sink the whole transcript fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsensusPayload {
    #[serde(default)]
    pub status: Option<ConsensusStatus>,
    #[serde(default)]
    pub summary: Option<ConsensusSummary>,
    #[serde(default)]
    pub trip_id: Option<String>,
    #[serde(default)]
    pub candidates: Vec<ConsensusCandidate>,
    #[serde(default)]
    pub consensus_card: Option<ConsensusCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsensusSummary {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub preferred_places: Vec<String>,
    #[serde(default)]
    pub travel_preferences: Vec<String>,
    #[serde(default)]
    pub must_haves: Vec<String>,
}

/// One destination option. Older backend revisions sent `image` instead of
/// `image_url`; the alias accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusCandidate {
    pub place_name: String,
    #[serde(default, alias = "image")]
    pub image_url: String,
    #[serde(default)]
    pub budget: Option<BudgetTier>,
    #[serde(default)]
    pub best_time: Vec<String>,
    #[serde(default)]
    pub why_it_matches: Vec<String>,
}

/// The finalized plan. This part of the wire is camelCase, unlike the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusCard {
    pub trip_title: String,
    pub dates: TripDates,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    pub cost_estimate: CostEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDates {
    pub from: String,
    pub to: String,
    pub duration: String,
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnail: String,
}

/// Money amounts stay as display strings ("₹35,000"); parsing happens in the
/// booking crate when a total is actually needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub per_person: String,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub flight: String,
    pub stay: String,
    pub local_transport: String,
}

// ==== Bookings ====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub origin_code: String,
    pub dest_code: String,
    pub origin_city: String,
    pub dest_city: String,
    pub duration: String,
    pub airline: String,
    pub flight_code: String,
    pub cabin: String,
    pub price_current: String,
    #[serde(default)]
    pub price_strike: Option<String>,
    pub departure_time: String,
    pub arrival_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hotel {
    pub name: String,
    pub location: String,
    pub rating: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub price_per_night: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub stops: Vec<ItineraryStop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryStop {
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub distance: String,
}
