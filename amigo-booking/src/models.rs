use amigo_api::types::{Flight, Hotel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    Hotel,
    Flight,
}

impl BookingKind {
    /// Prefix used in booking references.
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            BookingKind::Hotel => "HTL",
            BookingKind::Flight => "FLT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingKind::Hotel => "hotel",
            BookingKind::Flight => "flight",
        }
    }
}

/// What the user picked from a carousel, projected down to the fields the
/// payment step needs. Prices stay as the backend's display strings until a
/// total is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingSelection {
    Hotel {
        name: String,
        price_per_night: String,
        travellers: u32,
    },
    Flight {
        name: String,
        price_per_person: String,
        passengers: u32,
    },
}

impl BookingSelection {
    pub fn from_hotel(hotel: &Hotel, travellers: u32) -> Self {
        Self::Hotel {
            name: hotel.name.clone(),
            price_per_night: hotel.price_per_night.clone(),
            travellers,
        }
    }

    pub fn from_flight(flight: &Flight, passengers: u32) -> Self {
        Self::Flight {
            name: format!("{} → {}", flight.origin_city, flight.dest_city),
            price_per_person: flight.price_current.clone(),
            passengers,
        }
    }

    pub fn kind(&self) -> BookingKind {
        match self {
            BookingSelection::Hotel { .. } => BookingKind::Hotel,
            BookingSelection::Flight { .. } => BookingKind::Flight,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BookingSelection::Hotel { name, .. } => name,
            BookingSelection::Flight { name, .. } => name,
        }
    }

    /// The unit-price line shown on the payment screen.
    pub fn price_display(&self) -> String {
        match self {
            BookingSelection::Hotel {
                price_per_night, ..
            } => format!("{}/night", price_per_night),
            BookingSelection::Flight {
                price_per_person, ..
            } => format!("{}/person", price_per_person),
        }
    }
}

/// Total carried from the details step into the payment step.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub total: f64,
    /// Set for hotel quotes; the room count the total was multiplied by.
    pub rooms: Option<u32>,
}
