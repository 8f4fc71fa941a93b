//! Canonical, provider-agnostic request shapes.
//!
//! Callers build these; they are never sent to a provider directly. Each
//! provider's translator turns them into its own payload dialect.

use serde::{Deserialize, Serialize};

/// Shape of the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    OneWay,
    Return,
    MultiCity,
}

/// Cabin class requested for every segment of the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

/// One leg of the journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// IATA airport or city code.
    pub origin: String,
    /// IATA airport or city code.
    pub destination: String,
    /// `YYYY-MM-DD`.
    pub departure_date: String,
}

/// Passenger counts by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passengers {
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
}

fn default_adults() -> u32 {
    1
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: default_adults(),
            children: 0,
            infants: 0,
        }
    }
}

/// A flight availability search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchRequest {
    pub trip_type: TripType,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub passengers: Passengers,
    #[serde(default)]
    pub cabin: CabinClass,
    /// Client IP forwarded to providers that require it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_user_ip: Option<String>,
}

impl FlightSearchRequest {
    /// Convenience constructor for a one-way trip.
    pub fn one_way(
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure_date: impl Into<String>,
    ) -> Self {
        Self {
            trip_type: TripType::OneWay,
            segments: vec![Segment {
                origin: origin.into(),
                destination: destination.into(),
                departure_date: departure_date.into(),
            }],
            passengers: Passengers::default(),
            cabin: CabinClass::Economy,
            end_user_ip: None,
        }
    }

    #[must_use]
    pub fn with_passengers(mut self, adults: u32, children: u32, infants: u32) -> Self {
        self.passengers = Passengers {
            adults,
            children,
            infants,
        };
        self
    }

    #[must_use]
    pub fn with_cabin(mut self, cabin: CabinClass) -> Self {
        self.cabin = cabin;
        self
    }
}

/// Re-price a previously returned offer before booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPriceRequest {
    /// Search session identifier returned by the provider's search call.
    pub trace_id: String,
    #[serde(rename = "offerId")]
    pub offer_ids: Vec<String>,
}
