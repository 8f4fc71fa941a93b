//! Checks shared by every provider dialect.

use chrono::NaiveDate;
use farelink_types::{
    FarelinkError, FlightSearchRequest, OfferPriceRequest, Segment, TripType, traits::Result,
};

/// Most providers cap a booking at nine seated passengers.
pub const MAX_SEATED_PASSENGERS: u32 = 9;

/// Multi-city searches accept at most this many legs.
pub const MAX_MULTI_CITY_SEGMENTS: usize = 6;

fn invalid(msg: impl Into<String>) -> FarelinkError {
    FarelinkError::Validation(msg.into())
}

fn check_iata(field: &str, code: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(invalid(format!(
            "{field} must be a 3-letter IATA code, got {code:?}"
        )))
    }
}

fn check_segment(index: usize, seg: &Segment) -> Result<()> {
    check_iata(&format!("segments[{index}].origin"), &seg.origin)?;
    check_iata(&format!("segments[{index}].destination"), &seg.destination)?;
    if seg.origin.eq_ignore_ascii_case(&seg.destination) {
        return Err(invalid(format!(
            "segments[{index}] origin and destination are both {}",
            seg.origin
        )));
    }
    NaiveDate::parse_from_str(&seg.departure_date, "%Y-%m-%d").map_err(|_| {
        invalid(format!(
            "segments[{index}].departure_date must be YYYY-MM-DD, got {:?}",
            seg.departure_date
        ))
    })?;
    Ok(())
}

/// # Errors
///
/// Returns [`FarelinkError::Validation`] describing the first problem found.
pub fn validate_search_request(req: &FlightSearchRequest) -> Result<()> {
    let pax = req.passengers;
    if pax.adults == 0 {
        return Err(invalid("at least one adult passenger is required"));
    }
    if pax.infants > pax.adults {
        return Err(invalid("each infant must travel with an adult"));
    }
    if pax.adults + pax.children > MAX_SEATED_PASSENGERS {
        return Err(invalid(format!(
            "at most {MAX_SEATED_PASSENGERS} seated passengers per search"
        )));
    }

    let n = req.segments.len();
    let ok = match req.trip_type {
        TripType::OneWay => n == 1,
        TripType::Return => n == 2,
        TripType::MultiCity => (2..=MAX_MULTI_CITY_SEGMENTS).contains(&n),
    };
    if !ok {
        return Err(invalid(format!(
            "{:?} trip cannot have {n} segment(s)",
            req.trip_type
        )));
    }

    for (i, seg) in req.segments.iter().enumerate() {
        check_segment(i, seg)?;
    }
    Ok(())
}

/// # Errors
///
/// Returns [`FarelinkError::Validation`] if the trace id or offer ids are blank.
pub fn validate_price_request(req: &OfferPriceRequest) -> Result<()> {
    if req.trace_id.trim().is_empty() {
        return Err(invalid("traceId must not be empty"));
    }
    if req.offer_ids.is_empty() {
        return Err(invalid("offerId must contain at least one offer"));
    }
    if req.offer_ids.iter().any(|o| o.trim().is_empty()) {
        return Err(invalid("offerId entries must not be empty"));
    }
    Ok(())
}
