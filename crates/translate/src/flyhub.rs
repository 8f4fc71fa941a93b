//! Canonical requests → FlyHub payloads.
//!
//! FlyHub uses PascalCase keys and numeric string codes for journey type and
//! cabin class. Pricing addresses a single result of a prior search.

use crate::validate::{validate_price_request, validate_search_request};
use farelink_types::{
    CabinClass, FarelinkError, FlightSearchRequest, OfferPriceRequest, RequestTranslator,
    TripType, traits::Result,
};
use serde_json::{Value, json};

/// Sent when the caller did not supply the traveller's IP.
pub const DEFAULT_END_USER_IP: &str = "127.0.0.1";

/// Translator from canonical requests to the FlyHub dialect.
pub struct FlyhubTranslator;

fn journey_type(t: TripType) -> &'static str {
    match t {
        TripType::OneWay => "1",
        TripType::Return => "2",
        TripType::MultiCity => "3",
    }
}

fn cabin_class(c: CabinClass) -> &'static str {
    match c {
        CabinClass::Economy => "1",
        CabinClass::PremiumEconomy => "2",
        CabinClass::Business => "3",
        CabinClass::First => "4",
    }
}

impl RequestTranslator<FlightSearchRequest> for FlyhubTranslator {
    fn translate(&self, req: &FlightSearchRequest) -> Result<Value> {
        validate_search_request(req)?;

        let cabin = cabin_class(req.cabin);
        let segments: Vec<Value> = req
            .segments
            .iter()
            .map(|s| {
                json!({
                    "Origin": s.origin.to_ascii_uppercase(),
                    "Destination": s.destination.to_ascii_uppercase(),
                    "CabinClass": cabin,
                    "DepartureDateTime": s.departure_date,
                })
            })
            .collect();

        Ok(json!({
            "AdultQuantity": req.passengers.adults,
            "ChildQuantity": req.passengers.children,
            "InfantQuantity": req.passengers.infants,
            "EndUserIp": req.end_user_ip.as_deref().unwrap_or(DEFAULT_END_USER_IP),
            "JourneyType": journey_type(req.trip_type),
            "Segments": segments,
        }))
    }
}

impl RequestTranslator<OfferPriceRequest> for FlyhubTranslator {
    fn translate(&self, req: &OfferPriceRequest) -> Result<Value> {
        validate_price_request(req)?;
        let [result_id] = req.offer_ids.as_slice() else {
            return Err(FarelinkError::Validation(format!(
                "FlyHub prices exactly one offer per call, got {}",
                req.offer_ids.len()
            )));
        };
        Ok(json!({
            "SearchId": req.trace_id,
            "ResultId": result_id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_way_two_adults_economy() {
        let req = FlightSearchRequest::one_way("DAC", "CGP", "2025-04-12").with_passengers(2, 0, 0);
        let out = FlyhubTranslator.translate(&req).unwrap();
        assert_eq!(out["AdultQuantity"], 2);
        assert_eq!(out["ChildQuantity"], 0);
        assert_eq!(out["InfantQuantity"], 0);
        assert_eq!(out["JourneyType"], "1");
        assert_eq!(out["EndUserIp"], DEFAULT_END_USER_IP);
        assert_eq!(out["Segments"][0]["Origin"], "DAC");
        assert_eq!(out["Segments"][0]["CabinClass"], "1");
        assert_eq!(out["Segments"][0]["DepartureDateTime"], "2025-04-12");
    }

    #[test]
    fn test_end_user_ip_forwarded() {
        let mut req = FlightSearchRequest::one_way("DAC", "CGP", "2025-04-12");
        req.end_user_ip = Some("203.0.113.9".into());
        let out = FlyhubTranslator.translate(&req).unwrap();
        assert_eq!(out["EndUserIp"], "203.0.113.9");
    }

    #[test]
    fn test_cabin_codes() {
        for (cabin, code) in [
            (CabinClass::Economy, "1"),
            (CabinClass::PremiumEconomy, "2"),
            (CabinClass::Business, "3"),
            (CabinClass::First, "4"),
        ] {
            let req = FlightSearchRequest::one_way("DAC", "CGP", "2025-04-12").with_cabin(cabin);
            let out = FlyhubTranslator.translate(&req).unwrap();
            assert_eq!(out["Segments"][0]["CabinClass"], code);
        }
    }

    #[test]
    fn test_price_single_offer() {
        let req = OfferPriceRequest {
            trace_id: "search-1".into(),
            offer_ids: vec!["result-7".into()],
        };
        let out = FlyhubTranslator.translate(&req).unwrap();
        assert_eq!(out, json!({"SearchId": "search-1", "ResultId": "result-7"}));
    }

    #[test]
    fn test_price_rejects_multiple_offers() {
        let req = OfferPriceRequest {
            trace_id: "search-1".into(),
            offer_ids: vec!["a".into(), "b".into()],
        };
        let err = FlyhubTranslator.translate(&req).unwrap_err();
        assert!(matches!(err, FarelinkError::Validation(_)));
    }
}
