//! Canonical requests → BDFare (NDC-flavoured) payloads.
//!
//! Search goes to `AirShopping`, pricing to `OfferPrice`.

use crate::validate::{validate_price_request, validate_search_request};
use farelink_types::{
    CabinClass, FlightSearchRequest, OfferPriceRequest, RequestTranslator, TripType,
    traits::Result,
};
use serde_json::{Value, json};

pub const POINT_OF_SALE: &str = "BD";

/// Translator from canonical requests to the BDFare dialect.
pub struct BdfareTranslator;

fn trip_type(t: TripType) -> &'static str {
    match t {
        TripType::OneWay => "Oneway",
        TripType::Return => "Return",
        TripType::MultiCity => "Circle",
    }
}

fn cabin_code(c: CabinClass) -> &'static str {
    match c {
        CabinClass::Economy => "Economy",
        CabinClass::PremiumEconomy => "PremiumEconomy",
        CabinClass::Business => "Business",
        CabinClass::First => "First",
    }
}

/// One `pax` entry per traveller, numbered `PAX1..` across all types.
fn build_pax(adults: u32, children: u32, infants: u32) -> Vec<Value> {
    [("ADT", adults), ("CHD", children), ("INF", infants)]
        .into_iter()
        .flat_map(|(ptc, n)| std::iter::repeat_n(ptc, n as usize))
        .enumerate()
        .map(|(i, ptc)| json!({ "paxID": format!("PAX{}", i + 1), "ptc": ptc }))
        .collect()
}

impl RequestTranslator<FlightSearchRequest> for BdfareTranslator {
    fn translate(&self, req: &FlightSearchRequest) -> Result<Value> {
        validate_search_request(req)?;

        let origin_dest: Vec<Value> = req
            .segments
            .iter()
            .map(|s| {
                json!({
                    "originDepRequest": {
                        "iatA_LocationCode": s.origin.to_ascii_uppercase(),
                        "date": s.departure_date,
                    },
                    "destArrivalRequest": {
                        "iatA_LocationCode": s.destination.to_ascii_uppercase(),
                    },
                })
            })
            .collect();

        let p = req.passengers;
        Ok(json!({
            "pointOfSale": POINT_OF_SALE,
            "request": {
                "originDest": origin_dest,
                "pax": build_pax(p.adults, p.children, p.infants),
                "shoppingCriteria": {
                    "tripType": trip_type(req.trip_type),
                    "travelPreferences": {
                        "vendorPref": [],
                        "cabinCode": cabin_code(req.cabin),
                    },
                    "returnUPSellInfo": true,
                },
            },
        }))
    }
}

impl RequestTranslator<OfferPriceRequest> for BdfareTranslator {
    fn translate(&self, req: &OfferPriceRequest) -> Result<Value> {
        validate_price_request(req)?;
        Ok(json!({
            "traceId": req.trace_id,
            "offerId": req.offer_ids,
        }))
    }
}
