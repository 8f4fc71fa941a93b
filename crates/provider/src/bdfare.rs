//! BDFare client: stateless, every call carries the static `X-API-KEY`.

use crate::caller::ResilientCaller;
use async_trait::async_trait;
use farelink_config::{ProviderCredential, TimeoutConfig};
use farelink_translate::BdfareTranslator;
use farelink_types::{
    FlightProvider, FlightSearchRequest, HttpCall, OfferPriceRequest, Operation, ProviderId,
    RequestTranslator as _, traits::Result,
};
use secrecy::ExposeSecret as _;
use serde_json::{Value, json};
use std::sync::Arc;

const SEARCH_PATH: &str = "/AirShopping";
const PRICE_PATH: &str = "/OfferPrice";
const BALANCE_PATH: &str = "/GetBalance";

pub struct BdfareClient {
    credential: Arc<ProviderCredential>,
    caller: Arc<ResilientCaller>,
    timeouts: TimeoutConfig,
}

impl BdfareClient {
    pub fn new(
        credential: Arc<ProviderCredential>,
        caller: Arc<ResilientCaller>,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            credential,
            caller,
            timeouts,
        }
    }

    fn request(&self, path: &str, body: Value, op: Operation) -> HttpCall {
        HttpCall::post(format!("{}{path}", self.credential.base_url), body)
            .header("X-API-KEY", self.credential.api_key.expose_secret())
            .timeout(Some(self.timeouts.for_operation(op)))
    }

    async fn send(&self, path: &str, body: Value, op: Operation) -> Result<Value> {
        tracing::info!(provider = %ProviderId::Bdfare, operation = %op, "calling provider");
        self.caller.call(&self.request(path, body, op)).await
    }
}

#[async_trait]
impl FlightProvider for BdfareClient {
    fn id(&self) -> ProviderId {
        ProviderId::Bdfare
    }

    async fn search(&self, request: &FlightSearchRequest) -> Result<Value> {
        let body = BdfareTranslator.translate(request)?;
        self.send(SEARCH_PATH, body, Operation::Search).await
    }

    async fn price(&self, request: &OfferPriceRequest) -> Result<Value> {
        let body = BdfareTranslator.translate(request)?;
        self.send(PRICE_PATH, body, Operation::Price).await
    }

    async fn balance(&self) -> Result<Value> {
        self.send(BALANCE_PATH, json!({}), Operation::Balance).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        http_util::PrimaryTransport,
        test_support::{RecordingTransport, Reply, spawn_upstream, unreachable},
    };
    use farelink_types::{FarelinkError, Transport};
    use std::time::Duration;

    fn credential(base_url: &str) -> Arc<ProviderCredential> {
        Arc::new(ProviderCredential {
            provider: ProviderId::Bdfare,
            base_url: base_url.to_string(),
            api_key: "bdf-key".to_string().into(),
            username: None,
        })
    }

    fn client(base_url: &str, fallback: Option<Arc<dyn Transport>>) -> BdfareClient {
        let caller = ResilientCaller::new(Arc::new(PrimaryTransport::new()), fallback);
        BdfareClient::new(credential(base_url), Arc::new(caller), TimeoutConfig::default())
    }

    #[tokio::test]
    async fn test_one_way_search_passes_offers_through() {
        let offers = json!([
            {"offerId": "OF-1", "price": {"total": 5400, "currency": "BDT"}},
            {"offerId": "OF-2", "price": {"total": 6100, "currency": "BDT"}},
        ]);
        let up = spawn_upstream(vec![(SEARCH_PATH, Reply::json(200, offers.clone()))]).await;

        let req = FlightSearchRequest::one_way("DAC", "CXB", "2025-03-01").with_passengers(2, 0, 0);
        let got = client(up.base_url(), None).search(&req).await.unwrap();
        assert_eq!(got, offers);

        let hits = up.hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].header("x-api-key").as_deref(), Some("bdf-key"));
        assert!(hits[0].header("authorization").is_none());
        let sent = &hits[0].body["request"];
        assert_eq!(sent["pax"].as_array().unwrap().len(), 2);
        assert_eq!(
            sent["shoppingCriteria"]["travelPreferences"]["cabinCode"],
            "Economy"
        );
    }

    #[tokio::test]
    async fn test_invalid_search_never_reaches_provider() {
        let up = spawn_upstream(vec![(SEARCH_PATH, Reply::json(200, json!([])))]).await;
        let req = FlightSearchRequest::one_way("DAC", "DAC", "2025-03-01");
        let err = client(up.base_url(), None).search(&req).await.unwrap_err();
        assert!(matches!(err, FarelinkError::Validation(_)));
        assert!(up.hits().is_empty());
    }

    #[tokio::test]
    async fn test_offer_price_body_and_timeout() {
        let fallback = RecordingTransport::new(|| Ok(json!({"priced": true})));
        let caller = ResilientCaller::new(
            RecordingTransport::new(unreachable),
            Some(fallback.clone() as Arc<dyn Transport>),
        );
        let c = BdfareClient::new(
            credential("http://unused"),
            Arc::new(caller),
            TimeoutConfig::default(),
        );

        let req = OfferPriceRequest {
            trace_id: "trace-9".into(),
            offer_ids: vec!["OF-1".into()],
        };
        assert_eq!(c.price(&req).await.unwrap(), json!({"priced": true}));

        let calls = fallback.calls();
        assert_eq!(calls[0].url, "http://unused/OfferPrice");
        assert_eq!(calls[0].body, json!({"traceId": "trace-9", "offerId": ["OF-1"]}));
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(60)));
    }

    #[tokio::test]
    async fn test_balance_posts_empty_object() {
        let up = spawn_upstream(vec![(BALANCE_PATH, Reply::json(200, json!({"balance": 1200})))]).await;
        let got = client(up.base_url(), None).balance().await.unwrap();
        assert_eq!(got, json!({"balance": 1200}));
        assert_eq!(up.hits()[0].body, json!({}));
    }

    #[tokio::test]
    async fn test_provider_error_body_is_forwarded() {
        let up = spawn_upstream(vec![(
            SEARCH_PATH,
            Reply::json(404, json!({"error": "not found"})),
        )])
        .await;
        let fallback = RecordingTransport::new(|| Ok(json!("unused")));
        let req = FlightSearchRequest::one_way("DAC", "CXB", "2025-03-01");
        let err = client(up.base_url(), Some(fallback.clone() as Arc<dyn Transport>))
            .search(&req)
            .await
            .unwrap_err();
        assert!(matches!(err, FarelinkError::Provider { status: 404, .. }));
        assert!(fallback.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_search_times_out_into_fallback_with_default_config() {
        let up = spawn_upstream(vec![(
            SEARCH_PATH,
            Reply::json(200, json!([])).delayed(Duration::from_secs(600)),
        )])
        .await;
        let fallback = RecordingTransport::new(|| Ok(json!([{"offerId": "OF-F"}])));
        let req = FlightSearchRequest::one_way("DAC", "CXB", "2025-03-01");

        let got = client(up.base_url(), Some(fallback.clone() as Arc<dyn Transport>))
            .search(&req)
            .await
            .unwrap();
        assert_eq!(got, json!([{"offerId": "OF-F"}]));

        let calls = fallback.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, up.url(SEARCH_PATH));
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(30)));
    }
}
