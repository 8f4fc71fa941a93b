//! FlyHub client: stateful, every call carries a bearer token obtained from
//! `/Authenticate` and cached by the shared [`AuthManager`].

use crate::caller::{FallbackPolicy, ResilientCaller};
use async_trait::async_trait;
use farelink_auth::{
    AuthManager,
    flyhub::{AUTHENTICATE_PATH, build_login_body, parse_token_response},
};
use farelink_config::{ProviderCredential, TimeoutConfig};
use farelink_translate::FlyhubTranslator;
use farelink_types::{
    Authenticator, FarelinkError, FlightProvider, FlightSearchRequest, HttpCall,
    OfferPriceRequest, Operation, ProviderId, RequestTranslator as _, traits::Result,
};
use secrecy::ExposeSecret as _;
use serde_json::{Value, json};
use std::sync::Arc;

const SEARCH_PATH: &str = "/AirSearch";
const PRICE_PATH: &str = "/AirPrice";
const BALANCE_PATH: &str = "/GetBalance";

fn username(credential: &ProviderCredential) -> Result<&str> {
    credential
        .username
        .as_deref()
        .ok_or_else(|| FarelinkError::Config("FlyHub credentials carry no username".into()))
}

/// Logs in to FlyHub with the static username and API key.
///
/// Falls back on any primary failure, not just unreachable hosts.
pub struct FlyhubAuthenticator {
    credential: Arc<ProviderCredential>,
    caller: Arc<ResilientCaller>,
    timeouts: TimeoutConfig,
}

impl FlyhubAuthenticator {
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
}

#[async_trait]
impl Authenticator for FlyhubAuthenticator {
    fn provider(&self) -> ProviderId {
        ProviderId::Flyhub
    }

    async fn authenticate(&self) -> Result<String> {
        let body = build_login_body(
            username(&self.credential)?,
            self.credential.api_key.expose_secret(),
        );
        let call = HttpCall::post(
            format!("{}{AUTHENTICATE_PATH}", self.credential.base_url),
            body,
        )
        .timeout(Some(self.timeouts.for_operation(Operation::Authenticate)));

        let resp = self.caller.call_with(&call, FallbackPolicy::AnyFailure).await?;
        parse_token_response(&resp)
    }
}

pub struct FlyhubClient {
    credential: Arc<ProviderCredential>,
    caller: Arc<ResilientCaller>,
    auth: Arc<AuthManager>,
    authenticator: FlyhubAuthenticator,
    timeouts: TimeoutConfig,
}

impl FlyhubClient {
    pub fn new(
        credential: Arc<ProviderCredential>,
        caller: Arc<ResilientCaller>,
        auth: Arc<AuthManager>,
        timeouts: TimeoutConfig,
    ) -> Self {
        let authenticator = FlyhubAuthenticator::new(
            Arc::clone(&credential),
            Arc::clone(&caller),
            timeouts.clone(),
        );
        Self {
            credential,
            caller,
            auth,
            authenticator,
            timeouts,
        }
    }

    /// Sends an authorised call. The token is resolved before anything goes
    /// out, so a failed login means no data call is made.
    async fn send(&self, path: &str, body: Value, op: Operation) -> Result<Value> {
        let token = self.auth.bearer_token(&self.authenticator).await?;
        tracing::info!(provider = %ProviderId::Flyhub, operation = %op, "calling provider");
        let call = HttpCall::post(format!("{}{path}", self.credential.base_url), body)
            .bearer(&token)
            .timeout(Some(self.timeouts.for_operation(op)));
        self.caller.call(&call).await
    }
}

#[async_trait]
impl FlightProvider for FlyhubClient {
    fn id(&self) -> ProviderId {
        ProviderId::Flyhub
    }

    async fn search(&self, request: &FlightSearchRequest) -> Result<Value> {
        let body = FlyhubTranslator.translate(request)?;
        self.send(SEARCH_PATH, body, Operation::Search).await
    }

    async fn price(&self, request: &OfferPriceRequest) -> Result<Value> {
        let body = FlyhubTranslator.translate(request)?;
        self.send(PRICE_PATH, body, Operation::Price).await
    }

    async fn balance(&self) -> Result<Value> {
        let body = json!({ "UserName": username(&self.credential)? });
        self.send(BALANCE_PATH, body, Operation::Balance).await
    }
}
