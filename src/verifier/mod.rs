//! Outbound client for the BrightID verification network.
//!
//! One synchronous GET per verification attempt, no retry. The caller is
//! expected to have short-circuited already-verified profiles, which keeps
//! the flow idempotent under retry.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::profile::BrightIdNetwork;

/// Placeholders: `{network}` subdomain, `{app}` BrightID app id, `{profile}`
/// public profile id.
pub const DEFAULT_ENDPOINT_TEMPLATE: &str =
    "http://{network}.brightid.org/brightid/v6/verifications/{app}/{profile}";

#[derive(Debug, Error)]
pub enum VerifierError {
    /// The variation has no BrightID app registration; no call is made.
    #[error("Verification is not available for this social media variation")]
    Unavailable,
    /// BrightID answered with an error payload; surfaced to the caller
    /// unmodified.
    #[error("Verifier rejected the profile")]
    Rejected(Value),
    /// Network failure or a non-JSON body. Retryable.
    #[error("Verifier unreachable: {0}")]
    Unreachable(String),
}

#[derive(Clone)]
pub struct VerifierClient {
    inner: Client,
    endpoint_template: String,
    timeout: Duration,
}

impl VerifierClient {
    pub fn new(endpoint_template: &str, timeout: Duration) -> Result<Self> {
        assert!(
            !endpoint_template.is_empty(),
            "Verifier endpoint template must be provided"
        );
        assert!(
            timeout >= Duration::from_millis(100),
            "Timeout below 100ms is unsafe"
        );

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build verifier HTTP client")?;

        Ok(Self {
            inner: client,
            endpoint_template: endpoint_template.to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        assert!(
            self.timeout >= Duration::from_millis(100),
            "Timeout invariant broken"
        );
        self.timeout
    }

    /// Asks BrightID whether `profile_id` is linked under the variation's app
    /// registration. `app_id == None` fails immediately without any outbound
    /// call.
    pub async fn verify_app_link(
        &self,
        network: BrightIdNetwork,
        app_id: Option<&str>,
        profile_id: Uuid,
    ) -> Result<(), VerifierError> {
        let app_id = app_id.ok_or(VerifierError::Unavailable)?;
        let url = render_endpoint(&self.endpoint_template, network, app_id, profile_id);
        debug!("Verifier lookup: {url}");

        let response = self
            .inner
            .get(&url)
            .send()
            .await
            .map_err(|err| VerifierError::Unreachable(err.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|err| VerifierError::Unreachable(format!("non-JSON body: {err}")))?;

        interpret_verification_body(body)
    }
}

/// An `error` key anywhere in the top-level object means the verifier did not
/// confirm the link; the payload passes through to the caller unmodified.
pub fn interpret_verification_body(body: Value) -> Result<(), VerifierError> {
    match &body {
        Value::Object(map) if map.contains_key("error") => Err(VerifierError::Rejected(body)),
        Value::Object(_) => Ok(()),
        _ => Err(VerifierError::Unreachable(
            "verifier returned a non-object body".to_string(),
        )),
    }
}

pub fn render_endpoint(
    template: &str,
    network: BrightIdNetwork,
    app_id: &str,
    profile_id: Uuid,
) -> String {
    template
        .replace("{network}", network.as_str())
        .replace("{app}", app_id)
        .replace("{profile}", &profile_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_rendering() {
        let profile = Uuid::parse_str("a3bb189e-8bf9-3888-9912-ace4e6543002").expect("uuid");
        let url = render_endpoint(
            DEFAULT_ENDPOINT_TEMPLATE,
            BrightIdNetwork::Node,
            "twitter",
            profile,
        );
        assert_eq!(
            url,
            "http://node.brightid.org/brightid/v6/verifications/twitter/a3bb189e-8bf9-3888-9912-ace4e6543002"
        );
    }

    #[test]
    fn endpoint_rendering_uses_network_subdomain() {
        let profile = Uuid::nil();
        let url = render_endpoint(
            DEFAULT_ENDPOINT_TEMPLATE,
            BrightIdNetwork::App,
            "telegram",
            profile,
        );
        assert!(url.starts_with("http://app.brightid.org/"));
    }

    #[test]
    fn error_key_means_rejected() {
        let body = json!({"error": true, "errorMessage": "app id not linked"});
        match interpret_verification_body(body.clone()) {
            Err(VerifierError::Rejected(payload)) => assert_eq!(payload, body),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn object_without_error_key_is_linked() {
        let body = json!({"data": {"unique": true}});
        assert!(interpret_verification_body(body).is_ok());
    }

    #[test]
    fn non_object_body_is_unreachable() {
        assert!(matches!(
            interpret_verification_body(json!("oops")),
            Err(VerifierError::Unreachable(_))
        ));
        assert!(matches!(
            interpret_verification_body(json!(null)),
            Err(VerifierError::Unreachable(_))
        ));
    }

    #[tokio::test]
    async fn missing_app_id_makes_no_call() {
        let client = VerifierClient::new(DEFAULT_ENDPOINT_TEMPLATE, Duration::from_secs(3))
            .expect("client builds");
        let outcome = client
            .verify_app_link(BrightIdNetwork::Node, None, Uuid::nil())
            .await;
        assert!(matches!(outcome, Err(VerifierError::Unavailable)));
    }
}
