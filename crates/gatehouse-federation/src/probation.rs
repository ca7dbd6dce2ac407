//! Probation identity gateway.
//!
//! Calls the remote probation case management service. Every operation is
//! gated by the integration feature flag: when disabled, operations
//! return their empty result immediately with no network I/O.
//!
//! Degradation rules (uniform across operations):
//! - connectivity failure or remote 5xx surfaces as
//!   [`GatewayError::Unavailable`];
//! - 404 degrades to the empty result at debug level;
//! - 401 degrades to `false` at debug level (authenticate only);
//! - any other failure, including a malformed body, degrades to the
//!   empty result at warn level.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use gatehouse_core::config::ProbationConfig;
use gatehouse_identity::{ProbationIdentity, RoleMappings};

use crate::dto::{map_user_details, AuthRequest, PasswordChangeRequest, UserDetails};
use crate::error::{classify_status, GatewayError, GatewayResult, ResponseClass};

/// Service label used in unavailability errors and logs.
const SERVICE: &str = "probation service";

/// Gateway to the remote probation identity service.
///
/// Safe to share across concurrent authentication requests: it holds only
/// the HTTP client, the feature flag, and the immutable role mapping
/// table.
pub struct ProbationGateway {
    enabled: bool,
    base_url: String,
    client: reqwest::Client,
    role_mappings: RoleMappings,
}

impl ProbationGateway {
    /// Creates a gateway from configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Configuration`] if the HTTP client cannot
    /// be built.
    pub fn new(config: &ProbationConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connection_timeout)
            .timeout(config.read_timeout)
            .build()
            .map_err(|err| GatewayError::config(err.to_string()))?;

        Ok(Self {
            enabled: config.enabled,
            base_url: config.endpoint_url.trim_end_matches('/').to_string(),
            client,
            role_mappings: RoleMappings::from_config(&config.role_mappings),
        })
    }

    /// Whether the integration is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Looks up one probation user by username.
    ///
    /// The remote username is uppercased and the email lowercased before
    /// the identity is constructed.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the remote service cannot
    /// be reached or is erroring.
    pub async fn lookup_by_username(
        &self,
        username: &str,
    ) -> GatewayResult<Option<ProbationIdentity>> {
        if !self.enabled {
            debug!(username, "probation integration disabled, skipping lookup");
            return Ok(None);
        }

        let url = format!("{}/users/{username}/details", self.base_url);
        let details: Option<UserDetails> = self.get_json(&url, "user lookup").await?;
        Ok(details.map(|details| map_user_details(details, &self.role_mappings)))
    }

    /// Looks up all probation users holding the given email address.
    ///
    /// Remote systems may hold duplicate emails across accounts, so zero
    /// or more identities are returned.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the remote service cannot
    /// be reached or is erroring.
    pub async fn lookup_all_by_email(
        &self,
        email: &str,
    ) -> GatewayResult<Vec<ProbationIdentity>> {
        if !self.enabled {
            debug!(email, "probation integration disabled, skipping email lookup");
            return Ok(Vec::new());
        }

        let url = format!("{}/users/search/email/{email}/details", self.base_url);
        let results: Option<Vec<UserDetails>> = self.get_json(&url, "email lookup").await?;
        Ok(results
            .unwrap_or_default()
            .into_iter()
            .map(|details| map_user_details(details, &self.role_mappings))
            .collect())
    }

    /// Authenticates a probation user.
    ///
    /// A rejected credential is a normal outcome and returns `false`;
    /// only an unreachable or erroring service is an error.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the remote service cannot
    /// be reached or is erroring.
    pub async fn authenticate(&self, username: &str, password: &str) -> GatewayResult<bool> {
        if !self.enabled {
            debug!(
                username,
                "probation integration disabled, skipping authentication"
            );
            return Ok(false);
        }

        let url = format!("{}/authenticate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&AuthRequest { username, password })
            .send()
            .await
            .map_err(|err| GatewayError::unavailable(SERVICE, err.to_string()))?;

        match classify_status(response.status().as_u16()) {
            ResponseClass::Ok => Ok(true),
            ResponseClass::Unauthorized => {
                debug!(username, "probation credentials rejected");
                Ok(false)
            }
            ResponseClass::NotFound => {
                debug!(username, "probation user not found during authentication");
                Ok(false)
            }
            ResponseClass::ServerError => Err(GatewayError::unavailable(
                SERVICE,
                format!("authentication returned {}", response.status()),
            )),
            ResponseClass::OtherClient => {
                warn!(
                    username,
                    status = response.status().as_u16(),
                    "unexpected response authenticating probation user"
                );
                Ok(false)
            }
        }
    }

    /// Changes a probation user's password.
    ///
    /// ## Errors
    ///
    /// Returns [`GatewayError::Unavailable`] if the remote service cannot
    /// be reached or is erroring.
    pub async fn change_password(&self, username: &str, new_password: &str) -> GatewayResult<()> {
        if !self.enabled {
            debug!(
                username,
                "probation integration disabled, skipping password change"
            );
            return Ok(());
        }

        let url = format!("{}/users/{username}/password", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&PasswordChangeRequest {
                password: new_password,
            })
            .send()
            .await
            .map_err(|err| GatewayError::unavailable(SERVICE, err.to_string()))?;

        match classify_status(response.status().as_u16()) {
            ResponseClass::Ok => Ok(()),
            ResponseClass::NotFound => {
                debug!(username, "probation user not found during password change");
                Ok(())
            }
            ResponseClass::ServerError => Err(GatewayError::unavailable(
                SERVICE,
                format!("password change returned {}", response.status()),
            )),
            ResponseClass::Unauthorized | ResponseClass::OtherClient => {
                warn!(
                    username,
                    status = response.status().as_u16(),
                    "unexpected response changing probation password"
                );
                Ok(())
            }
        }
    }

    /// Performs a GET returning `Ok(None)` for every degradable failure
    /// and `Err(Unavailable)` when the service itself cannot answer.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        operation: &'static str,
    ) -> GatewayResult<Option<T>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| GatewayError::unavailable(SERVICE, err.to_string()))?;

        let status = response.status();
        match classify_status(status.as_u16()) {
            ResponseClass::Ok => match response.json::<T>().await {
                Ok(body) => Ok(Some(body)),
                Err(err) => {
                    warn!(operation, error = %err, "malformed probation response body");
                    Ok(None)
                }
            },
            ResponseClass::NotFound => {
                debug!(operation, "probation record not found");
                Ok(None)
            }
            ResponseClass::ServerError => Err(GatewayError::unavailable(
                SERVICE,
                format!("{operation} returned {status}"),
            )),
            ResponseClass::Unauthorized | ResponseClass::OtherClient => {
                warn!(
                    operation,
                    status = status.as_u16(),
                    "unexpected probation response"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(enabled: bool, endpoint_url: &str) -> ProbationConfig {
        ProbationConfig {
            enabled,
            endpoint_url: endpoint_url.to_string(),
            connection_timeout: Duration::from_millis(500),
            read_timeout: Duration::from_secs(2),
            role_mappings: HashMap::new(),
        }
    }

    /// Serves canned HTTP responses on a local port.
    async fn spawn_stub(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn disabled_gateway_skips_all_network_io() {
        // An unroutable endpoint: any attempted connection would fail,
        // so Ok results prove nothing was sent.
        let gateway = ProbationGateway::new(&config(false, "http://127.0.0.1:1")).unwrap();

        assert!(gateway.lookup_by_username("pjones").await.unwrap().is_none());
        assert!(gateway
            .lookup_all_by_email("pat@probation.example")
            .await
            .unwrap()
            .is_empty());
        assert!(!gateway.authenticate("pjones", "secret").await.unwrap());
        gateway.change_password("pjones", "newsecret").await.unwrap();
    }

    #[tokio::test]
    async fn connectivity_failure_is_unavailable() {
        let gateway = ProbationGateway::new(&config(true, "http://127.0.0.1:1")).unwrap();

        let error = gateway.lookup_by_username("pjones").await.unwrap_err();
        assert!(error.is_unavailable());

        let error = gateway.authenticate("pjones", "secret").await.unwrap_err();
        assert!(error.is_unavailable());
    }

    #[tokio::test]
    async fn not_found_degrades_to_empty() {
        let base = spawn_stub("404 Not Found", "{}").await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        assert!(gateway.lookup_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn server_error_is_unavailable() {
        let base = spawn_stub("500 Internal Server Error", "").await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        let error = gateway.lookup_by_username("pjones").await.unwrap_err();
        assert!(error.is_unavailable());
    }

    #[tokio::test]
    async fn other_client_error_degrades_to_empty() {
        let base = spawn_stub("403 Forbidden", "").await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        assert!(gateway.lookup_by_username("pjones").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_body_degrades_to_empty() {
        let base = spawn_stub("200 OK", "not json at all").await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        assert!(gateway.lookup_by_username("pjones").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn successful_lookup_canonicalizes_payload() {
        let base = spawn_stub(
            "200 OK",
            r#"{
                "userId": "018f4f3e-7f33-7b6a-b7a5-5d7fcb7a2f11",
                "username": "pjones",
                "surname": "Jones",
                "firstName": "Pat",
                "email": "Pat.Jones@Probation.Example",
                "enabled": true,
                "roles": []
            }"#,
        )
        .await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        let identity = gateway
            .lookup_by_username("pjones")
            .await
            .unwrap()
            .expect("identity");
        assert_eq!(identity.email(), "pat.jones@probation.example");

        let identity = gatehouse_identity::Identity::Probation(identity);
        assert_eq!(identity.username(), "PJONES");
        assert!(identity.authorities().contains("ROLE_PROBATION"));
    }

    #[tokio::test]
    async fn unauthorized_authentication_is_false_not_error() {
        let base = spawn_stub("401 Unauthorized", "").await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        assert!(!gateway.authenticate("pjones", "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn successful_authentication_is_true() {
        let base = spawn_stub("200 OK", "").await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        assert!(gateway.authenticate("pjones", "secret").await.unwrap());
    }

    #[tokio::test]
    async fn email_lookup_returns_all_matches() {
        let base = spawn_stub(
            "200 OK",
            r#"[
                {
                    "userId": "018f4f3e-7f33-7b6a-b7a5-5d7fcb7a2f11",
                    "username": "pjones",
                    "surname": "Jones",
                    "firstName": "Pat",
                    "email": "shared@probation.example",
                    "enabled": true,
                    "roles": []
                },
                {
                    "userId": "018f4f3e-7f33-7b6a-b7a5-5d7fcb7a2f12",
                    "username": "pjones2",
                    "surname": "Jones",
                    "firstName": "Pat",
                    "email": "shared@probation.example",
                    "enabled": false,
                    "roles": []
                }
            ]"#,
        )
        .await;
        let gateway = ProbationGateway::new(&config(true, &base)).unwrap();

        let identities = gateway
            .lookup_all_by_email("shared@probation.example")
            .await
            .unwrap();
        assert_eq!(identities.len(), 2);
    }
}
