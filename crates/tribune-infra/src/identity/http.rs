//! HTTP-backed identity verification.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use tribune_core::domain::Identity;
use tribune_core::ports::{AuthError, IdentityVerifier};

/// Configuration for the identity verification client.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Verifies bearer credentials against the identity service's profile
/// endpoint.
///
/// Holds one pooled client for the life of the process and makes one upstream
/// call per verification; results are never cached, so a revoked credential
/// stops working on the next request.
pub struct HttpIdentityVerifier {
    client: reqwest::Client,
    profile_url: String,
}

/// The slice of the profile payload the gateway cares about.
#[derive(Debug, Deserialize)]
struct VerifiedProfile {
    id: i64,
}

impl HttpIdentityVerifier {
    pub fn new(config: VerifierConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            profile_url: format!("{}/profile", config.base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .get(&self.profile_url)
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Credential rejected by identity service");
            return Err(AuthError::InvalidCredentials);
        }

        let profile: VerifiedProfile = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(e.to_string()))?;

        Ok(Identity { id: profile.id })
    }
}
