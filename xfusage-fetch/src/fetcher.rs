//! Xfinity usage fetcher.
//!
//! One refresh is a single attempt at the portal's browser login flow:
//!
//! 1. GET the force-connect page and scrape the hidden `reqId` token
//! 2. POST the login form with the token and credentials
//! 3. GET the usage JSON with the session cookies from step 2
//!
//! Any step failing aborts the refresh and leaves the stored snapshot as it
//! was. The host's scheduler decides when to try again.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Response, StatusCode};
use tracing::{debug, error, info, instrument};
use xfusage_core::{Credentials, UsageSnapshot, UsageSource};

use crate::client::HttpClient;
use crate::endpoints::{PortalEndpoints, login_form};
use crate::error::{FetchError, LoginStep};
use crate::parser::{extract_req_id, parse_usage_response};

/// Session-holding fetcher for one portal account.
#[derive(Debug)]
pub struct XfinityUsageFetcher {
    http: HttpClient,
    endpoints: PortalEndpoints,
    credentials: Credentials,
    snapshot: Option<UsageSnapshot>,
    last_error: Option<String>,
    last_attempt: Option<DateTime<Utc>>,
}

impl XfinityUsageFetcher {
    /// Creates a fetcher against the given endpoints, usually
    /// [`PortalEndpoints::default`].
    ///
    /// Requests are restricted to the endpoints' hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn with_endpoints(
        credentials: Credentials,
        endpoints: PortalEndpoints,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = HttpClient::with_timeout(timeout)?.with_allowed_domains(endpoints.hosts()?);

        Ok(Self {
            http,
            endpoints,
            credentials,
            snapshot: None,
            last_error: None,
            last_attempt: None,
        })
    }

    /// Returns the account username.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Returns the message of the last failed refresh, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns when the last refresh was attempted.
    pub fn last_attempt(&self) -> Option<DateTime<Utc>> {
        self.last_attempt
    }

    /// Runs the full login-and-fetch sequence without touching stored state.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the sequence.
    #[instrument(skip(self), fields(user = %self.credentials.username()))]
    pub async fn fetch_snapshot(&self) -> Result<UsageSnapshot, FetchError> {
        let req_id = self.find_req_id().await?;
        self.login(&req_id).await?;
        let body = self.fetch_usage_body().await?;

        let snapshot = parse_usage_response(&body)?;
        debug!(
            total = snapshot.total_usage,
            allowed = snapshot.allowed_usage,
            unit = %snapshot.unit,
            "Received usage data"
        );
        Ok(snapshot)
    }

    async fn find_req_id(&self) -> Result<String, FetchError> {
        debug!("Finding reqId for login");
        let response = self.http.get(&self.endpoints.force_connect).await?;
        let response = expect_ok(response, LoginStep::Bootstrap)?;

        let html = response.text().await?;
        let req_id = extract_req_id(&html)?;
        debug!(req_id = %req_id, "Found reqId");
        Ok(req_id)
    }

    async fn login(&self, req_id: &str) -> Result<(), FetchError> {
        debug!("Posting to login");
        let form = login_form(&self.credentials, req_id);
        let response = self.http.post_form(&self.endpoints.login, &form).await?;
        expect_ok(response, LoginStep::Login)?;
        Ok(())
    }

    async fn fetch_usage_body(&self) -> Result<String, FetchError> {
        debug!("Fetching internet usage");
        let response = self.http.get(&self.endpoints.usage).await?;
        let response = expect_ok(response, LoginStep::Usage)?;

        let body = response.text().await?;
        debug!(body = %body, "Usage response");
        Ok(body)
    }
}

impl UsageSource for XfinityUsageFetcher {
    async fn refresh(&mut self) {
        self.last_attempt = Some(Utc::now());

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                info!(
                    total = snapshot.total_usage,
                    remaining = snapshot.remaining_usage,
                    unit = %snapshot.unit,
                    "Usage refreshed"
                );
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => {
                error!(error = %e, step = ?e.step(), "Usage refresh failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn snapshot(&self) -> Option<&UsageSnapshot> {
        self.snapshot.as_ref()
    }
}

/// Passes the response through if its status is exactly 200.
fn expect_ok(response: Response, step: LoginStep) -> Result<Response, FetchError> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(response)
    } else {
        Err(FetchError::UnexpectedStatus { step, status })
    }
}

// ============================================================================
// Tests
// ============================================================================
