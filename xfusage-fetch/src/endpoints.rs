//! Customer portal endpoints and the login form template.

use url::Url;
use xfusage_core::Credentials;

use crate::error::HttpError;

// ============================================================================
// Constants
// ============================================================================

/// Page that redirects to the login form carrying the `reqId` token.
pub const FORCE_CONNECT_URL: &str =
    "https://customer.xfinity.com/oauth/force_connect/?continue=%23%2Fdevices";

/// Login form target.
pub const LOGIN_URL: &str = "https://login.xfinity.com/login";

/// Internet usage JSON API.
pub const USAGE_URL: &str = "https://customer.xfinity.com/apis/services/internet/usage";

/// OAuth continuation the login form redirects to on success.
const LOGIN_CONTINUE: &str = "https://oauth.xfinity.com/oauth/authorize?client_id=my-account-web&prompt=login&redirect_uri=https%3A%2F%2Fcustomer.xfinity.com%2Foauth%2Fcallback&response_type=code&state=%23%2Fdevices&response=1";

const FORCE_CONNECT_PATH: &str = "/oauth/force_connect/?continue=%23%2Fdevices";
const LOGIN_PATH: &str = "/login";
const USAGE_PATH: &str = "/apis/services/internet/usage";

// ============================================================================
// Endpoints
// ============================================================================

/// The three URLs visited by a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalEndpoints {
    /// Bootstrap page with the hidden `reqId` input.
    pub force_connect: String,
    /// Login form target.
    pub login: String,
    /// Usage JSON API.
    pub usage: String,
}

impl Default for PortalEndpoints {
    fn default() -> Self {
        Self {
            force_connect: FORCE_CONNECT_URL.to_string(),
            login: LOGIN_URL.to_string(),
            usage: USAGE_URL.to_string(),
        }
    }
}

impl PortalEndpoints {
    /// Serves all three endpoints from one base URL, keeping the portal's paths.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            force_connect: format!("{base}{FORCE_CONNECT_PATH}"),
            login: format!("{base}{LOGIN_PATH}"),
            usage: format!("{base}{USAGE_PATH}"),
        }
    }

    /// Returns the distinct hosts of the endpoints.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::InvalidUrl` if an endpoint does not parse or has
    /// no host.
    pub fn hosts(&self) -> Result<Vec<String>, HttpError> {
        let mut hosts: Vec<String> = Vec::new();
        for endpoint in [&self.force_connect, &self.login, &self.usage] {
            let url = Url::parse(endpoint).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
            let host = url
                .host_str()
                .ok_or_else(|| HttpError::InvalidUrl(format!("No host in {endpoint}")))?;
            if !hosts.iter().any(|h| h == host) {
                hosts.push(host.to_string());
            }
        }
        Ok(hosts)
    }
}

// ============================================================================
// Login Form
// ============================================================================

/// Builds the login form fields posted to [`LOGIN_URL`].
pub fn login_form<'a>(credentials: &'a Credentials, req_id: &'a str) -> [(&'static str, &'a str); 12] {
    [
        ("user", credentials.username()),
        ("passwd", credentials.password()),
        ("reqId", req_id),
        ("deviceAuthn", "false"),
        ("s", "oauth"),
        ("forceAuthn", "1"),
        ("r", "comcast.net"),
        ("ipAddrAuthn", "false"),
        ("continue", LOGIN_CONTINUE),
        ("passive", "false"),
        ("client_id", "my-account-web"),
        ("lang", "en"),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hosts() {
        let hosts = PortalEndpoints::default().hosts().unwrap();
        assert_eq!(hosts, vec!["customer.xfinity.com", "login.xfinity.com"]);
    }

    #[test]
    fn test_with_base_url() {
        let endpoints = PortalEndpoints::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(
            endpoints.force_connect,
            "http://127.0.0.1:8080/oauth/force_connect/?continue=%23%2Fdevices"
        );
        assert_eq!(endpoints.login, "http://127.0.0.1:8080/login");
        assert_eq!(endpoints.usage, "http://127.0.0.1:8080/apis/services/internet/usage");
        assert_eq!(endpoints.hosts().unwrap(), vec!["127.0.0.1"]);
    }

    #[test]
    fn test_invalid_endpoint() {
        let endpoints = PortalEndpoints {
            login: "nope".to_string(),
            ..PortalEndpoints::default()
        };
        assert!(endpoints.hosts().is_err());
    }

    #[test]
    fn test_login_form_embeds_token_and_credentials() {
        let creds = Credentials::new("alice", "s3cret");
        let form = login_form(&creds, "tok-123");

        let get = |key: &str| form.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
        assert_eq!(get("user"), Some("alice"));
        assert_eq!(get("passwd"), Some("s3cret"));
        assert_eq!(get("reqId"), Some("tok-123"));
        assert_eq!(get("client_id"), Some("my-account-web"));
        assert!(get("continue").unwrap().starts_with("https://oauth.xfinity.com/oauth/authorize"));
    }
}
