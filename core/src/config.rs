//! Client configuration: credentials and the API endpoint.
//!
//! Values are fixed once a `NamecheapClient` is built from them; validation
//! happens in `NamecheapClient::new`, not per call.

use std::env;

use crate::error::ApiError;

pub const PRODUCTION_ENDPOINT: &str = "https://api.namecheap.com/xml.response";
pub const SANDBOX_ENDPOINT: &str = "https://api.sandbox.namecheap.com/xml.response";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_user: String,
    pub api_key: String,
    /// Account the commands act on. Usually the same as `api_user`.
    pub user_name: String,
    /// The whitelisted IPv4 address requests originate from.
    pub client_ip: String,
    pub endpoint: String,
}

impl ClientConfig {
    pub fn new(api_user: &str, api_key: &str, client_ip: &str) -> Self {
        Self {
            api_user: api_user.to_string(),
            api_key: api_key.to_string(),
            user_name: api_user.to_string(),
            client_ip: client_ip.to_string(),
            endpoint: PRODUCTION_ENDPOINT.to_string(),
        }
    }

    pub fn with_user_name(mut self, user_name: &str) -> Self {
        self.user_name = user_name.to_string();
        self
    }

    pub fn sandbox(self) -> Self {
        self.with_endpoint(SANDBOX_ENDPOINT)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Read the configuration from `NAMECHEAP_*` environment variables.
    ///
    /// `NAMECHEAP_API_USER`, `NAMECHEAP_API_KEY` and `NAMECHEAP_CLIENT_IP` are
    /// required. `NAMECHEAP_USER_NAME` defaults to the API user,
    /// `NAMECHEAP_SANDBOX=1` selects the sandbox and `NAMECHEAP_ENDPOINT`
    /// overrides both.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ApiError::MissingConfig(key))
        };

        let api_user = required("NAMECHEAP_API_USER")?;
        let api_key = required("NAMECHEAP_API_KEY")?;
        let client_ip = required("NAMECHEAP_CLIENT_IP")?;

        let mut config = Self::new(&api_user, &api_key, &client_ip);
        if let Some(user_name) = lookup("NAMECHEAP_USER_NAME").filter(|v| !v.is_empty()) {
            config = config.with_user_name(&user_name);
        }
        if lookup("NAMECHEAP_SANDBOX").is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true")) {
            config = config.sandbox();
        }
        if let Some(endpoint) = lookup("NAMECHEAP_ENDPOINT").filter(|v| !v.is_empty()) {
            config = config.with_endpoint(&endpoint);
        }
        Ok(config)
    }

    /// Reject any empty credential or endpoint.
    pub(crate) fn validate(&self) -> Result<(), ApiError> {
        let fields = [
            ("api_user", &self.api_user),
            ("api_key", &self.api_key),
            ("user_name", &self.user_name),
            ("client_ip", &self.client_ip),
            ("endpoint", &self.endpoint),
        ];
        match fields.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ApiError::MissingConfig(name)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn new_defaults_user_name_and_endpoint() {
        let config = ClientConfig::new("user", "key", "10.0.0.1");
        assert_eq!(config.user_name, "user");
        assert_eq!(config.endpoint, PRODUCTION_ENDPOINT);
        assert_eq!(config.sandbox().endpoint, SANDBOX_ENDPOINT);
    }

    #[test]
    fn trailing_slash_is_stripped_from_endpoint() {
        let config = ClientConfig::new("u", "k", "ip").with_endpoint("http://localhost:3000/xml.response/");
        assert_eq!(config.endpoint, "http://localhost:3000/xml.response");
    }

    #[test]
    fn validate_names_the_first_empty_field() {
        let config = ClientConfig::new("user", "", "10.0.0.1");
        assert!(matches!(config.validate(), Err(ApiError::MissingConfig("api_key"))));

        let config = ClientConfig::new("user", "key", " ");
        assert!(matches!(config.validate(), Err(ApiError::MissingConfig("client_ip"))));
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("NAMECHEAP_API_USER", "apiuser"),
            ("NAMECHEAP_API_KEY", "secret"),
            ("NAMECHEAP_CLIENT_IP", "192.168.1.109"),
            ("NAMECHEAP_USER_NAME", "account"),
            ("NAMECHEAP_SANDBOX", "true"),
        ]))
        .unwrap();
        assert_eq!(config.api_user, "apiuser");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.user_name, "account");
        assert_eq!(config.client_ip, "192.168.1.109");
        assert_eq!(config.endpoint, SANDBOX_ENDPOINT);
    }

    #[test]
    fn from_lookup_requires_credentials() {
        let err = ClientConfig::from_lookup(lookup(&[
            ("NAMECHEAP_API_USER", "apiuser"),
            ("NAMECHEAP_CLIENT_IP", "192.168.1.109"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ApiError::MissingConfig("NAMECHEAP_API_KEY")));
    }

    #[test]
    fn explicit_endpoint_overrides_sandbox() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("NAMECHEAP_API_USER", "u"),
            ("NAMECHEAP_API_KEY", "k"),
            ("NAMECHEAP_CLIENT_IP", "ip"),
            ("NAMECHEAP_SANDBOX", "1"),
            ("NAMECHEAP_ENDPOINT", "http://127.0.0.1:3000/xml.response"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:3000/xml.response");
    }
}
