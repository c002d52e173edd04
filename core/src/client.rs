//! Stateless request builder and response parser for the Namecheap API.
//!
//! # Design
//! `NamecheapClient` holds only its validated `ClientConfig` and carries no
//! mutable state between calls. Every endpoint is a `Command`: it knows its
//! vendor name, writes its own parameters and decodes its own payload. The
//! client wraps those two halves with the shared work (auth injection, form
//! encoding, HTTP status check), and `call` glues them to a `Transport`.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Params, FORM_CONTENT_TYPE};
use crate::transport::Transport;

/// Parameter names the client owns. Caller values for these are replaced.
pub const RESERVED_PARAMS: [&str; 5] = ["ApiUser", "ApiKey", "UserName", "ClientIp", "Command"];

/// One vendor command: its name, its parameters and its decoded result.
pub trait Command {
    /// The `Command` parameter value, e.g. `namecheap.domains.getList`.
    const NAME: &'static str;

    type Output;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    /// Write command-specific parameters. Fails without side effects on
    /// invalid input so no request is built.
    fn write_params(&self, params: &mut Params) -> Result<(), ApiError>;

    /// Decode a response body to this command's result.
    fn decode(body: &str) -> Result<Self::Output, ApiError>;
}

/// Synchronous, stateless client for the Namecheap XML API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. `call` runs both around a `Transport`.
#[derive(Debug, Clone)]
pub struct NamecheapClient {
    config: ClientConfig,
}

impl NamecheapClient {
    /// Fails with `MissingConfig` when any credential or the endpoint is empty.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request for `command` carrying `params` plus the auth fields.
    pub fn build_request(&self, command: &str, method: HttpMethod, mut params: Params) -> HttpRequest {
        for key in RESERVED_PARAMS {
            if params.contains_key(key) {
                tracing::warn!(command, key, "caller supplied a reserved parameter; overriding");
            }
        }
        params.set("ApiUser", self.config.api_user.as_str());
        params.set("ApiKey", self.config.api_key.as_str());
        params.set("UserName", self.config.user_name.as_str());
        params.set("ClientIp", self.config.client_ip.as_str());
        params.set("Command", command);

        let encoded = params.encode();
        tracing::debug!(command, method = method.as_str(), params = params.len(), "built request");

        match method {
            HttpMethod::Get => HttpRequest {
                method,
                path: format!("{}?{encoded}", self.config.endpoint),
                headers: Vec::new(),
                body: None,
            },
            HttpMethod::Post => HttpRequest {
                method,
                path: self.config.endpoint.clone(),
                headers: vec![("content-type".to_string(), FORM_CONTENT_TYPE.to_string())],
                body: Some(encoded),
            },
        }
    }

    pub fn build<C: Command>(&self, command: &C) -> Result<HttpRequest, ApiError> {
        let mut params = Params::new();
        command.write_params(&mut params)?;
        Ok(self.build_request(C::NAME, command.method(), params))
    }

    pub fn parse<C: Command>(&self, response: HttpResponse) -> Result<C::Output, ApiError> {
        check_status(&response)?;
        C::decode(&response.body)
    }

    /// Build, execute through `transport`, and parse.
    pub fn call<C, T>(&self, transport: &T, command: &C) -> Result<C::Output, ApiError>
    where
        C: Command,
        T: Transport + ?Sized,
    {
        let request = self.build(command)?;
        let response = transport.execute(request)?;
        self.parse::<C>(response)
    }
}

/// Map non-2xx status codes to `HttpError`. The vendor reports its own
/// failures inside a 200 response, so anything else is a transport-level
/// problem.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
