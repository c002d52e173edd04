//! Decoder for the `<ApiResponse>` envelope wrapping every Namecheap reply.
//!
//! # Design
//! Decoding runs in two passes over the same text. The first pass reads only
//! the envelope (status, errors, command type) and ignores the payload, so a
//! vendor error is reported even when the payload would not decode. The
//! second pass reads `<CommandResponse>` into the shape the caller asked for.
//!
//! ```xml
//! <ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
//!   <Errors />
//!   <RequestedCommand>namecheap.domains.check</RequestedCommand>
//!   <CommandResponse Type="namecheap.domains.check">
//!     <DomainCheckResult Domain="example.com" Available="true" />
//!   </CommandResponse>
//! </ApiResponse>
//! ```

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, ErrorEntry};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "@Status")]
    status: String,
    #[serde(rename = "Errors", default)]
    errors: ErrorList,
    #[serde(rename = "CommandResponse", default)]
    command_response: Option<CommandHeader>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorList {
    #[serde(rename = "Error", default)]
    entries: Vec<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(rename = "@Number", default)]
    number: String,
    #[serde(rename = "$text", default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CommandHeader {
    #[serde(rename = "@Type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Body<P> {
    #[serde(rename = "CommandResponse", default)]
    command_response: Option<P>,
}

/// Decode `xml` as the response to `command`, returning the payload found
/// under `<CommandResponse>`.
///
/// A missing or empty payload yields `P::default()`.
pub fn decode_payload<P>(xml: &str, command: &str) -> Result<P, ApiError>
where
    P: DeserializeOwned + Default,
{
    let xml = xml.trim_start();
    let envelope: Envelope = quick_xml::de::from_str(xml)?;
    check_envelope(&envelope, command)?;

    let body: Body<P> = quick_xml::de::from_str(xml)?;
    tracing::debug!(command, "decoded response payload");
    Ok(body.command_response.unwrap_or_default())
}

fn check_envelope(envelope: &Envelope, command: &str) -> Result<(), ApiError> {
    let errors: Vec<ErrorEntry> = envelope
        .errors
        .entries
        .iter()
        .map(|e| ErrorEntry {
            code: e.number.trim().to_string(),
            message: e.message.trim().to_string(),
        })
        .collect();

    if !envelope.status.trim().eq_ignore_ascii_case("OK") || !errors.is_empty() {
        let (code, message) = match errors.first() {
            Some(first) => (first.code.clone(), first.message.clone()),
            None => (
                String::new(),
                format!("response status {} without error details", envelope.status),
            ),
        };
        tracing::warn!(command, %code, %message, "namecheap returned an error");
        return Err(ApiError::Api {
            code,
            message,
            errors,
        });
    }

    let kind = envelope
        .command_response
        .as_ref()
        .and_then(|c| c.kind.as_deref());
    if let Some(kind) = kind {
        if !kind.trim().eq_ignore_ascii_case(command) {
            return Err(ApiError::Decode(format!(
                "response is for command {kind}, expected {command}"
            )));
        }
    }
    Ok(())
}
