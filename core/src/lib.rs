//! Synchronous client core for the Namecheap XML API.
//!
//! # Overview
//! Builds form-encoded `HttpRequest` values and decodes the vendor's XML
//! `ApiResponse` envelope from `HttpResponse` values. The core never touches
//! the network itself (host-does-IO pattern); a `Transport` executes the
//! round-trip. The default `ureq` feature ships a blocking one.
//!
//! # Design
//! - `NamecheapClient` holds only its immutable `ClientConfig` and injects
//!   the auth parameters into every request.
//! - Each endpoint is a `Command` type that writes its own parameters and
//!   names its own payload shape; `envelope::decode_payload` handles status
//!   and error extraction for all of them.
//! - `Namecheap<T>` pairs a client with a transport and offers one method per
//!   endpoint.
//!
//! ```no_run
//! use namecheap_core::{ClientConfig, Namecheap};
//!
//! let config = ClientConfig::new("apiuser", "apikey", "203.0.113.7").sandbox();
//! let api = Namecheap::connect(config)?;
//! let (domains, paging) = api.domains_get_list(1, 20)?;
//! println!("{} of {} domains", domains.len(), paging.total_items);
//! # Ok::<(), namecheap_core::ApiError>(())
//! ```

pub mod address;
pub mod api;
pub mod client;
pub mod config;
pub mod dns;
pub mod domains;
pub mod envelope;
pub mod error;
pub mod http;
pub mod registrant;
pub mod transport;
mod xml;

pub use address::{AddressGetListResult, AddressInfo};
pub use api::Namecheap;
pub use client::{Command, NamecheapClient};
pub use config::{ClientConfig, PRODUCTION_ENDPOINT, SANDBOX_ENDPOINT};
pub use dns::{DnsNameservers, DnsSetCustomResult};
pub use domains::{
    DnsDetails, DomainCheckResult, DomainCreateOption, DomainCreateResult, DomainGetContactsResult,
    DomainGetListResult, DomainInfo, DomainRenewResult, DomainSetContactsResult, ListType, Paging,
    Whoisguard,
};
pub use error::{ApiError, ErrorEntry};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Params};
pub use registrant::{ContactInfo, ContactRole, Registrant};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
