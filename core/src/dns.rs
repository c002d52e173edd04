//! `namecheap.domains.dns.*` nameserver commands.
//!
//! These take the domain split into `SLD` and `TLD` rather than a single
//! `DomainName`.

use serde::Deserialize;

use crate::client::Command;
use crate::envelope::decode_payload;
use crate::error::ApiError;
use crate::http::Params;

pub const DNS_GET_LIST: &str = "namecheap.domains.dns.getList";
pub const DNS_SET_CUSTOM: &str = "namecheap.domains.dns.setCustom";

/// Split `example.co.uk` into `("example", "co.uk")`.
pub fn split_domain(domain: &str) -> Result<(&str, &str), ApiError> {
    match domain.trim().split_once('.') {
        Some((sld, tld)) if !sld.is_empty() && !tld.is_empty() => Ok((sld, tld)),
        _ => Err(ApiError::validation(
            "DomainName",
            format!("{domain:?} is not of the form sld.tld"),
        )),
    }
}

fn write_sld_tld(domain: &str, params: &mut Params) -> Result<(), ApiError> {
    let (sld, tld) = split_domain(domain)?;
    params.set("SLD", sld);
    params.set("TLD", tld);
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DnsNameservers {
    #[serde(rename = "@Domain")]
    pub domain: String,
    #[serde(rename = "@IsUsingOurDNS", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_using_our_dns: bool,
    #[serde(rename = "Nameserver", default)]
    pub nameservers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsGetList {
    pub domain_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct DnsGetListPayload {
    #[serde(rename = "DomainDNSGetListResult", default)]
    result: Option<DnsNameservers>,
}

impl Command for DnsGetList {
    const NAME: &'static str = DNS_GET_LIST;
    type Output = DnsNameservers;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        write_sld_tld(&self.domain_name, params)
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DnsGetListPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DnsSetCustomResult {
    #[serde(rename = "@Domain")]
    pub domain: String,
    #[serde(rename = "@Updated", alias = "@Update", default, deserialize_with = "crate::xml::lenient_bool")]
    pub updated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsSetCustom {
    pub domain_name: String,
    pub nameservers: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DnsSetCustomPayload {
    #[serde(rename = "DomainDNSSetCustomResult", default)]
    result: Option<DnsSetCustomResult>,
}

impl Command for DnsSetCustom {
    const NAME: &'static str = DNS_SET_CUSTOM;
    type Output = DnsSetCustomResult;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        if self.nameservers.iter().all(|ns| ns.trim().is_empty()) {
            return Err(ApiError::validation("Nameservers", "needs at least one nameserver"));
        }
        write_sld_tld(&self.domain_name, params)?;
        params.set("Nameservers", self.nameservers.join(","));
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DnsSetCustomPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.unwrap_or_default())
    }
}
