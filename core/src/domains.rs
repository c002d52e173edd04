//! `namecheap.domains.*` commands and the records they return.
//!
//! Flat records whose fields all live in attributes of one element derive
//! `Deserialize` directly. Records assembled from several nested elements
//! (`DomainInfo`, `DomainRenewResult`, contacts) are decoded through private
//! wire structs that mirror the XML and then flattened.

use serde::Deserialize;

use crate::client::Command;
use crate::envelope::decode_payload;
use crate::error::ApiError;
use crate::http::Params;
use crate::registrant::{ContactInfo, Registrant};

pub const DOMAINS_GET_LIST: &str = "namecheap.domains.getList";
pub const DOMAINS_GET_INFO: &str = "namecheap.domains.getInfo";
pub const DOMAINS_CHECK: &str = "namecheap.domains.check";
pub const DOMAINS_CREATE: &str = "namecheap.domains.create";
pub const DOMAINS_RENEW: &str = "namecheap.domains.renew";
pub const DOMAINS_GET_CONTACTS: &str = "namecheap.domains.getContacts";
pub const DOMAINS_SET_CONTACTS: &str = "namecheap.domains.setContacts";

fn require_domain(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("DomainName", "cannot be empty"));
    }
    Ok(())
}

fn require_years(years: u32) -> Result<(), ApiError> {
    if years == 0 {
        return Err(ApiError::validation("Years", "must be at least 1"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// getList
// ---------------------------------------------------------------------------

/// One `<Domain>` row of `domains.getList`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomainGetListResult {
    #[serde(rename = "@ID")]
    pub id: u64,
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@User", default)]
    pub user: String,
    #[serde(rename = "@Created", default)]
    pub created: String,
    #[serde(rename = "@Expires", default)]
    pub expires: String,
    #[serde(rename = "@IsExpired", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_expired: bool,
    #[serde(rename = "@IsLocked", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_locked: bool,
    #[serde(rename = "@AutoRenew", default, deserialize_with = "crate::xml::lenient_bool")]
    pub auto_renew: bool,
    #[serde(rename = "@WhoisGuard", default)]
    pub whois_guard: String,
    #[serde(rename = "@IsPremium", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_premium: bool,
    #[serde(rename = "@IsOurDNS", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_our_dns: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Paging {
    #[serde(rename = "TotalItems", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub total_items: u32,
    #[serde(rename = "CurrentPage", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub current_page: u32,
    #[serde(rename = "PageSize", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    All,
    Expiring,
    Expired,
}

impl ListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::All => "ALL",
            ListType::Expiring => "EXPIRING",
            ListType::Expired => "EXPIRED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainsGetList {
    pub page: u32,
    pub page_size: u32,
    pub list_type: Option<ListType>,
    pub search_term: Option<String>,
}

impl DomainsGetList {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            list_type: None,
            search_term: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct DomainsGetListPayload {
    #[serde(rename = "DomainGetListResult", default)]
    result: DomainList,
    #[serde(rename = "Paging", default)]
    paging: Paging,
}

#[derive(Debug, Default, Deserialize)]
struct DomainList {
    #[serde(rename = "Domain", default)]
    domains: Vec<DomainGetListResult>,
}

impl Command for DomainsGetList {
    const NAME: &'static str = DOMAINS_GET_LIST;
    type Output = (Vec<DomainGetListResult>, Paging);

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        params.set("Page", self.page.to_string());
        params.set("PageSize", self.page_size.to_string());
        if let Some(list_type) = self.list_type {
            params.set("ListType", list_type.as_str());
        }
        if let Some(term) = self.search_term.as_deref().filter(|t| !t.is_empty()) {
            params.set("SearchTerm", term);
        }
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainsGetListPayload = decode_payload(body, Self::NAME)?;
        Ok((payload.result.domains, payload.paging))
    }
}

// ---------------------------------------------------------------------------
// getInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsDetails {
    pub provider_type: String,
    pub is_using_our_dns: bool,
    pub nameservers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whoisguard {
    /// Reported verbatim (`True`, `False`, `NotAlloted`...).
    pub enabled: String,
    pub id: u64,
    pub expired_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainInfo {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub status: String,
    pub created: String,
    pub expires: String,
    pub is_owner: bool,
    pub is_premium: bool,
    pub is_expired: bool,
    pub is_locked: bool,
    pub auto_renew: bool,
    pub dns_details: DnsDetails,
    pub whoisguard: Whoisguard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGetInfo {
    pub domain_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct DomainGetInfoPayload {
    #[serde(rename = "DomainGetInfoResult", default)]
    result: Option<WireDomainInfo>,
}

#[derive(Debug, Deserialize)]
struct WireDomainInfo {
    #[serde(rename = "@Status", default)]
    status: String,
    #[serde(rename = "@ID")]
    id: u64,
    #[serde(rename = "@DomainName")]
    domain_name: String,
    #[serde(rename = "@OwnerName", default)]
    owner_name: String,
    #[serde(rename = "@IsOwner", default, deserialize_with = "crate::xml::lenient_bool")]
    is_owner: bool,
    #[serde(rename = "@IsPremium", default, deserialize_with = "crate::xml::lenient_bool")]
    is_premium: bool,
    #[serde(rename = "@IsExpired", default, deserialize_with = "crate::xml::lenient_bool")]
    is_expired: bool,
    #[serde(rename = "@IsLocked", default, deserialize_with = "crate::xml::lenient_bool")]
    is_locked: bool,
    #[serde(rename = "@AutoRenew", default, deserialize_with = "crate::xml::lenient_bool")]
    auto_renew: bool,
    #[serde(rename = "DomainDetails", default)]
    details: WireDomainDetails,
    #[serde(rename = "Whoisguard", default)]
    whoisguard: WireWhoisguard,
    #[serde(rename = "DnsDetails", default)]
    dns: WireDnsDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDomainDetails {
    #[serde(rename = "CreatedDate")]
    created_date: String,
    #[serde(rename = "ExpiredDate")]
    expired_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireWhoisguard {
    #[serde(rename = "@Enabled")]
    enabled: String,
    #[serde(rename = "ID", default, deserialize_with = "crate::xml::zero_if_empty")]
    id: u64,
    #[serde(rename = "ExpiredDate")]
    expired_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireDnsDetails {
    #[serde(rename = "@ProviderType")]
    provider_type: String,
    #[serde(rename = "@IsUsingOurDNS", default, deserialize_with = "crate::xml::lenient_bool")]
    is_using_our_dns: bool,
    #[serde(rename = "Nameserver")]
    nameservers: Vec<String>,
}

impl From<WireDomainInfo> for DomainInfo {
    fn from(w: WireDomainInfo) -> Self {
        DomainInfo {
            id: w.id,
            name: w.domain_name,
            owner: w.owner_name,
            status: w.status,
            created: w.details.created_date,
            expires: w.details.expired_date,
            is_owner: w.is_owner,
            is_premium: w.is_premium,
            is_expired: w.is_expired,
            is_locked: w.is_locked,
            auto_renew: w.auto_renew,
            dns_details: DnsDetails {
                provider_type: w.dns.provider_type,
                is_using_our_dns: w.dns.is_using_our_dns,
                nameservers: w.dns.nameservers,
            },
            whoisguard: Whoisguard {
                enabled: w.whoisguard.enabled,
                id: w.whoisguard.id,
                expired_date: w.whoisguard.expired_date,
            },
        }
    }
}

impl Command for DomainGetInfo {
    const NAME: &'static str = DOMAINS_GET_INFO;
    type Output = DomainInfo;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        require_domain(&self.domain_name)?;
        params.set("DomainName", self.domain_name.as_str());
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainGetInfoPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.map(DomainInfo::from).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomainCheckResult {
    #[serde(rename = "@Domain")]
    pub domain: String,
    #[serde(rename = "@Available", default, deserialize_with = "crate::xml::lenient_bool")]
    pub available: bool,
    #[serde(rename = "@IsPremiumName", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_premium_name: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainsCheck {
    pub domains: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DomainsCheckPayload {
    #[serde(rename = "DomainCheckResult", default)]
    results: Vec<DomainCheckResult>,
}

impl Command for DomainsCheck {
    const NAME: &'static str = DOMAINS_CHECK;
    type Output = Vec<DomainCheckResult>;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        if self.domains.is_empty() {
            return Err(ApiError::validation("DomainList", "needs at least one domain"));
        }
        for domain in &self.domains {
            require_domain(domain)?;
        }
        params.set("DomainList", self.domains.join(","));
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainsCheckPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.results)
    }
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

/// Optional switches for `domains.create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainCreateOption {
    pub add_free_whoisguard: bool,
    pub wg_enabled: bool,
    /// Custom nameservers; the registrar's defaults are used when empty.
    pub nameservers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DomainCreateResult {
    #[serde(rename = "@Domain")]
    pub domain: String,
    #[serde(rename = "@Registered", default, deserialize_with = "crate::xml::lenient_bool")]
    pub registered: bool,
    #[serde(rename = "@ChargedAmount", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub charged_amount: f64,
    #[serde(rename = "@DomainID", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub domain_id: u64,
    #[serde(rename = "@OrderID", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub order_id: u64,
    #[serde(rename = "@TransactionID", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub transaction_id: u64,
    #[serde(rename = "@WhoisguardEnable", default, deserialize_with = "crate::xml::lenient_bool")]
    pub whoisguard_enable: bool,
    #[serde(rename = "@NonRealTimeDomain", default, deserialize_with = "crate::xml::lenient_bool")]
    pub non_real_time_domain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainCreate {
    pub domain_name: String,
    pub years: u32,
    pub registrant: Registrant,
    pub options: DomainCreateOption,
}

#[derive(Debug, Default, Deserialize)]
struct DomainCreatePayload {
    #[serde(rename = "DomainCreateResult", default)]
    result: Option<DomainCreateResult>,
}

impl Command for DomainCreate {
    const NAME: &'static str = DOMAINS_CREATE;
    type Output = DomainCreateResult;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        require_domain(&self.domain_name)?;
        require_years(self.years)?;
        self.registrant.write_params(params)?;

        params.set("DomainName", self.domain_name.as_str());
        params.set("Years", self.years.to_string());
        if self.options.add_free_whoisguard {
            params.set("AddFreeWhoisguard", "yes");
        }
        if self.options.wg_enabled {
            params.set("WGEnabled", "yes");
        }
        if !self.options.nameservers.is_empty() {
            params.set("Nameservers", self.options.nameservers.join(","));
        }
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainCreatePayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// renew
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainRenewResult {
    pub domain_id: u64,
    pub name: String,
    pub renewed: bool,
    pub charged_amount: f64,
    pub order_id: u64,
    pub transaction_id: u64,
    pub expire_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRenew {
    pub domain_name: String,
    pub years: u32,
}

#[derive(Debug, Default, Deserialize)]
struct DomainRenewPayload {
    #[serde(rename = "DomainRenewResult", default)]
    result: Option<WireRenew>,
}

#[derive(Debug, Deserialize)]
struct WireRenew {
    #[serde(rename = "@DomainName")]
    domain_name: String,
    #[serde(rename = "@DomainID", default, deserialize_with = "crate::xml::zero_if_empty")]
    domain_id: u64,
    #[serde(rename = "@Renew", default, deserialize_with = "crate::xml::lenient_bool")]
    renew: bool,
    #[serde(rename = "@OrderID", default, deserialize_with = "crate::xml::zero_if_empty")]
    order_id: u64,
    #[serde(rename = "@TransactionID", default, deserialize_with = "crate::xml::zero_if_empty")]
    transaction_id: u64,
    #[serde(rename = "@ChargedAmount", default, deserialize_with = "crate::xml::zero_if_empty")]
    charged_amount: f64,
    #[serde(rename = "DomainDetails", default)]
    details: WireDomainDetails,
}

impl From<WireRenew> for DomainRenewResult {
    fn from(w: WireRenew) -> Self {
        DomainRenewResult {
            domain_id: w.domain_id,
            name: w.domain_name,
            renewed: w.renew,
            charged_amount: w.charged_amount,
            order_id: w.order_id,
            transaction_id: w.transaction_id,
            expire_date: w.details.expired_date,
        }
    }
}

impl Command for DomainRenew {
    const NAME: &'static str = DOMAINS_RENEW;
    type Output = DomainRenewResult;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        require_domain(&self.domain_name)?;
        require_years(self.years)?;
        params.set("DomainName", self.domain_name.as_str());
        params.set("Years", self.years.to_string());
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainRenewPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.map(DomainRenewResult::from).unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// getContacts / setContacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainGetContactsResult {
    pub domain_id: u64,
    pub name: String,
    pub registrant: Registrant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGetContacts {
    pub domain_name: String,
}

#[derive(Debug, Default, Deserialize)]
struct DomainGetContactsPayload {
    #[serde(rename = "DomainContactsResult", default)]
    result: Option<WireContacts>,
}

// `WhoisGuardContact` repeats the role elements with proxy details; it is not
// declared here and is skipped.
#[derive(Debug, Deserialize)]
struct WireContacts {
    #[serde(rename = "@Domain")]
    domain: String,
    #[serde(rename = "@domainnameid", default, deserialize_with = "crate::xml::zero_if_empty")]
    domain_id: u64,
    #[serde(rename = "Registrant", default)]
    registrant: ContactInfo,
    #[serde(rename = "Tech", default)]
    tech: ContactInfo,
    #[serde(rename = "Admin", default)]
    admin: ContactInfo,
    #[serde(rename = "AuxBilling", default)]
    aux_billing: ContactInfo,
}

impl From<WireContacts> for DomainGetContactsResult {
    fn from(w: WireContacts) -> Self {
        DomainGetContactsResult {
            domain_id: w.domain_id,
            name: w.domain,
            registrant: Registrant {
                registrant: w.registrant,
                tech: w.tech,
                admin: w.admin,
                aux_billing: w.aux_billing,
            },
        }
    }
}

impl Command for DomainGetContacts {
    const NAME: &'static str = DOMAINS_GET_CONTACTS;
    type Output = DomainGetContactsResult;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        require_domain(&self.domain_name)?;
        params.set("DomainName", self.domain_name.as_str());
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainGetContactsPayload = decode_payload(body, Self::NAME)?;
        Ok(payload
            .result
            .map(DomainGetContactsResult::from)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomainSetContactsResult {
    #[serde(rename = "@Domain")]
    pub domain: String,
    #[serde(rename = "@IsSuccess", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSetContacts {
    pub domain_name: String,
    pub registrant: Registrant,
}

#[derive(Debug, Default, Deserialize)]
struct DomainSetContactsPayload {
    #[serde(rename = "DomainSetContactResult", default)]
    result: Option<DomainSetContactsResult>,
}

impl Command for DomainSetContacts {
    const NAME: &'static str = DOMAINS_SET_CONTACTS;
    type Output = DomainSetContactsResult;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        require_domain(&self.domain_name)?;
        self.registrant.write_params(params)?;
        params.set("DomainName", self.domain_name.as_str());
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: DomainSetContactsPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.unwrap_or_default())
    }
}
