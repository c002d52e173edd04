//! `Namecheap`: a `NamecheapClient` paired with a `Transport`, exposing one
//! method per endpoint.

use crate::address::{AddressGetInfo, AddressGetList, AddressGetListResult, AddressInfo};
use crate::client::{Command, NamecheapClient};
use crate::config::ClientConfig;
use crate::dns::{DnsGetList, DnsNameservers, DnsSetCustom, DnsSetCustomResult};
use crate::domains::{
    DomainCheckResult, DomainCreate, DomainCreateOption, DomainCreateResult, DomainGetContacts,
    DomainGetContactsResult, DomainGetInfo, DomainGetListResult, DomainInfo, DomainRenew,
    DomainRenewResult, DomainSetContacts, DomainSetContactsResult, DomainsCheck, DomainsGetList,
    Paging,
};
use crate::error::ApiError;
use crate::registrant::Registrant;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Namecheap<T> {
    client: NamecheapClient,
    transport: T,
}

#[cfg(feature = "ureq")]
impl Namecheap<crate::transport::UreqTransport> {
    /// Client over a default blocking `ureq` transport.
    pub fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        Self::new(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> Namecheap<T> {
    pub fn new(config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        Ok(Self {
            client: NamecheapClient::new(config)?,
            transport,
        })
    }

    pub fn client(&self) -> &NamecheapClient {
        &self.client
    }

    /// Run any command, including ones built by hand.
    pub fn call<C: Command>(&self, command: &C) -> Result<C::Output, ApiError> {
        self.client.call(&self.transport, command)
    }

    pub fn domains_get_list(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<DomainGetListResult>, Paging), ApiError> {
        self.call(&DomainsGetList::new(page, page_size))
    }

    pub fn domain_get_info(&self, domain_name: &str) -> Result<DomainInfo, ApiError> {
        self.call(&DomainGetInfo {
            domain_name: domain_name.to_string(),
        })
    }

    /// Availability of each name, in the order given.
    pub fn domains_check<S: AsRef<str>>(&self, domains: &[S]) -> Result<Vec<DomainCheckResult>, ApiError> {
        self.call(&DomainsCheck {
            domains: domains.iter().map(|d| d.as_ref().to_string()).collect(),
        })
    }

    pub fn domain_create(
        &self,
        domain_name: &str,
        years: u32,
        registrant: &Registrant,
        options: DomainCreateOption,
    ) -> Result<DomainCreateResult, ApiError> {
        self.call(&DomainCreate {
            domain_name: domain_name.to_string(),
            years,
            registrant: registrant.clone(),
            options,
        })
    }

    pub fn domain_renew(&self, domain_name: &str, years: u32) -> Result<DomainRenewResult, ApiError> {
        self.call(&DomainRenew {
            domain_name: domain_name.to_string(),
            years,
        })
    }

    pub fn domain_get_contacts(&self, domain_name: &str) -> Result<DomainGetContactsResult, ApiError> {
        self.call(&DomainGetContacts {
            domain_name: domain_name.to_string(),
        })
    }

    pub fn domain_set_contacts(
        &self,
        domain_name: &str,
        registrant: &Registrant,
    ) -> Result<DomainSetContactsResult, ApiError> {
        self.call(&DomainSetContacts {
            domain_name: domain_name.to_string(),
            registrant: registrant.clone(),
        })
    }

    pub fn dns_get_list(&self, domain_name: &str) -> Result<DnsNameservers, ApiError> {
        self.call(&DnsGetList {
            domain_name: domain_name.to_string(),
        })
    }

    pub fn dns_set_custom<S: AsRef<str>>(
        &self,
        domain_name: &str,
        nameservers: &[S],
    ) -> Result<DnsSetCustomResult, ApiError> {
        self.call(&DnsSetCustom {
            domain_name: domain_name.to_string(),
            nameservers: nameservers.iter().map(|n| n.as_ref().to_string()).collect(),
        })
    }

    pub fn address_get_list(&self) -> Result<Vec<AddressGetListResult>, ApiError> {
        self.call(&AddressGetList)
    }

    pub fn address_get_info(&self, address_id: u64) -> Result<AddressInfo, ApiError> {
        self.call(&AddressGetInfo { address_id })
    }
}
