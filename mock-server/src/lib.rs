//! In-memory stand-in for the Namecheap XML API.
//!
//! Serves `/xml.response` over GET (query string) and POST (form body),
//! checks the auth parameters, dispatches on `Command` and answers with the
//! vendor's `ApiResponse` envelope. Registered domains, their contacts and
//! nameservers, and the address book live in a `Registry` behind a lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{Months, NaiveDate, Utc};
use quick_xml::escape::escape;
use tokio::{net::TcpListener, sync::RwLock};

pub const ENDPOINT_PATH: &str = "/xml.response";

pub const ERR_UNKNOWN_COMMAND: u32 = 1010101;
pub const ERR_INVALID_API_KEY: u32 = 1011102;
pub const ERR_INVALID_CLIENT_IP: u32 = 1011150;
pub const ERR_MISSING_PARAMETER: u32 = 2010324;
pub const ERR_MISSING_CONTACT: u32 = 2011170;
pub const ERR_DOMAIN_NOT_FOUND: u32 = 2019166;
pub const ERR_ADDRESS_NOT_FOUND: u32 = 2011280;
pub const ERR_DOMAIN_TAKEN: u32 = 2033409;

const ROLES: [&str; 4] = ["Registrant", "Tech", "Admin", "AuxBilling"];
const REQUIRED_CONTACT_FIELDS: [&str; 9] = [
    "FirstName",
    "LastName",
    "Address1",
    "City",
    "StateProvince",
    "PostalCode",
    "Country",
    "Phone",
    "EmailAddress",
];
const CONTACT_FIELDS: [&str; 14] = [
    "OrganizationName",
    "JobTitle",
    "FirstName",
    "LastName",
    "Address1",
    "Address2",
    "City",
    "StateProvince",
    "PostalCode",
    "Country",
    "Phone",
    "Fax",
    "EmailAddress",
    "PhoneExt",
];
const DEFAULT_NAMESERVERS: [&str; 2] = ["dns1.registrar-servers.com", "dns2.registrar-servers.com"];
const PRICE_PER_YEAR: f64 = 8.88;
const DATE_FORMAT: &str = "%m/%d/%Y";

/// The auth values every request must carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub api_user: String,
    pub api_key: String,
    pub user_name: String,
    pub client_ip: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            api_user: "mockuser".to_string(),
            api_key: "mockkey".to_string(),
            user_name: "mockuser".to_string(),
            client_ip: "127.0.0.1".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DomainRecord {
    pub id: u64,
    pub name: String,
    pub created: NaiveDate,
    pub expires: NaiveDate,
    pub whoisguard: bool,
    pub custom_dns: bool,
    pub nameservers: Vec<String>,
    /// Role-prefixed contact fields as submitted, e.g. `TechCity`.
    pub contacts: HashMap<String, String>,
}

#[derive(Clone, Debug)]
pub struct AddressRecord {
    pub id: u64,
    pub name: String,
    pub is_default: bool,
    pub fields: HashMap<String, String>,
}

#[derive(Debug)]
pub struct Registry {
    next_id: u64,
    pub domains: BTreeMap<String, DomainRecord>,
    pub addresses: Vec<AddressRecord>,
}

impl Default for Registry {
    fn default() -> Self {
        let primary = AddressRecord {
            id: 1,
            name: "Primary Address".to_string(),
            is_default: true,
            fields: [
                ("FirstName", "John"),
                ("LastName", "Smith"),
                ("Address1", "8939 S.cross Blvd"),
                ("City", "Los Angeles"),
                ("StateProvince", "CA"),
                ("Zip", "90045"),
                ("Country", "US"),
                ("Phone", "+1.6613102107"),
                ("EmailAddress", "john@example.com"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        };
        Self {
            next_id: 1000,
            domains: BTreeMap::new(),
            addresses: vec![primary],
        }
    }
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Registry>>;

#[derive(Clone)]
pub struct AppState {
    credentials: Arc<Credentials>,
    db: Db,
}

pub fn app() -> Router {
    app_with(Credentials::default())
}

pub fn app_with(credentials: Credentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        db: Arc::new(RwLock::new(Registry::default())),
    };
    Router::new()
        .route(ENDPOINT_PATH, get(handle_get).post(handle_post))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn handle_get(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    respond(&state, params).await
}

async fn handle_post(
    State(state): State<AppState>,
    Form(params): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    respond(&state, params).await
}

async fn respond(state: &AppState, params: HashMap<String, String>) -> impl IntoResponse {
    let command = params.get("Command").cloned().unwrap_or_default();
    let body = match authenticate(&state.credentials, &params) {
        Err((code, message)) => error_response(&command, code, message),
        Ok(()) => {
            let mut registry = state.db.write().await;
            match dispatch(&mut registry, &command, &params, Utc::now().date_naive()) {
                Ok(payload) => ok_response(&command, &payload),
                Err((code, message)) => error_response(&command, code, &message),
            }
        }
    };
    tracing::info!(command = %command, "handled request");
    ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], body)
}

fn authenticate(
    credentials: &Credentials,
    params: &HashMap<String, String>,
) -> Result<(), (u32, &'static str)> {
    let matches = |key: &str, expected: &str| params.get(key).is_some_and(|v| v == expected);
    if !matches("ApiUser", &credentials.api_user)
        || !matches("ApiKey", &credentials.api_key)
        || !matches("UserName", &credentials.user_name)
    {
        return Err((
            ERR_INVALID_API_KEY,
            "API Key is invalid or API access has not been enabled",
        ));
    }
    if !matches("ClientIp", &credentials.client_ip) {
        return Err((ERR_INVALID_CLIENT_IP, "Invalid request IP"));
    }
    Ok(())
}

type Outcome = Result<String, (u32, String)>;

fn dispatch(registry: &mut Registry, command: &str, params: &HashMap<String, String>, today: NaiveDate) -> Outcome {
    match command {
        "namecheap.domains.getList" => domains_get_list(registry, params),
        "namecheap.domains.getInfo" => domains_get_info(registry, params),
        "namecheap.domains.check" => domains_check(registry, params),
        "namecheap.domains.create" => domains_create(registry, params, today),
        "namecheap.domains.renew" => domains_renew(registry, params),
        "namecheap.domains.getContacts" => domains_get_contacts(registry, params),
        "namecheap.domains.setContacts" => domains_set_contacts(registry, params),
        "namecheap.domains.dns.getList" => dns_get_list(registry, params),
        "namecheap.domains.dns.setCustom" => dns_set_custom(registry, params),
        "namecheap.users.address.getList" => address_get_list(registry),
        "namecheap.users.address.getInfo" => address_get_info(registry, params),
        "" => Err((ERR_UNKNOWN_COMMAND, "Parameter Command is missing".to_string())),
        other => Err((ERR_UNKNOWN_COMMAND, format!("Invalid request: unknown command {other}"))),
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

fn ok_response(command: &str, payload: &str) -> String {
    let command = escape(command);
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="OK" xmlns="http://api.namecheap.com/xml.response">
  <Errors />
  <Warnings />
  <RequestedCommand>{command}</RequestedCommand>
  <CommandResponse Type="{command}">
{payload}
  </CommandResponse>
  <Server>MOCK-SERVER</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.001</ExecutionTime>
</ApiResponse>"#
    )
}

fn error_response(command: &str, code: u32, message: &str) -> String {
    let command = escape(command);
    let message = escape(message);
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<ApiResponse Status="ERROR" xmlns="http://api.namecheap.com/xml.response">
  <Errors>
    <Error Number="{code}">{message}</Error>
  </Errors>
  <Warnings />
  <RequestedCommand>{command}</RequestedCommand>
  <Server>MOCK-SERVER</Server>
  <GMTTimeDifference>--5:00</GMTTimeDifference>
  <ExecutionTime>0.001</ExecutionTime>
</ApiResponse>"#
    )
}

// ---------------------------------------------------------------------------
// Parameter helpers
// ---------------------------------------------------------------------------

fn required<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str, (u32, String)> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| (ERR_MISSING_PARAMETER, format!("Parameter {key} is missing")))
}

fn number(params: &HashMap<String, String>, key: &str, default: u32) -> Result<u32, (u32, String)> {
    match params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v
            .parse()
            .map_err(|_| (ERR_MISSING_PARAMETER, format!("Parameter {key} is invalid"))),
    }
}

fn years(params: &HashMap<String, String>) -> Result<u32, (u32, String)> {
    match number(params, "Years", 1)? {
        y @ 1..=10 => Ok(y),
        _ => Err((ERR_MISSING_PARAMETER, "Parameter Years is invalid".to_string())),
    }
}

fn domain_mut<'a>(registry: &'a mut Registry, name: &str) -> Result<&'a mut DomainRecord, (u32, String)> {
    registry
        .domains
        .get_mut(&name.to_ascii_lowercase())
        .ok_or_else(|| (ERR_DOMAIN_NOT_FOUND, format!("Domain name not found: {name}")))
}

fn contacts_from(params: &HashMap<String, String>) -> Result<HashMap<String, String>, (u32, String)> {
    for role in ROLES {
        for field in REQUIRED_CONTACT_FIELDS {
            let key = format!("{role}{field}");
            if !params.get(&key).is_some_and(|v| !v.trim().is_empty()) {
                return Err((ERR_MISSING_CONTACT, format!("Parameter {key} is missing")));
            }
        }
    }
    Ok(ROLES
        .iter()
        .flat_map(|role| CONTACT_FIELDS.iter().map(move |field| format!("{role}{field}")))
        .filter_map(|key| params.get(&key).map(|v| (key.clone(), v.clone())))
        .collect())
}

fn charged(years: u32) -> String {
    format!("{:.4}", PRICE_PER_YEAR * f64::from(years))
}

fn add_years(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_add_months(Months::new(12 * years)).unwrap_or(date)
}

fn date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// domains.*
// ---------------------------------------------------------------------------

fn domains_get_list(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let page = number(params, "Page", 1)?.max(1);
    let page_size = number(params, "PageSize", 20)?.clamp(1, 100);
    let skip = usize::try_from(u64::from(page - 1) * u64::from(page_size)).unwrap_or(usize::MAX);

    let rows: String = registry
        .domains
        .values()
        .skip(skip)
        .take(page_size as usize)
        .map(|d| {
            format!(
                r#"      <Domain ID="{}" Name="{}" User="mockuser" Created="{}" Expires="{}" IsExpired="false" IsLocked="false" AutoRenew="false" WhoisGuard="{}" IsPremium="false" IsOurDNS="{}" />
"#,
                d.id,
                escape(d.name.as_str()),
                date(d.created),
                date(d.expires),
                if d.whoisguard { "ENABLED" } else { "NOTPRESENT" },
                !d.custom_dns,
            )
        })
        .collect();

    Ok(format!(
        r#"    <DomainGetListResult>
{rows}    </DomainGetListResult>
    <Paging>
      <TotalItems>{}</TotalItems>
      <CurrentPage>{page}</CurrentPage>
      <PageSize>{page_size}</PageSize>
    </Paging>"#,
        registry.domains.len()
    ))
}

fn domains_get_info(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let name = required(params, "DomainName")?;
    let d = domain_mut(registry, name)?;
    let nameservers: String = d
        .nameservers
        .iter()
        .map(|ns| format!("        <Nameserver>{}</Nameserver>\n", escape(ns.as_str())))
        .collect();
    Ok(format!(
        r#"    <DomainGetInfoResult Status="Ok" ID="{id}" DomainName="{name}" OwnerName="mockuser" IsOwner="true" IsPremium="false" IsExpired="false" IsLocked="false" AutoRenew="false">
      <DomainDetails>
        <CreatedDate>{created}</CreatedDate>
        <ExpiredDate>{expires}</ExpiredDate>
        <NumYears>0</NumYears>
      </DomainDetails>
      <LockDetails />
      <Whoisguard Enabled="{wg}">
        <ID>{wg_id}</ID>
        <ExpiredDate>{expires}</ExpiredDate>
      </Whoisguard>
      <DnsDetails ProviderType="{provider}" IsUsingOurDNS="{ours}">
{nameservers}      </DnsDetails>
      <Modificationrights All="true" />
    </DomainGetInfoResult>"#,
        id = d.id,
        name = escape(d.name.as_str()),
        created = date(d.created),
        expires = date(d.expires),
        wg = if d.whoisguard { "True" } else { "False" },
        wg_id = if d.whoisguard { d.id + 50000 } else { 0 },
        provider = if d.custom_dns { "CUSTOM" } else { "FREE" },
        ours = !d.custom_dns,
    ))
}

fn domains_check(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let list = required(params, "DomainList")?;
    Ok(list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            let available = !registry.domains.contains_key(&name.to_ascii_lowercase());
            format!(
                r#"    <DomainCheckResult Domain="{}" Available="{available}" IsPremiumName="false" />"#,
                escape(name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

fn domains_create(registry: &mut Registry, params: &HashMap<String, String>, today: NaiveDate) -> Outcome {
    let name = required(params, "DomainName")?.to_ascii_lowercase();
    let years = years(params)?;
    let contacts = contacts_from(params)?;
    if registry.domains.contains_key(&name) {
        return Err((ERR_DOMAIN_TAKEN, format!("Domain {name} is not available")));
    }

    let custom: Vec<String> = params
        .get("Nameservers")
        .map(|ns| {
            ns.split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    let whoisguard = params.get("WGEnabled").is_some_and(|v| v.eq_ignore_ascii_case("yes"));
    let id = registry.next_id();
    let order_id = registry.next_id();
    let transaction_id = registry.next_id();

    let record = DomainRecord {
        id,
        name: name.clone(),
        created: today,
        expires: add_years(today, years),
        whoisguard,
        custom_dns: !custom.is_empty(),
        nameservers: if custom.is_empty() {
            DEFAULT_NAMESERVERS.iter().map(|s| s.to_string()).collect()
        } else {
            custom
        },
        contacts,
    };
    registry.domains.insert(name.clone(), record);

    Ok(format!(
        r#"    <DomainCreateResult Domain="{}" Registered="true" ChargedAmount="{}" DomainID="{id}" OrderID="{order_id}" TransactionID="{transaction_id}" WhoisguardEnable="{whoisguard}" NonRealTimeDomain="false" />"#,
        escape(name.as_str()),
        charged(years),
    ))
}

fn domains_renew(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let name = required(params, "DomainName")?.to_string();
    let years = years(params)?;
    let order_id = registry.next_id();
    let transaction_id = registry.next_id();
    let d = domain_mut(registry, &name)?;
    d.expires = add_years(d.expires, years);

    Ok(format!(
        r#"    <DomainRenewResult DomainName="{}" DomainID="{}" Renew="true" OrderID="{order_id}" TransactionID="{transaction_id}" ChargedAmount="{}">
      <DomainDetails>
        <ExpiredDate>{}</ExpiredDate>
        <NumYears>0</NumYears>
      </DomainDetails>
    </DomainRenewResult>"#,
        escape(d.name.as_str()),
        d.id,
        charged(years),
        date(d.expires),
    ))
}

fn contact_elements(contacts: &HashMap<String, String>) -> String {
    let mut out = String::new();
    for role in ROLES {
        out.push_str(&format!("      <{role} ReadOnly=\"false\">\n"));
        for field in CONTACT_FIELDS {
            match contacts.get(&format!("{role}{field}")).filter(|v| !v.is_empty()) {
                Some(value) => out.push_str(&format!("        <{field}>{}</{field}>\n", escape(value.as_str()))),
                None => out.push_str(&format!("        <{field} />\n")),
            }
        }
        out.push_str(&format!("      </{role}>\n"));
    }
    out
}

fn domains_get_contacts(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let name = required(params, "DomainName")?;
    let d = domain_mut(registry, name)?;
    Ok(format!(
        r#"    <DomainContactsResult Domain="{}" domainnameid="{}">
{}      <CurrentAttributes />
    </DomainContactsResult>"#,
        escape(d.name.as_str()),
        d.id,
        contact_elements(&d.contacts),
    ))
}

fn domains_set_contacts(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let name = required(params, "DomainName")?;
    let contacts = contacts_from(params)?;
    let d = domain_mut(registry, name)?;
    d.contacts = contacts;
    Ok(format!(
        r#"    <DomainSetContactResult Domain="{}" IsSuccess="true" />"#,
        escape(d.name.as_str())
    ))
}

// ---------------------------------------------------------------------------
// domains.dns.*
// ---------------------------------------------------------------------------

fn sld_tld(params: &HashMap<String, String>) -> Result<String, (u32, String)> {
    let sld = required(params, "SLD")?;
    let tld = required(params, "TLD")?;
    Ok(format!("{sld}.{tld}"))
}

fn dns_get_list(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let name = sld_tld(params)?;
    let d = domain_mut(registry, &name)?;
    let nameservers: String = d
        .nameservers
        .iter()
        .map(|ns| format!("      <Nameserver>{}</Nameserver>\n", escape(ns.as_str())))
        .collect();
    Ok(format!(
        r#"    <DomainDNSGetListResult Domain="{}" IsUsingOurDNS="{}">
{nameservers}    </DomainDNSGetListResult>"#,
        escape(d.name.as_str()),
        !d.custom_dns,
    ))
}

fn dns_set_custom(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let name = sld_tld(params)?;
    let nameservers: Vec<String> = required(params, "Nameservers")?
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    let d = domain_mut(registry, &name)?;
    d.nameservers = nameservers;
    d.custom_dns = true;
    Ok(format!(
        r#"    <DomainDNSSetCustomResult Domain="{}" Updated="true" />"#,
        escape(d.name.as_str())
    ))
}

// ---------------------------------------------------------------------------
// users.address.*
// ---------------------------------------------------------------------------

fn address_get_list(registry: &mut Registry) -> Outcome {
    let rows: Vec<String> = registry
        .addresses
        .iter()
        .map(|a| {
            format!(
                r#"      <List AddressId="{}" AddressName="{}" IsDefault="{}" />"#,
                a.id,
                escape(a.name.as_str()),
                a.is_default
            )
        })
        .collect();
    Ok(format!(
        "    <AddressGetListResult>\n{}\n    </AddressGetListResult>",
        rows.join("\n")
    ))
}

fn address_get_info(registry: &mut Registry, params: &HashMap<String, String>) -> Outcome {
    let id: u64 = required(params, "AddressId")?
        .parse()
        .map_err(|_| (ERR_MISSING_PARAMETER, "Parameter AddressId is invalid".to_string()))?;
    let a = registry
        .addresses
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| (ERR_ADDRESS_NOT_FOUND, format!("Address {id} not found")))?;

    let field = |key: &str| escape(a.fields.get(key).map(String::as_str).unwrap_or("")).into_owned();
    let elements: String = [
        "FirstName",
        "LastName",
        "JobTitle",
        "Organization",
        "Address1",
        "Address2",
        "City",
        "StateProvince",
        "StateProvinceChoice",
        "Zip",
        "Country",
        "Phone",
        "PhoneExt",
        "Fax",
        "EmailAddress",
    ]
    .iter()
    .map(|key| format!("      <{key}>{}</{key}>\n", field(key)))
    .collect();

    Ok(format!(
        r#"    <GetAddressInfoResult>
      <AddressId>{}</AddressId>
      <UserName>mockuser</UserName>
      <AddressName>{}</AddressName>
      <Default_YN>{}</Default_YN>
{elements}    </GetAddressInfoResult>"#,
        a.id,
        escape(a.name.as_str()),
        a.is_default,
    ))
}
