//! Contact role bundle sent with `domains.create` and `domains.setContacts`.
//!
//! The vendor wants the same set of contact fields four times, once per role,
//! each prefixed with the role name (`RegistrantFirstName`, `TechFirstName`,
//! ...). `Registrant` keeps one `ContactInfo` per role and flattens them by
//! walking `ContactRole::ALL` over a single field table.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRole {
    Registrant,
    Tech,
    Admin,
    AuxBilling,
}

impl ContactRole {
    pub const ALL: [ContactRole; 4] = [
        ContactRole::Registrant,
        ContactRole::Tech,
        ContactRole::Admin,
        ContactRole::AuxBilling,
    ];

    /// Parameter-name prefix and XML element name for this role.
    pub fn prefix(&self) -> &'static str {
        match self {
            ContactRole::Registrant => "Registrant",
            ContactRole::Tech => "Tech",
            ContactRole::Admin => "Admin",
            ContactRole::AuxBilling => "AuxBilling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

/// Contact details for one role. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Address1")]
    pub address1: String,
    #[serde(rename = "Address2")]
    pub address2: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "StateProvince")]
    pub state_province: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "EmailAddress")]
    pub email_address: String,
    #[serde(rename = "OrganizationName")]
    pub organization_name: String,
    #[serde(rename = "JobTitle")]
    pub job_title: String,
    #[serde(rename = "Fax")]
    pub fax: String,
    #[serde(rename = "PhoneExt")]
    pub phone_ext: String,
}

impl ContactInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: &str,
        last_name: &str,
        address1: &str,
        address2: &str,
        city: &str,
        state_province: &str,
        postal_code: &str,
        country: &str,
        phone: &str,
        email_address: &str,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address1: address1.to_string(),
            address2: address2.to_string(),
            city: city.to_string(),
            state_province: state_province.to_string(),
            postal_code: postal_code.to_string(),
            country: country.to_string(),
            phone: phone.to_string(),
            email_address: email_address.to_string(),
            ..Self::default()
        }
    }

    /// Wire name, value and presence of every field, in the order the vendor
    /// documents them.
    fn fields(&self) -> [(&'static str, &str, Presence); 14] {
        use Presence::*;
        [
            ("FirstName", self.first_name.as_str(), Required),
            ("LastName", self.last_name.as_str(), Required),
            ("Address1", self.address1.as_str(), Required),
            ("Address2", self.address2.as_str(), Optional),
            ("City", self.city.as_str(), Required),
            ("StateProvince", self.state_province.as_str(), Required),
            ("PostalCode", self.postal_code.as_str(), Required),
            ("Country", self.country.as_str(), Required),
            ("Phone", self.phone.as_str(), Required),
            ("EmailAddress", self.email_address.as_str(), Required),
            ("OrganizationName", self.organization_name.as_str(), Optional),
            ("JobTitle", self.job_title.as_str(), Optional),
            ("Fax", self.fax.as_str(), Optional),
            ("PhoneExt", self.phone_ext.as_str(), Optional),
        ]
    }
}

/// The four role contacts required to register a domain or replace its
/// contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registrant {
    pub registrant: ContactInfo,
    pub tech: ContactInfo,
    pub admin: ContactInfo,
    pub aux_billing: ContactInfo,
}

impl Registrant {
    /// Use the same contact for every role.
    pub fn uniform(contact: ContactInfo) -> Self {
        Self {
            registrant: contact.clone(),
            tech: contact.clone(),
            admin: contact.clone(),
            aux_billing: contact,
        }
    }

    pub fn contact(&self, role: ContactRole) -> &ContactInfo {
        match role {
            ContactRole::Registrant => &self.registrant,
            ContactRole::Tech => &self.tech,
            ContactRole::Admin => &self.admin,
            ContactRole::AuxBilling => &self.aux_billing,
        }
    }

    pub fn contact_mut(&mut self, role: ContactRole) -> &mut ContactInfo {
        match role {
            ContactRole::Registrant => &mut self.registrant,
            ContactRole::Tech => &mut self.tech,
            ContactRole::Admin => &mut self.admin,
            ContactRole::AuxBilling => &mut self.aux_billing,
        }
    }

    /// Fails on the first empty required field, named with its role prefix
    /// (e.g. `TechCity`).
    pub fn validate(&self) -> Result<(), ApiError> {
        for role in ContactRole::ALL {
            for (name, value, presence) in self.contact(role).fields() {
                if presence == Presence::Required && value.trim().is_empty() {
                    return Err(ApiError::validation(
                        format!("{}{name}", role.prefix()),
                        "cannot be empty",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Validate, then write every non-empty field as `<Role><Field>=value`.
    /// Nothing is written when validation fails.
    pub fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        self.validate()?;
        for role in ContactRole::ALL {
            for (name, value, _) in self.contact(role).fields() {
                if !value.is_empty() {
                    params.set(format!("{}{name}", role.prefix()), value);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> ContactInfo {
        ContactInfo::new(
            "John",
            "Smith",
            "8939 S.cross Blvd",
            "",
            "CA",
            "CA",
            "90045",
            "US",
            "+1.6613102107",
            "john@gmail.com",
        )
    }

    #[test]
    fn all_mandatory_fields_without_address2_is_valid() {
        assert!(Registrant::uniform(john()).validate().is_ok());
    }

    #[test]
    fn empty_mandatory_field_is_named_with_role_prefix() {
        let mut registrant = Registrant::uniform(john());
        registrant.tech.city.clear();
        let err = registrant.validate().unwrap_err();
        match err {
            ApiError::Validation { field, .. } => assert_eq!(field, "TechCity"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn every_mandatory_field_is_checked_for_every_role() {
        let mandatory = [
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
        for role in ContactRole::ALL {
            for field in mandatory {
                let mut registrant = Registrant::uniform(john());
                let contact = registrant.contact_mut(role);
                match field {
                    "FirstName" => contact.first_name.clear(),
                    "LastName" => contact.last_name.clear(),
                    "Address1" => contact.address1.clear(),
                    "City" => contact.city.clear(),
                    "StateProvince" => contact.state_province.clear(),
                    "PostalCode" => contact.postal_code.clear(),
                    "Country" => contact.country.clear(),
                    "Phone" => contact.phone.clear(),
                    "EmailAddress" => contact.email_address.clear(),
                    _ => unreachable!(),
                }
                let expected = format!("{}{field}", role.prefix());
                match registrant.validate() {
                    Err(ApiError::Validation { field, .. }) => assert_eq!(field, expected),
                    other => panic!("{expected}: expected Validation, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn write_params_flattens_all_roles() {
        let mut params = Params::new();
        Registrant::uniform(john()).write_params(&mut params).unwrap();

        // nine mandatory fields per role, Address2 left out when empty
        assert_eq!(params.len(), 36);
        for role in ContactRole::ALL {
            let prefix = role.prefix();
            assert_eq!(params.get(&format!("{prefix}FirstName")), Some("John"));
            assert_eq!(params.get(&format!("{prefix}Phone")), Some("+1.6613102107"));
            assert!(!params.contains_key(&format!("{prefix}Address2")));
        }
    }

    #[test]
    fn optional_fields_are_sent_when_set() {
        let mut contact = john();
        contact.address2 = "Suite 110".to_string();
        contact.organization_name = "NameCheap.com".to_string();
        let mut registrant = Registrant::uniform(john());
        registrant.admin = contact;

        let mut params = Params::new();
        registrant.write_params(&mut params).unwrap();
        assert_eq!(params.get("AdminAddress2"), Some("Suite 110"));
        assert_eq!(params.get("AdminOrganizationName"), Some("NameCheap.com"));
        assert!(!params.contains_key("TechOrganizationName"));
    }

    #[test]
    fn invalid_bundle_writes_nothing() {
        let mut registrant = Registrant::uniform(john());
        registrant.aux_billing.email_address.clear();
        let mut params = Params::new();
        assert!(registrant.write_params(&mut params).is_err());
        assert!(params.is_empty());
    }
}
