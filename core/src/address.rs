//! `namecheap.users.address.*`: the account's saved address book.

use serde::Deserialize;

use crate::client::Command;
use crate::envelope::decode_payload;
use crate::error::ApiError;
use crate::http::Params;

pub const ADDRESS_GET_LIST: &str = "namecheap.users.address.getList";
pub const ADDRESS_GET_INFO: &str = "namecheap.users.address.getInfo";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressGetListResult {
    #[serde(rename = "@AddressId")]
    pub id: u64,
    #[serde(rename = "@AddressName")]
    pub name: String,
    #[serde(rename = "@IsDefault", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressGetList;

#[derive(Debug, Default, Deserialize)]
struct AddressGetListPayload {
    #[serde(rename = "AddressGetListResult", default)]
    result: AddressList,
}

#[derive(Debug, Default, Deserialize)]
struct AddressList {
    #[serde(rename = "List", default)]
    entries: Vec<AddressGetListResult>,
}

impl Command for AddressGetList {
    const NAME: &'static str = ADDRESS_GET_LIST;
    type Output = Vec<AddressGetListResult>;

    fn write_params(&self, _params: &mut Params) -> Result<(), ApiError> {
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: AddressGetListPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.entries)
    }
}

/// A saved address, as returned by `users.address.getInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AddressInfo {
    #[serde(rename = "AddressId", default, deserialize_with = "crate::xml::zero_if_empty")]
    pub id: u64,
    #[serde(rename = "UserName")]
    pub user_name: String,
    #[serde(rename = "AddressName")]
    pub name: String,
    #[serde(rename = "Default_YN", default, deserialize_with = "crate::xml::lenient_bool")]
    pub is_default: bool,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "JobTitle")]
    pub job_title: String,
    #[serde(rename = "Organization")]
    pub organization: String,
    #[serde(rename = "Address1")]
    pub address1: String,
    #[serde(rename = "Address2")]
    pub address2: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "StateProvince")]
    pub state_province: String,
    #[serde(rename = "StateProvinceChoice")]
    pub state_province_choice: String,
    #[serde(rename = "Zip")]
    pub zip: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "PhoneExt")]
    pub phone_ext: String,
    #[serde(rename = "Fax")]
    pub fax: String,
    #[serde(rename = "EmailAddress")]
    pub email_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressGetInfo {
    pub address_id: u64,
}

#[derive(Debug, Default, Deserialize)]
struct AddressGetInfoPayload {
    #[serde(rename = "GetAddressInfoResult", default)]
    result: Option<AddressInfo>,
}

impl Command for AddressGetInfo {
    const NAME: &'static str = ADDRESS_GET_INFO;
    type Output = AddressInfo;

    fn write_params(&self, params: &mut Params) -> Result<(), ApiError> {
        params.set("AddressId", self.address_id.to_string());
        Ok(())
    }

    fn decode(body: &str) -> Result<Self::Output, ApiError> {
        let payload: AddressGetInfoPayload = decode_payload(body, Self::NAME)?;
        Ok(payload.result.unwrap_or_default())
    }
}
