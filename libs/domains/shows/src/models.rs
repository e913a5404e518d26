use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ShowError, ShowResult};

/// IANA-style `Area/Location`, e.g. `America/New_York`
static TIMEZONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+/[A-Za-z_]+$").unwrap());

/// Custom validator for timezone names
fn validate_timezone(timezone: &str) -> Result<(), validator::ValidationError> {
    if !TIMEZONE_PATTERN.is_match(timezone) {
        return Err(validator::ValidationError::new("invalid_timezone")
            .with_message("timezone must look like Area/Location".into()));
    }
    Ok(())
}

/// Postal address of a venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(min = 1))]
    #[schema(example = "1200")]
    pub house_number: String,
    #[validate(length(min = 1))]
    #[schema(example = "Main St")]
    pub street_name: String,
    #[validate(length(min = 1))]
    #[schema(example = "78701")]
    pub zipcode: String,
    #[validate(length(min = 1))]
    #[schema(example = "Austin")]
    pub city: String,
    #[validate(length(min = 1))]
    #[schema(example = "TX")]
    pub state: String,
}

impl Address {
    fn to_document(&self) -> Document {
        doc! {
            "houseNumber": self.house_number.clone(),
            "streetName": self.street_name.clone(),
            "zipcode": self.zipcode.clone(),
            "city": self.city.clone(),
            "state": self.state.clone(),
        }
    }
}

/// Checklist entry nested in a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItem {
    /// 32-char hex id assigned when the item is appended
    #[schema(example = "4f9d1c2b7a3e4d5f8a6b0c1d2e3f4a5b")]
    pub id: String,
    #[schema(example = "Soundcheck")]
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItem {
    /// Unchecked item with a fresh id
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            label: label.into(),
            checked: false,
        }
    }

    pub(crate) fn to_document(&self) -> Document {
        doc! {
            "id": self.id.clone(),
            "label": self.label.clone(),
            "checked": self.checked,
        }
    }
}

/// Show entity - one live event as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    /// ObjectId rendered as 24-char hex
    #[schema(example = "65f0c0ffee0000000000beef")]
    pub id: String,
    #[validate(length(min = 1))]
    #[schema(example = "Venue X")]
    pub venue_name: String,
    #[validate(nested)]
    pub address: Address,
    /// `null` when the lineup was never recorded
    pub other_bands: Option<Vec<String>>,
    pub entry_time: Option<DateTime<Utc>>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(length(max = 300), custom(function = "validate_timezone"))]
    #[schema(example = "America/Chicago")]
    pub timezone: String,
    pub ticket_link: Option<String>,
    pub rvsp_link: Option<String>,
    pub fb_link: Option<String>,
    /// Kept so older records still read; compare `start_time` against now instead.
    #[schema(deprecated)]
    pub is_past: Option<bool>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

impl Show {
    /// Decode a raw stored document.
    ///
    /// Datetimes may be BSON dates or RFC 3339 strings; a missing `items`
    /// array reads as empty. The decoded record must pass validation, and
    /// any failure names the document id and the offending field.
    pub fn from_document(doc: &Document) -> ShowResult<Self> {
        let id = match doc.get("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => {
                return Err(ShowError::decode(
                    other.to_string(),
                    "`_id` is not an ObjectId",
                ));
            }
            None => return Err(ShowError::decode("<unknown>", "missing `_id`")),
        };

        let fields = Fields { doc, id: &id };
        let show = Show {
            id: id.clone(),
            venue_name: fields.required_str("venueName")?,
            address: fields.address("address")?,
            other_bands: fields.optional_str_list("otherBands")?,
            entry_time: fields.optional_datetime("entryTime")?,
            start_time: fields.required_datetime("startTime")?,
            end_time: fields.optional_datetime("endTime")?,
            timezone: fields.required_str("timezone")?,
            ticket_link: fields.optional_str("ticketLink")?,
            rvsp_link: fields.optional_str("rvspLink")?,
            fb_link: fields.optional_str("fbLink")?,
            is_past: fields.optional_bool("isPast")?,
            items: fields.items("items")?,
        };

        show.validate()
            .map_err(|e| ShowError::decode(&show.id, e.to_string()))?;
        Ok(show)
    }
}

/// Body of `POST /shows`: a full show without id or items
///
/// Timestamps are stored as BSON dates, which hold milliseconds; sub-millisecond
/// digits are dropped, so a record read back carries the truncated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewShow {
    #[validate(length(min = 1))]
    #[schema(example = "Venue X")]
    pub venue_name: String,
    #[validate(nested)]
    pub address: Address,
    #[serde(default)]
    pub other_bands: Option<Vec<String>>,
    /// Doors open; millisecond precision
    #[serde(default)]
    pub entry_time: Option<DateTime<Utc>>,
    /// Millisecond precision
    pub start_time: DateTime<Utc>,
    /// Millisecond precision
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[validate(length(max = 300), custom(function = "validate_timezone"))]
    #[schema(example = "America/Chicago")]
    pub timezone: String,
    #[serde(default)]
    pub ticket_link: Option<String>,
    #[serde(default)]
    pub rvsp_link: Option<String>,
    #[serde(default)]
    pub fb_link: Option<String>,
    #[serde(default)]
    #[schema(deprecated)]
    pub is_past: Option<bool>,
}

impl NewShow {
    /// Fields to insert; absent optionals are stored as `null`, items start empty
    pub fn to_document(&self) -> Document {
        doc! {
            "venueName": self.venue_name.clone(),
            "address": self.address.to_document(),
            "otherBands": self.other_bands.clone(),
            "entryTime": self.entry_time.as_ref().map(datetime_to_bson),
            "startTime": datetime_to_bson(&self.start_time),
            "endTime": self.end_time.as_ref().map(datetime_to_bson),
            "timezone": self.timezone.clone(),
            "ticketLink": self.ticket_link.clone(),
            "rvspLink": self.rvsp_link.clone(),
            "fbLink": self.fb_link.clone(),
            "isPast": self.is_past,
            "items": [],
        }
    }
}

/// Body of `PUT /shows/{id}`: only the fields present are changed.
///
/// Optional fields distinguish "absent" (`None`, left untouched) from an
/// explicit `null` (`Some(None)`, cleared). Required fields reject `null`.
/// `id` and `items` are not updatable here; items go through the item routes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowUpdate {
    #[validate(length(min = 1))]
    #[serde(deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[validate(nested)]
    #[serde(deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub other_bands: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<Option<DateTime<Utc>>>,
    #[serde(deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Option<DateTime<Utc>>>,
    #[validate(length(max = 300), custom(function = "validate_timezone"))]
    #[serde(deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub ticket_link: Option<Option<String>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub rvsp_link: Option<Option<String>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub fb_link: Option<Option<String>>,
    #[schema(deprecated)]
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub is_past: Option<Option<bool>>,
}

impl ShowUpdate {
    /// `$set` body holding exactly the provided fields; cleared ones become `null`
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(venue_name) = &self.venue_name {
            set.insert("venueName", venue_name.clone());
        }
        if let Some(address) = &self.address {
            set.insert("address", address.to_document());
        }
        if let Some(other_bands) = &self.other_bands {
            set.insert("otherBands", other_bands.clone());
        }
        if let Some(entry_time) = &self.entry_time {
            set.insert("entryTime", optional_datetime_to_bson(entry_time.as_ref()));
        }
        if let Some(start_time) = &self.start_time {
            set.insert("startTime", datetime_to_bson(start_time));
        }
        if let Some(end_time) = &self.end_time {
            set.insert("endTime", optional_datetime_to_bson(end_time.as_ref()));
        }
        if let Some(timezone) = &self.timezone {
            set.insert("timezone", timezone.clone());
        }
        if let Some(ticket_link) = &self.ticket_link {
            set.insert("ticketLink", ticket_link.clone());
        }
        if let Some(rvsp_link) = &self.rvsp_link {
            set.insert("rvspLink", rvsp_link.clone());
        }
        if let Some(fb_link) = &self.fb_link {
            set.insert("fbLink", fb_link.clone());
        }
        if let Some(is_past) = self.is_past {
            set.insert("isPast", is_past);
        }
        set
    }
}

/// A present field, where `null` means "clear it"
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A present field that must carry a value
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Body of `POST /shows/{id}/items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewChecklistItem {
    #[validate(length(min = 1))]
    #[schema(example = "Soundcheck")]
    pub label: String,
}

/// Response of `POST /shows`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatedShow {
    #[schema(example = "65f0c0ffee0000000000beef")]
    pub id: String,
}

/// Parse a show id received as text
pub fn parse_show_id(raw: &str) -> ShowResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| ShowError::InvalidId(raw.to_string()))
}

fn datetime_to_bson(value: &DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(value.timestamp_millis()))
}

fn optional_datetime_to_bson(value: Option<&DateTime<Utc>>) -> Bson {
    value.map_or(Bson::Null, datetime_to_bson)
}

fn datetime_from_bson(value: &Bson) -> Option<DateTime<Utc>> {
    match value {
        Bson::DateTime(dt) => DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()),
        Bson::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

/// Field accessors that turn shape mismatches into decode errors
struct Fields<'a> {
    doc: &'a Document,
    id: &'a str,
}

impl Fields<'_> {
    fn err(&self, field: &str, problem: &str) -> ShowError {
        ShowError::decode(self.id, format!("field `{field}`: {problem}"))
    }

    /// `None` for both a missing key and an explicit `null`
    fn present(&self, field: &str) -> Option<&Bson> {
        match self.doc.get(field) {
            None | Some(Bson::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn required_str(&self, field: &str) -> ShowResult<String> {
        match self.present(field) {
            Some(Bson::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.err(field, "expected a string")),
            None => Err(self.err(field, "missing")),
        }
    }

    fn optional_str(&self, field: &str) -> ShowResult<Option<String>> {
        match self.present(field) {
            Some(Bson::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.err(field, "expected a string")),
            None => Ok(None),
        }
    }

    fn optional_bool(&self, field: &str) -> ShowResult<Option<bool>> {
        match self.present(field) {
            Some(Bson::Boolean(b)) => Ok(Some(*b)),
            Some(_) => Err(self.err(field, "expected a boolean")),
            None => Ok(None),
        }
    }

    fn optional_str_list(&self, field: &str) -> ShowResult<Option<Vec<String>>> {
        match self.present(field) {
            Some(Bson::Array(values)) => values
                .iter()
                .map(|value| match value {
                    Bson::String(s) => Ok(s.clone()),
                    _ => Err(self.err(field, "expected an array of strings")),
                })
                .collect::<ShowResult<Vec<_>>>()
                .map(Some),
            Some(_) => Err(self.err(field, "expected an array")),
            None => Ok(None),
        }
    }

    fn required_datetime(&self, field: &str) -> ShowResult<DateTime<Utc>> {
        self.optional_datetime(field)?
            .ok_or_else(|| self.err(field, "missing"))
    }

    fn optional_datetime(&self, field: &str) -> ShowResult<Option<DateTime<Utc>>> {
        match self.present(field) {
            Some(value) => datetime_from_bson(value)
                .map(Some)
                .ok_or_else(|| self.err(field, "expected a date or RFC 3339 string")),
            None => Ok(None),
        }
    }

    fn address(&self, field: &str) -> ShowResult<Address> {
        match self.present(field) {
            Some(Bson::Document(inner)) => bson::from_document(inner.clone())
                .map_err(|e| self.err(field, &e.to_string())),
            Some(_) => Err(self.err(field, "expected an embedded document")),
            None => Err(self.err(field, "missing")),
        }
    }

    fn items(&self, field: &str) -> ShowResult<Vec<ChecklistItem>> {
        match self.present(field) {
            Some(Bson::Array(values)) => values
                .iter()
                .map(|value| {
                    bson::from_bson::<ChecklistItem>(value.clone())
                        .map_err(|e| self.err(field, &e.to_string()))
                })
                .collect(),
            Some(_) => Err(self.err(field, "expected an array")),
            None => Ok(Vec::new()),
        }
    }
}
