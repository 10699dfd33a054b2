//! Property listing entity, moderation status and search criteria.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{STATUS_APPROVED, STATUS_PENDING, STATUS_REJECTED};

/// Moderation status of a listing.
///
/// Every transition is allowed; admins may revert an approval or a rejection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl PropertyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Pending => STATUS_PENDING,
            PropertyStatus::Approved => STATUS_APPROVED,
            PropertyStatus::Rejected => STATUS_REJECTED,
        }
    }

    /// Parse a canonical status string (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            STATUS_PENDING => Some(PropertyStatus::Pending),
            STATUS_APPROVED => Some(PropertyStatus::Approved),
            STATUS_REJECTED => Some(PropertyStatus::Rejected),
            _ => None,
        }
    }
}

impl From<&str> for PropertyStatus {
    /// Lenient conversion for stored values; unknown strings read as pending.
    fn from(value: &str) -> Self {
        PropertyStatus::parse(value).unwrap_or_else(|| {
            tracing::warn!(status = value, "Unknown property status, treating as PENDING");
            PropertyStatus::Pending
        })
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner summary attached to a listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Owner {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

/// Property listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: String,
    pub location: String,
    pub image_url: Option<String>,
    pub status: PropertyStatus,
    pub created_at: DateTime<Utc>,
    pub owner_id: Uuid,
    /// Loaded owner record; absent only if the owner row vanished.
    pub owner: Option<Owner>,
}

impl Property {
    /// Owner for display; an empty placeholder when the record is missing.
    pub fn owner_or_placeholder(&self) -> Owner {
        self.owner.clone().unwrap_or_default()
    }
}

/// Listing fields submitted by a customer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub property_type: String,
    pub location: String,
    pub status: Option<PropertyStatus>,
}

/// Contact details of the owner, editable from the listing form
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerContact {
    pub full_name: String,
    pub email: String,
}

/// Field edits of an existing listing. Status is not editable here.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanges {
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub property_type: String,
    pub location: String,
    pub owner: Option<OwnerContact>,
}

/// Raw image payload received from a form
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Optional listing filters; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchCriteria {
    pub location: Option<String>,
    #[serde(rename = "price", default, deserialize_with = "blank_as_none")]
    pub max_price: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
}

/// Query strings send `price=` for an untouched input; read it as absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_price(value).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parse a price entered as text. Only finite numbers are prices.
pub fn parse_price(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(format!("Price must be a number: {}", value.trim())),
    }
}

/// A stored price must be finite and not negative.
pub fn valid_price(price: Option<f64>) -> bool {
    price.map_or(true, |p| p.is_finite() && p >= 0.0)
}

impl SearchCriteria {
    /// Trim text filters and drop blank ones.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            location: clean(self.location),
            max_price: self.max_price,
            property_type: clean(self.property_type),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.max_price.is_none() && self.property_type.is_none()
    }

    /// In-memory evaluation of the filter, same semantics as the SQL query.
    pub fn matches(&self, property: &Property) -> bool {
        let location_ok = self.location.as_ref().map_or(true, |loc| {
            property
                .location
                .to_lowercase()
                .contains(&loc.to_lowercase())
        });
        let price_ok = self
            .max_price
            .map_or(true, |max| property.price.is_some_and(|p| p <= max));
        let type_ok = self
            .property_type
            .as_ref()
            .map_or(true, |t| &property.property_type == t);

        location_ok && price_ok && type_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(location: &str, price: Option<f64>, property_type: &str) -> Property {
        Property {
            id: Uuid::new_v4(),
            title: "Flat".into(),
            description: "Two rooms".into(),
            price,
            property_type: property_type.into(),
            location: location.into(),
            image_url: None,
            status: PropertyStatus::Pending,
            created_at: Utc::now(),
            owner_id: Uuid::new_v4(),
            owner: None,
        }
    }

    #[test]
    fn status_defaults_to_pending() {
        assert_eq!(PropertyStatus::default(), PropertyStatus::Pending);
        assert_eq!(PropertyStatus::from("bogus"), PropertyStatus::Pending);
    }

    #[test]
    fn status_parses_canonical_strings() {
        assert_eq!(PropertyStatus::parse("approved"), Some(PropertyStatus::Approved));
        assert_eq!(PropertyStatus::parse("REJECTED"), Some(PropertyStatus::Rejected));
        assert_eq!(PropertyStatus::parse("archived"), None);
        assert_eq!(PropertyStatus::Approved.to_string(), "APPROVED");
    }

    #[test]
    fn normalized_criteria_drop_blank_fields() {
        let criteria = SearchCriteria {
            location: Some("   ".into()),
            max_price: None,
            property_type: Some(" Rent ".into()),
        }
        .normalized();

        assert_eq!(criteria.location, None);
        assert_eq!(criteria.property_type.as_deref(), Some("Rent"));
        assert!(!criteria.is_empty());
        assert!(SearchCriteria::default().is_empty());
    }

    #[test]
    fn location_match_is_case_insensitive_substring() {
        let criteria = SearchCriteria {
            location: Some("colom".into()),
            ..Default::default()
        };
        assert!(criteria.matches(&listing("Colombo 07", Some(10.0), "Sale")));
        assert!(!criteria.matches(&listing("Kandy", Some(10.0), "Sale")));
    }

    #[test]
    fn price_is_inclusive_upper_bound() {
        let criteria = SearchCriteria {
            max_price: Some(100.0),
            ..Default::default()
        };
        assert!(criteria.matches(&listing("Galle", Some(100.0), "Rent")));
        assert!(!criteria.matches(&listing("Galle", Some(100.5), "Rent")));
        assert!(!criteria.matches(&listing("Galle", None, "Rent")));
    }

    #[test]
    fn type_is_exact_match() {
        let criteria = SearchCriteria {
            property_type: Some("Rent".into()),
            ..Default::default()
        };
        assert!(criteria.matches(&listing("Galle", None, "Rent")));
        assert!(!criteria.matches(&listing("Galle", None, "rent")));
    }

    #[test]
    fn blank_price_parameter_is_absent() {
        let criteria: SearchCriteria = serde_json::from_str(r#"{"price": " "}"#).unwrap();
        assert_eq!(criteria.max_price, None);

        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"price": "250000", "type": "Sale"}"#).unwrap();
        assert_eq!(criteria.max_price, Some(250000.0));
        assert_eq!(criteria.property_type.as_deref(), Some("Sale"));

        assert!(serde_json::from_str::<SearchCriteria>(r#"{"price": "cheap"}"#).is_err());
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        for raw in ["NaN", "inf", "-inf", "infinity"] {
            assert!(parse_price(raw).is_err(), "{}", raw);
            let json = format!(r#"{{"price": "{}"}}"#, raw);
            assert!(serde_json::from_str::<SearchCriteria>(&json).is_err(), "{}", raw);
        }
        assert_eq!(parse_price(" 1200.50 "), Ok(1200.5));

        assert!(valid_price(None));
        assert!(valid_price(Some(0.0)));
        assert!(!valid_price(Some(-1.0)));
        assert!(!valid_price(Some(f64::NAN)));
        assert!(!valid_price(Some(f64::INFINITY)));
    }

    #[test]
    fn missing_owner_renders_as_placeholder() {
        let property = listing("Galle", None, "Rent");
        assert_eq!(property.owner_or_placeholder(), Owner::default());
    }
}
