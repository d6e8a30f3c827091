use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{UserId, VenueId};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Venue {
    pub id: VenueId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateVenue {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub address: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub city: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub state: String,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub postal_code: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub country: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Field-masked update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VenuePatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl Venue {
    pub fn apply(&mut self, patch: &VenuePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(address) = &patch.address {
            self.address = address.clone();
        }
        if let Some(city) = &patch.city {
            self.city = city.clone();
        }
        if let Some(state) = &patch.state {
            self.state = state.clone();
        }
        if let Some(postal_code) = &patch.postal_code {
            self.postal_code = postal_code.clone();
        }
        if let Some(country) = &patch.country {
            self.country = country.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(is_public) = patch.is_public {
            self.is_public = is_public;
        }
    }
}
