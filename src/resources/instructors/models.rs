//! Instructor and booking models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{api::ApiError, ids::ResourceId, resources::fields};

/// Instructor Id
pub type InstructorId = ResourceId<Instructor>;

/// Booking Id
pub type BookingId = ResourceId<Booking>;

/// Highest star rating an instructor can hold.
pub const MAX_RATING: u8 = 5;

/// Instructor Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(rename = "_id")]
    pub id: InstructorId,

    pub name: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub rating: f64,

    #[serde(with = "fields::amount", default)]
    pub price: Decimal,

    #[serde(default)]
    pub description: String,
}

impl Instructor {
    /// Initials shown in place of a missing avatar.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// New instructor form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInstructor {
    pub name: String,
    pub image: String,
    pub rating: u8,

    #[serde(with = "fields::amount")]
    pub price: Decimal,

    pub description: String,
}

impl NewInstructor {
    /// Check the form before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless every field is filled in, the rating
    /// is between 1 and [`MAX_RATING`] and the price is positive.
    pub fn validate(&self) -> Result<(), ApiError> {
        let blank = [&self.name, &self.image, &self.description]
            .iter()
            .any(|field| field.trim().is_empty());

        if blank || !(1..=MAX_RATING).contains(&self.rating) || self.price <= Decimal::ZERO {
            return Err(ApiError::validation("All fields required"));
        }

        Ok(())
    }
}

/// Reference to another record: populated by the backend, or just its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference {
    Populated {
        #[serde(rename = "_id", default)]
        id: Option<String>,

        #[serde(default)]
        name: String,

        #[serde(default)]
        email: Option<String>,
    },
    Id(String),
}

impl Reference {
    /// Name when populated, otherwise the bare id.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Populated { name, .. } if !name.is_empty() => name,
            Self::Populated { id, .. } => id.as_deref().unwrap_or("unknown"),
            Self::Id(id) => id,
        }
    }
}

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ApiError::validation(format!("unknown booking status `{value}`")))
    }
}

/// Booking Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: BookingId,

    #[serde(rename = "userId", default)]
    pub user: Option<Reference>,

    #[serde(rename = "instructorId", default)]
    pub instructor: Option<Reference>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub time: String,

    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub mobile: String,

    pub status: BookingStatus,
}

impl Booking {
    /// Bookings whose user or instructor has been deleted are not shown.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.user.is_some() && self.instructor.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct BookingStatusUpdate<'a> {
    pub(crate) id: &'a BookingId,
    pub(crate) status: BookingStatus,
}
