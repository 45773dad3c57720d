//! Journey and passenger types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gender code accepted by the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter code as the booking form expects it.
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = JourneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::Male),
            "F" | "FEMALE" => Ok(Gender::Female),
            other => Err(JourneyError::InvalidGender(other.to_string())),
        }
    }
}

/// A single traveller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    /// Age as the site accepts it (digits only).
    pub age: String,
    pub gender: Gender,
}

impl Passenger {
    pub fn new(name: impl Into<String>, age: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            gender,
        }
    }
}

/// Errors raised while assembling a journey.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JourneyError {
    #[error("Journey field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("Journey has no passengers")]
    NoPassengers,

    #[error("Invalid gender code: {0}")]
    InvalidGender(String),
}

/// What to book: stations, date and the ordered passenger list.
///
/// Immutable once built. Passenger order is significant: passenger `i` is
/// written into form row `i` and produces ticket record `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyRequest {
    origin: String,
    destination: String,
    date: String,
    passengers: Vec<Passenger>,
}

impl JourneyRequest {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: impl Into<String>,
        passengers: Vec<Passenger>,
    ) -> Result<Self, JourneyError> {
        let request = Self {
            origin: origin.into(),
            destination: destination.into(),
            date: date.into(),
            passengers,
        };

        if request.origin.trim().is_empty() {
            return Err(JourneyError::EmptyField("origin"));
        }
        if request.destination.trim().is_empty() {
            return Err(JourneyError::EmptyField("destination"));
        }
        if request.date.trim().is_empty() {
            return Err(JourneyError::EmptyField("date"));
        }
        if request.passengers.is_empty() {
            return Err(JourneyError::NoPassengers);
        }

        Ok(request)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }
}
