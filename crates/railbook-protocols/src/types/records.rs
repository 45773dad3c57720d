//! Flat value records handed to and produced by the orchestrator.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::journey::{Gender, JourneyRequest, Passenger};

/// Contact details entered after the passenger rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub address: String,
    pub postal_code: String,
}

/// Card details entered on the payment page.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub holder_name: String,
}

impl PaymentInfo {
    /// Last four digits of the card, for logs.
    pub fn masked_card(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &self.masked_card())
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .field("holder_name", &self.holder_name)
            .finish()
    }
}

/// Booking-site login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Transaction and reservation identifiers of one purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptIds {
    pub transaction_id: String,
    pub reservation_id: String,
}

/// One passenger's ticket, input to the artifact emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub passenger_name: String,
    pub age: String,
    pub gender: Gender,
    pub origin: String,
    pub destination: String,
    pub transaction_id: String,
    pub reservation_id: String,
}

impl TicketRecord {
    pub fn new(journey: &JourneyRequest, passenger: &Passenger, receipt: &ReceiptIds) -> Self {
        Self {
            passenger_name: passenger.name.clone(),
            age: passenger.age.clone(),
            gender: passenger.gender,
            origin: journey.origin().to_string(),
            destination: journey.destination().to_string(),
            transaction_id: receipt.transaction_id.clone(),
            reservation_id: receipt.reservation_id.clone(),
        }
    }

    /// One record per passenger, in passenger order, all sharing `receipt`.
    pub fn for_journey(journey: &JourneyRequest, receipt: &ReceiptIds) -> Vec<Self> {
        journey
            .passengers()
            .iter()
            .map(|p| Self::new(journey, p, receipt))
            .collect()
    }
}
