use serde::{Deserialize, Serialize};

use crate::submissions::SubmissionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    /// We call the customer back.
    Phone,
    /// A technician comes to the customer's address.
    Visit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(rename = "type")]
    pub kind: BookingKind,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub problem_summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Anything a visitor can send to the shop.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Submission {
    Booking(BookingRequest),
    Contact(ContactRequest),
}

fn require(field: &'static str, value: &str) -> Result<(), SubmissionError> {
    if value.trim().is_empty() {
        return Err(SubmissionError::MissingField(field));
    }
    Ok(())
}

impl BookingRequest {
    /// Required-field check only. A home visit also needs an address.
    pub fn validate(&self) -> Result<(), SubmissionError> {
        require("name", &self.name)?;
        require("phone", &self.phone)?;
        require("date", &self.date)?;
        require("time", &self.time)?;
        if self.kind == BookingKind::Visit {
            require("address", self.address.as_deref().unwrap_or_default())?;
        }
        Ok(())
    }
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), SubmissionError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("message", &self.message)
    }
}

impl Submission {
    pub fn validate(&self) -> Result<(), SubmissionError> {
        match self {
            Submission::Booking(b) => b.validate(),
            Submission::Contact(c) => c.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(kind: BookingKind, address: Option<&str>) -> BookingRequest {
        BookingRequest {
            kind,
            name: "Marko Marković".to_string(),
            phone: "0641234567".to_string(),
            email: None,
            date: "2026-10-20".to_string(),
            time: "10:00".to_string(),
            address: address.map(str::to_string),
            problem_summary: "Slika treperi".to_string(),
        }
    }

    #[test]
    fn test_phone_booking_needs_no_address() {
        assert!(booking(BookingKind::Phone, None).validate().is_ok());
    }

    #[test]
    fn test_visit_booking_requires_address() {
        assert_eq!(
            booking(BookingKind::Visit, Some("  ")).validate(),
            Err(SubmissionError::MissingField("address"))
        );
        assert!(booking(BookingKind::Visit, Some("Kralja Petra 1, Beograd"))
            .validate()
            .is_ok());
    }

    #[test]
    fn test_booking_deserializes_camel_case_form() {
        let request: BookingRequest = serde_json::from_str(
            r#"{"type": "visit", "name": "Ana", "phone": "0601112223", "date": "2026-10-21",
                "time": "14:00", "address": "Bulevar 5", "problemSummary": "Klima curi"}"#,
        )
        .unwrap();
        assert_eq!(request.kind, BookingKind::Visit);
        assert_eq!(request.problem_summary, "Klima curi");
    }

    #[test]
    fn test_contact_requires_message() {
        let request = ContactRequest {
            name: "Ana".to_string(),
            email: "ana@example.rs".to_string(),
            message: String::new(),
        };
        assert_eq!(
            request.validate(),
            Err(SubmissionError::MissingField("message"))
        );
    }
}
