use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

pub const MIN_TICKETS: i64 = 1;
pub const MAX_TICKETS: i64 = 10;

lazy_static! {
    // local-part "@" domain "." suffix, no whitespace anywhere
    static ref MAILBOX_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field")]
    MissingField,
    #[error("ticket count out of range")]
    TicketCountOutOfRange,
    #[error("ticket count is not a number")]
    InvalidTicketCount,
    #[error("malformed email")]
    MalformedEmail,
    #[error("malformed request body")]
    MalformedBody,
}

/// The form keeps the ticket select's value as a string; API clients send a
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TicketCount {
    Number(i64),
    Text(String),
}

impl TicketCount {
    /// `None` for a blank string, which counts as an absent field.
    fn resolve(self) -> Option<Result<i64, ValidationError>> {
        match self {
            TicketCount::Number(n) => Some(Ok(n)),
            TicketCount::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(
                        trimmed
                            .parse::<i64>()
                            .map_err(|_| ValidationError::InvalidTicketCount),
                    )
                }
            }
        }
    }
}

/// Reservation form body exactly as the browser posts it.
#[derive(Debug, Default, Deserialize)]
pub struct ReservationPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub tickets: Option<TicketCount>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// A reservation that passed validation. Only ever used to render the two
/// notification messages, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub name: String,
    pub email: String,
    pub tickets: u8,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ReservationPayload {
    /// Checks presence first, then the ticket range, then the mailbox shape.
    pub fn validate(self) -> Result<Reservation, ValidationError> {
        let name = non_blank(self.name).ok_or(ValidationError::MissingField)?;
        let email = non_blank(self.email).ok_or(ValidationError::MissingField)?;
        let tickets = self
            .tickets
            .and_then(TicketCount::resolve)
            .ok_or(ValidationError::MissingField)??;

        if !(MIN_TICKETS..=MAX_TICKETS).contains(&tickets) {
            return Err(ValidationError::TicketCountOutOfRange);
        }

        let email = email.trim().to_string();
        if !MAILBOX_REGEX.is_match(&email) {
            return Err(ValidationError::MalformedEmail);
        }

        Ok(Reservation {
            name,
            email,
            tickets: tickets as u8,
            phone: non_blank(self.phone),
            message: non_blank(self.message),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
