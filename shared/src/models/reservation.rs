//! Reservation Model

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Table reservation (display only, no derived state)
///
/// `date` and `time` are passed through exactly as the store formats them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub name: String,
    pub phone: String,
    pub persons: i32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

impl ReservationRecord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "reservation name",
            });
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "reservation phone",
            });
        }
        if self.persons <= 0 {
            return Err(ValidationError::InvalidPartySize {
                name: self.name.clone(),
                persons: self.persons,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_validate() {
        let json = r#"{"name": "Marta", "phone": "600123123", "persons": 4, "date": "2024-05-02", "time": "21:00"}"#;
        let reservation: ReservationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(reservation.persons, 4);
        assert!(reservation.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_contact() {
        let reservation = ReservationRecord {
            name: "Marta".to_string(),
            phone: "  ".to_string(),
            persons: 2,
            date: String::new(),
            time: String::new(),
        };
        assert_eq!(
            reservation.validate(),
            Err(ValidationError::EmptyField {
                field: "reservation phone"
            })
        );
    }
}
