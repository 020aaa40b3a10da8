//! Consumption domain entity

use chrono::NaiveDate;
use serde::Serialize;

use crate::shared::errors::DomainError;

/// Energy used over a billing period, not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewConsumption {
    pub kwh: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewConsumption {
    pub fn new(kwh: f64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            kwh,
            start_date,
            end_date,
        }
    }

    /// A consumption can back an invoice only with a finite positive volume and a
    /// period that does not end before it starts.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.kwh.is_finite() || self.kwh <= 0.0 {
            return Err(DomainError::Validation(
                "kWh must be greater than zero.".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(DomainError::Validation(
                "End date cannot be before start date.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_id(self, id: i32) -> Consumption {
        Consumption {
            id,
            kwh: self.kwh,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// A stored consumption period, owned by exactly one invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consumption {
    pub id: i32,
    pub kwh: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
