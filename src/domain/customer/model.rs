//! Customer domain entity

use serde::Serialize;

use crate::shared::errors::DomainError;
use crate::shared::validations::require_non_blank;

/// Customer details captured before the first insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl NewCustomer {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Checks name, address, email and phone in that order; the first blank
    /// field is reported.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_blank("Name", &self.name)?;
        require_non_blank("Address", &self.address)?;
        require_non_blank("Email", &self.email)?;
        require_non_blank("Phone", &self.phone)?;
        Ok(())
    }

    /// Attach the identity generated by the store
    pub fn with_id(self, id: i32) -> Customer {
        Customer {
            id,
            name: self.name,
            address: self.address,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// A persisted customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> NewCustomer {
        NewCustomer::new("Ana", "Main St 1", "ana@x.com", "555-0001")
    }

    #[test]
    fn complete_customer_is_valid() {
        assert!(ana().validate().is_ok());
    }

    #[test]
    fn first_blank_field_wins() {
        let mut c = ana();
        c.address = " ".into();
        c.phone = String::new();
        let err = c.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation: Address cannot be empty.");
    }

    #[test]
    fn each_field_is_required() {
        let cases: [(fn(&mut NewCustomer), &str); 4] = [
            (|c| c.name.clear(), "Name"),
            (|c| c.address.clear(), "Address"),
            (|c| c.email.clear(), "Email"),
            (|c| c.phone.clear(), "Phone"),
        ];
        for (blank, label) in cases {
            let mut c = ana();
            blank(&mut c);
            let err = c.validate().unwrap_err();
            assert_eq!(err.to_string(), format!("Validation: {} cannot be empty.", label));
        }
    }

    #[test]
    fn with_id_keeps_details() {
        let c = ana().with_id(7);
        assert_eq!(c.id, 7);
        assert_eq!(c.email, "ana@x.com");
        assert_eq!(c.to_string(), "Ana");
    }
}
