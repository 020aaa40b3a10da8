//! Invoice domain entity

use serde::Serialize;

use crate::domain::consumption::Consumption;
use crate::domain::customer::Customer;
use crate::domain::tariff::TariffCalculator;

/// An invoice priced against the current tariff, awaiting its insert.
///
/// Rate and total are fixed here and carried unchanged into the stored
/// [`Invoice`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    customer: Customer,
    consumption: Consumption,
    applied_rate: f64,
    total_to_pay: f64,
}

impl NewInvoice {
    /// Price an already stored consumption for the given customer
    pub fn priced(customer: Customer, consumption: Consumption) -> Self {
        let applied_rate = TariffCalculator::rate_for(consumption.kwh);
        let total_to_pay = TariffCalculator::total_for(consumption.kwh);
        Self {
            customer,
            consumption,
            applied_rate,
            total_to_pay,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn consumption(&self) -> &Consumption {
        &self.consumption
    }

    pub fn applied_rate(&self) -> f64 {
        self.applied_rate
    }

    pub fn total_to_pay(&self) -> f64 {
        self.total_to_pay
    }

    pub fn with_id(self, id: i32) -> Invoice {
        Invoice {
            id,
            customer: self.customer,
            consumption: self.consumption,
            applied_rate: self.applied_rate,
            total_to_pay: self.total_to_pay,
        }
    }
}

/// A stored invoice with its customer and consumption
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    id: i32,
    customer: Customer,
    consumption: Consumption,
    applied_rate: f64,
    total_to_pay: f64,
}

impl Invoice {
    /// Rebuild an invoice from stored columns. Rate and total are taken as
    /// stored, never recomputed.
    pub fn from_storage(
        id: i32,
        customer: Customer,
        consumption: Consumption,
        applied_rate: f64,
        total_to_pay: f64,
    ) -> Self {
        Self {
            id,
            customer,
            consumption,
            applied_rate,
            total_to_pay,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn consumption(&self) -> &Consumption {
        &self.consumption
    }

    pub fn applied_rate(&self) -> f64 {
        self.applied_rate
    }

    pub fn total_to_pay(&self) -> f64 {
        self.total_to_pay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn customer() -> Customer {
        Customer {
            id: 1,
            name: "Ana".into(),
            address: "Main St 1".into(),
            email: "ana@x.com".into(),
            phone: "555-0001".into(),
        }
    }

    fn consumption(kwh: f64) -> Consumption {
        Consumption {
            id: 3,
            kwh,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        }
    }

    #[test]
    fn priced_uses_tier_rate() {
        let pending = NewInvoice::priced(customer(), consumption(250.0));
        assert_eq!(pending.applied_rate(), 0.15);
        assert_eq!(pending.total_to_pay(), 37.5);
    }

    #[test]
    fn total_equals_kwh_times_rate() {
        for kwh in [12.0, 100.0, 180.5, 300.0, 301.0] {
            let pending = NewInvoice::priced(customer(), consumption(kwh));
            assert_eq!(pending.total_to_pay(), kwh * pending.applied_rate());
        }
    }

    #[test]
    fn with_id_freezes_pricing() {
        let invoice = NewInvoice::priced(customer(), consumption(500.0)).with_id(9);
        assert_eq!(invoice.id(), 9);
        assert_eq!(invoice.applied_rate(), 0.20);
        assert_eq!(invoice.total_to_pay(), 100.0);
        assert_eq!(invoice.customer().id, 1);
        assert_eq!(invoice.consumption().id, 3);
    }

    #[test]
    fn from_storage_keeps_stored_rate() {
        // A rate stored under an older schedule is not re-derived
        let invoice = Invoice::from_storage(4, customer(), consumption(250.0), 0.11, 27.5);
        assert_eq!(invoice.applied_rate(), 0.11);
        assert_eq!(invoice.total_to_pay(), 27.5);
    }
}
