use serde::Deserialize;

use crate::validate::present;

/// Request payload for create and update. Every field is optional here; the
/// service decides which ones are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validated fields for a new customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fields to overwrite on update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CustomerChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl From<CustomerInput> for CustomerChanges {
    fn from(input: CustomerInput) -> Self {
        Self {
            name: present(input.name),
            email: present(input.email),
            phone: present(input.phone),
        }
    }
}
