//! Contact service - "talk to us" form submissions

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::{describe_validation, Contact, ContactForm};
use crate::ports::Store;

pub struct ContactService {
    store: Arc<dyn Store>,
}

impl ContactService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validate every field, then store with a short random id
    pub fn submit(&self, form: ContactForm) -> Result<ApiResponse<Contact>> {
        let errors = form.validate();
        if !errors.is_empty() {
            return Err(Error::validation(describe_validation(&errors)));
        }

        let form = ContactForm {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message.trim().to_string(),
        };
        let contact = Contact {
            id: short_id(),
            form,
            created_at: Some(Utc::now()),
        };
        self.store.create_contact(&contact)
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Contact>>> {
        self.store.list_contacts()
    }
}

/// First 9 hex digits of a v4 uuid
fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(9);
    id
}
