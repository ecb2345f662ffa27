//! Contact service
//!
//! Contacts are the buyers and suppliers named on cash book lines.

use super::crud::{Resource, Validate};
use crate::api::ApiClient;
use crate::error::LedgerResult;
use crate::models::{Contact, ContactRequest};

impl Validate for ContactRequest {
    fn validate(&self) -> LedgerResult<()> {
        ContactRequest::validate(self)
    }
}

/// Service for contact management
pub struct ContactService<'a> {
    resource: Resource<'a, Contact, ContactRequest>,
}

impl<'a> ContactService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/contact", "Contact"),
        }
    }

    pub fn list(&self) -> LedgerResult<Vec<Contact>> {
        self.resource.list()
    }

    pub fn suppliers(&self) -> LedgerResult<Vec<Contact>> {
        self.resource.list_at("suppliers", Vec::new())
    }

    pub fn buyers(&self) -> LedgerResult<Vec<Contact>> {
        self.resource.list_at("buyers", Vec::new())
    }

    /// Server-side search; a blank term returns nothing without a request
    pub fn search(&self, term: &str) -> LedgerResult<Vec<Contact>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.resource
            .list_at("search", vec![("searchTerm".into(), term.to_string())])
    }

    pub fn get(&self, id: &str) -> LedgerResult<Contact> {
        self.resource.get(id)
    }

    pub fn create(&self, request: &ContactRequest) -> LedgerResult<Contact> {
        self.resource.create(request)
    }

    pub fn update(&self, id: &str, request: &ContactRequest) -> LedgerResult<Contact> {
        self.resource.update(id, request)
    }

    pub fn delete(&self, id: &str) -> LedgerResult<()> {
        self.resource.delete(id)
    }
}
