//! Warehouse service

use super::crud::{Resource, Validate};
use crate::api::ApiClient;
use crate::error::LedgerResult;
use crate::models::{Warehouse, WarehouseRequest};

impl Validate for WarehouseRequest {
    fn validate(&self) -> LedgerResult<()> {
        WarehouseRequest::validate(self)
    }
}

/// Service for warehouse management
pub struct WarehouseService<'a> {
    resource: Resource<'a, Warehouse, WarehouseRequest>,
}

impl<'a> WarehouseService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/Warehouse", "Warehouse"),
        }
    }

    pub fn list(&self) -> LedgerResult<Vec<Warehouse>> {
        self.resource.list()
    }

    pub fn list_active(&self) -> LedgerResult<Vec<Warehouse>> {
        self.resource.list_active()
    }

    pub fn get(&self, id: &str) -> LedgerResult<Warehouse> {
        self.resource.get(id)
    }

    pub fn create(&self, request: &WarehouseRequest) -> LedgerResult<Warehouse> {
        self.resource.create(request)
    }

    pub fn update(&self, id: &str, request: &WarehouseRequest) -> LedgerResult<Warehouse> {
        self.resource.update(id, request)
    }

    pub fn delete(&self, id: &str) -> LedgerResult<()> {
        self.resource.delete(id)
    }
}
