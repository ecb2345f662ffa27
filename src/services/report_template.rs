//! Report template service

use super::crud::{path_id, Resource, Validate};
use crate::api::ApiClient;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ReportTemplate, ReportTemplateRequest};

impl Validate for ReportTemplateRequest {
    fn validate(&self) -> LedgerResult<()> {
        ReportTemplateRequest::validate(self)
    }
}

pub struct ReportTemplateService<'a> {
    resource: Resource<'a, ReportTemplate, ReportTemplateRequest>,
}

impl<'a> ReportTemplateService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/ReportTemplate", "Report template"),
        }
    }

    pub fn list(&self) -> LedgerResult<Vec<ReportTemplate>> {
        self.resource.list()
    }

    pub fn list_active(&self) -> LedgerResult<Vec<ReportTemplate>> {
        self.resource.list_active()
    }

    pub fn by_type(&self, report_type: &str) -> LedgerResult<Vec<ReportTemplate>> {
        let report_type = path_id("Report type", report_type).map_err(|_| {
            LedgerError::Validation(format!("Invalid report type '{}'", report_type.trim()))
        })?;
        self.resource
            .list_at(&format!("by-type/{}", report_type), Vec::new())
    }

    /// Templates created by the logged-in user
    pub fn my_templates(&self) -> LedgerResult<Vec<ReportTemplate>> {
        self.resource.list_at("my-templates", Vec::new())
    }

    pub fn get(&self, id: &str) -> LedgerResult<ReportTemplate> {
        self.resource.get(id)
    }

    pub fn create(&self, request: &ReportTemplateRequest) -> LedgerResult<ReportTemplate> {
        self.resource.create(request)
    }

    pub fn update(&self, id: &str, request: &ReportTemplateRequest) -> LedgerResult<ReportTemplate> {
        self.resource.update(id, request)
    }

    /// System templates are owned by the server and cannot be removed
    pub fn delete(&self, template: &ReportTemplate) -> LedgerResult<()> {
        if template.is_system {
            return Err(LedgerError::Validation(format!(
                "'{}' is a system template and cannot be deleted",
                template.template_name
            )));
        }
        self.resource.delete(&template.id)
    }
}
