//! Journal entry listing, statistics and server-side export

use std::time::Duration;

use tracing::debug;

use super::crud::path_id;
use crate::api::{ApiClient, ResponseCache};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    JournalEntry, JournalEntryFilters, JournalEntryPage, JournalExportRequest,
    JournalExportResponse, SummaryInfo,
};

const BASE_PATH: &str = "/api/cashbookentry/journal-entries";

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

pub struct JournalEntryService<'a> {
    client: &'a ApiClient,
    pages: ResponseCache<JournalEntryPage>,
}

impl<'a> JournalEntryService<'a> {
    pub fn new(client: &'a ApiClient, cache_ttl: Duration) -> Self {
        Self {
            client,
            pages: ResponseCache::new(cache_ttl),
        }
    }

    /// One page of entries, newest first
    ///
    /// Pages are cached per filter set and page number.
    pub fn list(&self, filters: &JournalEntryFilters, page: u32, limit: u32) -> LedgerResult<JournalEntryPage> {
        filters.validate()?;
        if page == 0 {
            return Err(LedgerError::Validation("Page must be at least 1".into()));
        }
        if limit == 0 {
            return Err(LedgerError::Validation("Limit must be at least 1".into()));
        }

        let key = cache_key(filters, page, limit)?;
        self.pages.get_or_fetch(&key, || {
            let mut query = vec![
                ("page".to_string(), page.to_string()),
                ("limit".to_string(), limit.to_string()),
                ("sortBy".to_string(), "TransactionDate".to_string()),
                ("sortOrder".to_string(), "desc".to_string()),
            ];
            query.extend(filters.query_params());
            debug!(page, limit, "fetching journal entries");
            self.client.get(BASE_PATH, query)
        })
    }

    pub fn get_by_id(&self, id: &str) -> LedgerResult<JournalEntry> {
        let id = path_id("Journal entry", id)?;
        self.client
            .get(&format!("{}/{}", BASE_PATH, id), Vec::new())
            .map_err(|e| match e {
                LedgerError::NotFound { .. } => LedgerError::NotFound {
                    entity_type: "Journal entry",
                    identifier: id.to_string(),
                },
                other => other,
            })
    }

    /// Totals for the date, type and category filters
    pub fn statistics(&self, filters: &JournalEntryFilters) -> LedgerResult<SummaryInfo> {
        filters.validate()?;
        self.client.get(
            &format!("{}/statistics", BASE_PATH),
            filters.statistics_params(),
        )
    }

    /// Ask the server to export the filtered listing
    pub fn export(&self, request: &JournalExportRequest) -> LedgerResult<JournalExportResponse> {
        if request.columns.is_empty() {
            return Err(LedgerError::Validation(
                "Select at least one column to export".into(),
            ));
        }
        self.client.post(&format!("{}/export", BASE_PATH), request)
    }

    pub fn clear_cache(&self) {
        self.pages.invalidate_all();
    }
}

fn cache_key(filters: &JournalEntryFilters, page: u32, limit: u32) -> LedgerResult<String> {
    Ok(format!(
        "{}:{}:{}",
        serde_json::to_string(filters)?,
        page,
        limit
    ))
}
