//! Response envelopes shared by all endpoints

use serde::Serialize;

use crate::filter::Facets;

/// `{success, message[, recordsProcessed]}` for uploads, wipes and errors
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "recordsProcessed", skip_serializing_if = "Option::is_none")]
    pub records_processed: Option<u64>,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            records_processed: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            records_processed: None,
        }
    }

    pub fn with_records(mut self, records: u64) -> Self {
        self.records_processed = Some(records);
        self
    }
}

/// `{success, count, data: [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// `{success, data: {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ItemResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ItemResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// `{success, categories, branches}`
#[derive(Debug, Clone, Serialize)]
pub struct FacetsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub facets: Facets,
}
