use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use insomniac_core::Request;
use insomniac_store::StoredResponse;
use serde::{Serialize, Serializer};

/// Outcome column of a completion report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The request was sent and answered with this status code.
    Code(u16),
    /// The sender failed.
    Error,
    /// A dependency reported an error, so the request was never sent.
    NotRun,
}

impl Status {
    pub fn as_code(&self) -> Option<u16> {
        match self {
            Status::Code(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Code(code) => write!(f, "{code}"),
            Status::Error => f.write_str("ERROR"),
            Status::NotRun => f.write_str("NOT RUN"),
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Status::Code(code) => serializer.serialize_u16(*code),
            Status::Error => serializer.serialize_str("ERROR"),
            Status::NotRun => serializer.serialize_str("NOT RUN"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRecord {
    pub status: Status,
    pub request: Arc<Request>,
    pub response: Option<StoredResponse>,
    pub error: Option<String>,
}

impl CompletionRecord {
    pub fn request_id(&self) -> &str {
        &self.request.id
    }
}

/// Write-once aggregation of completion records, keyed by request id.
#[derive(Debug)]
pub struct CompletionMap {
    expected: usize,
    records: HashMap<String, Arc<CompletionRecord>>,
}

impl CompletionMap {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            records: HashMap::with_capacity(expected),
        }
    }

    /// Keep `record` unless its request already has one. Returns whether it
    /// was kept.
    pub fn record(&mut self, record: Arc<CompletionRecord>) -> bool {
        if self.records.contains_key(record.request_id()) {
            return false;
        }
        self.records.insert(record.request_id().to_string(), record);
        true
    }

    pub fn is_done(&self) -> bool {
        self.records.len() >= self.expected
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, request_id: &str) -> Option<&CompletionRecord> {
        self.records.get(request_id).map(Arc::as_ref)
    }

    pub fn into_records(self) -> Vec<CompletionRecord> {
        self.records
            .into_values()
            .map(Arc::unwrap_or_clone)
            .collect()
    }
}
