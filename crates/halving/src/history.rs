//! Append-only audit trail of completed distributions.
//!
//! `append` is the only mutation; records are never updated or deleted.
//! Backs the paginated history query and timestamp-range reporting used by
//! the off-chain daemon.

use crate::state::DistributionRecord;
use ember_types::{Uembr, UnixTime};
use serde::{Deserialize, Serialize};

/// Applied when a page request passes limit 0.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub records: Vec<DistributionRecord>,
    pub total: usize,
    /// Offset of the next page, if any records remain.
    pub next_offset: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionHistory {
    records: Vec<DistributionRecord>,
}

impl DistributionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from genesis records, restoring timestamp order.
    pub fn from_records(mut records: Vec<DistributionRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    pub fn append(&mut self, record: DistributionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DistributionRecord] {
        &self.records
    }

    pub fn total_distributed(&self) -> Uembr {
        self.records
            .iter()
            .fold(0, |acc: Uembr, r| acc.saturating_add(r.amount))
    }

    pub fn page(&self, req: &PageRequest) -> Page {
        let limit = if req.limit == 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            req.limit
        };
        let start = req.offset.min(self.records.len());
        let end = start.saturating_add(limit).min(self.records.len());

        Page {
            records: self.records[start..end].to_vec(),
            total: self.records.len(),
            next_offset: (end < self.records.len()).then_some(end),
        }
    }

    /// Records with `from <= timestamp < to`.
    pub fn between(&self, from: UnixTime, to: UnixTime) -> Vec<DistributionRecord> {
        self.records
            .iter()
            .filter(|r| r.timestamp >= from && r.timestamp < to)
            .cloned()
            .collect()
    }
}
