// src/clean/report.rs

//! Side-channel record of rows rejected during cleaning.

use std::collections::BTreeMap;

use crate::models::RecordKind;

/// One rejected row: its position in the raw document and why it fell out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub row: usize,
    pub reason: String,
}

/// Collects rejections for one record kind. Rejections never abort a
/// cleaning run; the report is logged once the kind is done.
#[derive(Debug)]
pub struct RejectionReport {
    kind: RecordKind,
    rejections: Vec<Rejection>,
}

impl RejectionReport {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            rejections: Vec::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Record a rejected row.
    pub fn reject(&mut self, row: usize, reason: impl Into<String>) {
        self.rejections.push(Rejection {
            row,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rejections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rejections.len()
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Log the rejection count and each distinct reason with its frequency.
    pub fn log_summary(&self) {
        if self.is_empty() {
            return;
        }
        log::warn!("Rejected {} {} rows during cleaning", self.len(), self.kind);

        let mut by_reason: BTreeMap<&str, usize> = BTreeMap::new();
        for rejection in &self.rejections {
            *by_reason.entry(rejection.reason.as_str()).or_default() += 1;
        }
        for (reason, occurrences) in by_reason {
            log::warn!("  {} ({}x)", reason, occurrences);
        }
    }
}
