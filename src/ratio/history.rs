//! Bounded rolling history for the trend chart

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::DerivedRatio;
use crate::feed::PriceSample;

/// Number of entries kept in the rolling window
pub const HISTORY_CAPACITY: usize = 10;

/// One chart point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local wall-clock label of the sample (HH:MM:SS)
    pub time: String,
    pub asset_price: Decimal,
    pub commodity_price: Decimal,
    pub percentage: Decimal,
}

impl HistoryEntry {
    pub fn new(sample: &PriceSample, derived: &DerivedRatio) -> Self {
        Self {
            time: sample
                .timestamp
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string(),
            asset_price: sample.asset_price,
            commodity_price: sample.commodity_price,
            percentage: derived.percentage,
        }
    }
}

/// FIFO window holding at most `HISTORY_CAPACITY` entries, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryBuffer {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Append in place, evicting the oldest entries past capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Functional append: consumes the buffer and returns the updated one
    pub fn appended(mut self, entry: HistoryEntry) -> Self {
        self.push(entry);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entries in chronological order
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}

/// Append one entry built from `sample` and `derived` and return the new buffer
pub fn append_to_history(
    buffer: HistoryBuffer,
    sample: &PriceSample,
    derived: &DerivedRatio,
) -> HistoryBuffer {
    buffer.appended(HistoryEntry::new(sample, derived))
}
