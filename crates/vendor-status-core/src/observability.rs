use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{TreeResult, VendorStatus};

/// Per-status tally of a classified batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub by_status: BTreeMap<VendorStatus, usize>,
}

impl StatusCounts {
    pub fn from_results(results: &[TreeResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.record(result.status);
        }
        counts
    }

    pub fn record(&mut self, status: VendorStatus) {
        self.total += 1;
        *self.by_status.entry(status).or_default() += 1;
    }

    pub fn get(&self, status: VendorStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_status() {
        let results = [
            TreeResult {
                id: 1,
                status: VendorStatus::Closed,
            },
            TreeResult {
                id: 2,
                status: VendorStatus::DeliveryOnline,
            },
            TreeResult {
                id: 3,
                status: VendorStatus::Closed,
            },
        ];
        let counts = StatusCounts::from_results(&results);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.get(VendorStatus::Closed), 2);
        assert_eq!(counts.get(VendorStatus::DeliveryOnline), 1);
        assert_eq!(counts.get(VendorStatus::OpensAt), 0);
    }

    #[test]
    fn serializes_status_keys_by_name() {
        let mut counts = StatusCounts::default();
        counts.record(VendorStatus::PickUpOnline);
        let v = serde_json::to_value(&counts).unwrap();
        assert_eq!(v["by_status"]["PICK_UP_ONLINE"], 1);
        assert_eq!(v["total"], 1);
    }
}
