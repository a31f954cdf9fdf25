//! Dashboard and analytics figures derived from a delegation collection.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::delegation::{DelegateStatus, Delegation, DelegationStatus, DurationType, Platform};

/// Usage figures over records that neither party has deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Rounded percentage of `accepted` over `total`; 0 for an empty set.
    pub success_rate: u32,
    pub by_duration: BTreeMap<&'static str, usize>,
    pub by_platform: BTreeMap<&'static str, usize>,
}

impl DelegationStats {
    pub fn compute(records: &[Delegation]) -> Self {
        let mut by_duration: BTreeMap<&'static str, usize> =
            DurationType::ALL.iter().map(|d| (d.as_str(), 0)).collect();
        let mut by_platform: BTreeMap<&'static str, usize> =
            Platform::ALL.iter().map(|p| (p.as_str(), 0)).collect();

        let mut total = 0;
        let mut accepted = 0;
        let mut rejected = 0;
        for d in records.iter().filter(|d| visible_to_both(d)) {
            total += 1;
            if d.delegate_status == DelegateStatus::Accepted {
                accepted += 1;
            }
            if d.status == DelegationStatus::Rejected {
                rejected += 1;
            }
            *by_duration.entry(d.duration_type.as_str()).or_default() += 1;
            *by_platform.entry(d.platform.as_str()).or_default() += 1;
        }

        Self {
            total,
            accepted,
            rejected,
            success_rate: success_rate(accepted, total),
            by_duration,
            by_platform,
        }
    }
}

fn success_rate(accepted: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    // Integer round-half-up of accepted * 100 / total.
    ((accepted * 200 + total) / (total * 2)) as u32
}

fn visible_to_both(d: &Delegation) -> bool {
    !d.grantor_visibility.deleted && !d.delegate_visibility.deleted
}

/// Headline counters for the grantor dashboard. Counts every record,
/// including soft-deleted ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub pending: usize,
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

impl StatusSummary {
    pub fn compute(records: &[Delegation]) -> Self {
        let count = |status| records.iter().filter(|d| d.status == status).count();
        Self {
            pending: count(DelegationStatus::Pending),
            active: count(DelegationStatus::Active),
            completed: count(DelegationStatus::Completed),
            total: records.len(),
        }
    }
}

/// First `n` records in collection order (newest first) that neither party
/// has deleted.
pub fn latest(records: &[Delegation], n: usize) -> Vec<&Delegation> {
    records.iter().filter(|d| visible_to_both(d)).take(n).collect()
}
