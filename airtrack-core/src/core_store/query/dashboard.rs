//! Dashboard aggregation over one user's airdrops and testnets

use crate::core_store::model::{Airdrop, Testnet};
use serde::{Deserialize, Serialize};

/// Summary counters shown on the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_airdrops: usize,
    pub completed_airdrops: usize,
    /// Testnets not yet completed
    pub active_testnets: usize,
    /// Active testnets plus incomplete airdrops
    pub daily_tasks: usize,
    /// Completed share of airdrops, rounded; 0 when there are none
    pub progress_percentage: u32,
}

impl DashboardStats {
    /// Callers pass slices already filtered to one user
    pub fn compute(airdrops: &[Airdrop], testnets: &[Testnet]) -> Self {
        let total_airdrops = airdrops.len();
        let completed_airdrops = airdrops.iter().filter(|a| a.completed).count();
        let active_testnets = testnets.iter().filter(|t| !t.completed).count();
        let daily_tasks = active_testnets + (total_airdrops - completed_airdrops);

        let progress_percentage = if total_airdrops > 0 {
            (completed_airdrops as f64 / total_airdrops as f64 * 100.0).round() as u32
        } else {
            0
        };

        DashboardStats {
            total_airdrops,
            completed_airdrops,
            active_testnets,
            daily_tasks,
            progress_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_store::model::{Entity, EntityId, NewAirdrop, NewTestnet, Timestamp};

    fn airdrops(completed: &[bool]) -> Vec<Airdrop> {
        completed
            .iter()
            .enumerate()
            .map(|(i, done)| {
                let mut a = Airdrop::create(
                    NewAirdrop::default(),
                    EntityId::new(format!("a{i}")),
                    Timestamp::from_millis(i as u64),
                );
                a.completed = *done;
                a
            })
            .collect()
    }

    fn testnets(completed: &[bool]) -> Vec<Testnet> {
        completed
            .iter()
            .enumerate()
            .map(|(i, done)| {
                let mut t = Testnet::create(
                    NewTestnet::default(),
                    EntityId::new(format!("t{i}")),
                    Timestamp::from_millis(i as u64),
                );
                t.completed = *done;
                t
            })
            .collect()
    }

    #[test]
    fn test_empty_dashboard() {
        assert_eq!(DashboardStats::compute(&[], &[]), DashboardStats::default());
    }

    #[test]
    fn test_counts_and_rounding() {
        let stats = DashboardStats::compute(
            &airdrops(&[true, false, false]),
            &testnets(&[false, true, false]),
        );

        assert_eq!(stats.total_airdrops, 3);
        assert_eq!(stats.completed_airdrops, 1);
        assert_eq!(stats.active_testnets, 2);
        assert_eq!(stats.daily_tasks, 4);
        // 33.33 rounds down
        assert_eq!(stats.progress_percentage, 33);
    }

    #[test]
    fn test_rounds_half_up() {
        let stats = DashboardStats::compute(&airdrops(&[true, true, false]), &[]);
        assert_eq!(stats.progress_percentage, 67);

        let stats = DashboardStats::compute(&airdrops(&[true, false]), &[]);
        assert_eq!(stats.progress_percentage, 50);
    }
}
