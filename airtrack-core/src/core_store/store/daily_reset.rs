//! Per-day watermark for the daily airdrop reset
//!
//! The watermark holds the last date the reset ran. A check on a new date
//! runs the action once and moves the watermark forward.

use crate::core_store::model::Airdrop;
use crate::core_store::store::entity_store::EntityStore;
use crate::core_store::store::errors::StoreResult;
use crate::core_store::store::snapshot::SnapshotAdapter;
use chrono::NaiveDate;

pub const DAILY_RESET_KEY: &str = "airdrop-daily-reset";

pub struct DailyReset {
    snapshots: SnapshotAdapter,
}

impl DailyReset {
    pub fn new(snapshots: SnapshotAdapter) -> Self {
        DailyReset { snapshots }
    }

    /// Date of the last completed reset
    pub fn last_reset(&self) -> StoreResult<Option<NaiveDate>> {
        self.snapshots.load(DAILY_RESET_KEY)
    }

    /// Run `action` if the watermark is not `today`; returns whether it ran
    ///
    /// The watermark only moves after the action succeeds.
    pub fn check<F>(&self, today: NaiveDate, action: F) -> StoreResult<bool>
    where
        F: FnOnce() -> StoreResult<()>,
    {
        if self.last_reset()? == Some(today) {
            return Ok(false);
        }

        action()?;
        self.snapshots.save(DAILY_RESET_KEY, &today)?;
        Ok(true)
    }
}

impl EntityStore<Airdrop> {
    /// Daily reset trigger for airdrops
    ///
    /// The reset itself touches no records yet; only the watermark moves.
    pub fn check_daily_reset(&self, today: NaiveDate) -> StoreResult<bool> {
        let reset = DailyReset::new(self.snapshots().clone());
        let ran = reset.check(today, || {
            tracing::info!(%today, "daily airdrop reset");
            Ok(())
        })?;

        if !ran {
            tracing::debug!(%today, "daily reset already ran today");
        }
        Ok(ran)
    }
}
