//! Per-market rate at target store.
//!
//! Each market owns its own lock, so updates to different markets never
//! contend and an update to one market is a single critical section. The outer
//! map lock is only held to find or insert a market's slot.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use alloy_primitives::I256;

use crate::error::{self, IrmError};
use crate::irm::is_valid_rate_at_target;
use crate::market::MarketId;

type Slot = Arc<Mutex<I256>>;

/// Mapping from market to its current rate at target.
///
/// Absent markets read as zero. Entries are never removed.
#[derive(Debug, Default)]
pub struct RateAtTargetStore {
    slots: RwLock<HashMap<MarketId, Slot>>,
}

impl RateAtTargetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rate at target of a market, zero if it was never seeded.
    pub fn get(&self, id: &MarketId) -> I256 {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(id).map_or(I256::ZERO, |slot| {
            *slot.lock().unwrap_or_else(PoisonError::into_inner)
        })
    }

    /// Runs a read-modify-write of one market's value while holding its lock.
    ///
    /// `update` receives the current value and returns the value to store
    /// alongside its own output. If it fails, the stored value is left as is.
    pub(crate) fn update<T, E>(
        &self,
        id: MarketId,
        update: impl FnOnce(I256) -> Result<(I256, T), E>,
    ) -> Result<T, E> {
        let slot = self.slot(id);
        let mut value = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let (next, output) = update(*value)?;
        *value = next;
        Ok(output)
    }

    fn slot(&self, id: MarketId) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(id).or_default())
    }

    /// Number of markets with a slot.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ordered copy of every seeded market's rate at target.
    pub fn snapshot(&self) -> BTreeMap<MarketId, I256> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .iter()
            .map(|(id, slot)| (*id, *slot.lock().unwrap_or_else(PoisonError::into_inner)))
            .filter(|(_, rate)| !rate.is_zero())
            .collect()
    }

    /// Rebuilds a store from a snapshot or any other list of market rates.
    ///
    /// # Errors
    ///
    /// [`IrmError::RateAtTargetOutOfBounds`] if a rate is neither zero nor
    /// within the rate at target bounds.
    pub fn restore(entries: impl IntoIterator<Item = (MarketId, I256)>) -> error::Result<Self> {
        let slots = entries
            .into_iter()
            .map(|(id, rate)| {
                if !is_valid_rate_at_target(rate) {
                    return Err(IrmError::RateAtTargetOutOfBounds { rate });
                }
                Ok((id, Arc::new(Mutex::new(rate))))
            })
            .collect::<error::Result<HashMap<_, _>>>()?;
        Ok(Self {
            slots: RwLock::new(slots),
        })
    }
}
