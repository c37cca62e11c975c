//! Single-slot holder for the current filter criteria.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::criteria::{CriteriaError, CriteriaField, FilterCriteria, SetMember};

/// Holds exactly one complete [`FilterCriteria`] snapshot.
///
/// Updates compute the next value from the current one while holding the
/// lock, so edits arriving back to back are applied in sequence and none
/// is lost to a stale read.
#[derive(Debug)]
pub struct CriteriaStore {
    current: Mutex<Arc<FilterCriteria>>,
}

impl Default for CriteriaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CriteriaStore {
    /// Create a store at the default criteria
    pub fn new() -> Self {
        Self::with_criteria(FilterCriteria::default())
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            current: Mutex::new(Arc::new(criteria)),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<FilterCriteria> {
        Arc::clone(&self.lock())
    }

    /// Replace the snapshot with `f(current)`.
    ///
    /// On error the current snapshot stays in place.
    pub fn update<F>(&self, f: F) -> Result<Arc<FilterCriteria>, CriteriaError>
    where
        F: FnOnce(&FilterCriteria) -> Result<FilterCriteria, CriteriaError>,
    {
        let mut slot = self.lock();
        let next = Arc::new(f(&**slot)?);
        *slot = Arc::clone(&next);
        debug!("Filter criteria updated: {:?}", next);
        Ok(next)
    }

    pub fn set_field(&self, field: CriteriaField) -> Result<Arc<FilterCriteria>, CriteriaError> {
        self.update(|current| current.with_field(field))
    }

    pub fn toggle_set_member(&self, member: SetMember) -> Arc<FilterCriteria> {
        self.publish(|current| current.with_toggled(member))
    }

    /// Back to the default criteria
    pub fn reset(&self) -> Arc<FilterCriteria> {
        self.publish(|_| FilterCriteria::default())
    }

    /// `update` for edits that cannot be rejected
    fn publish<F>(&self, f: F) -> Arc<FilterCriteria>
    where
        F: FnOnce(&FilterCriteria) -> FilterCriteria,
    {
        match self.update(|current| Ok(f(current))) {
            Ok(next) => next,
            Err(e) => unreachable!("infallible criteria edit failed: {}", e),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Arc<FilterCriteria>> {
        // The slot only ever holds a fully built value, so a poisoned lock is still usable
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
