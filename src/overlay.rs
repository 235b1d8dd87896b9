//! Renderer hand-off for shared calculators
//!
//! Hosts that draw query results on an overlay share calculators behind
//! `Arc<Mutex<..>>` and register them here. The registry keeps weak
//! back-references only, so dropping the last owner retires the entry; a
//! posted point list is tagged with the calculator generation it was
//! computed against, and consumers skip anything stale. The engine itself
//! never touches this module.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use glam::Vec2;

use crate::safety::SafeZoneCalculator;

/// The sharing handle hosts use when a renderer observes a calculator
pub type SharedCalculator = Arc<Mutex<SafeZoneCalculator>>;

/// A query result posted for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPost {
    /// Calculator generation the points were computed against
    pub generation: u64,
    pub points: Vec<Vec2>,
}

struct Entry {
    calculator_id: u64,
    handle: Weak<Mutex<SafeZoneCalculator>>,
    post: Option<QueryPost>,
}

/// Weak-handle registry behind a single mutex
#[derive(Default)]
pub struct CalculatorRegistry {
    entries: Mutex<Vec<Entry>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a shared calculator; returns its id for later posts
    pub fn register(&self, calc: &SharedCalculator) -> u64 {
        let id = calc.lock().unwrap_or_else(PoisonError::into_inner).id();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !entries.iter().any(|e| e.calculator_id == id) {
            entries.push(Entry {
                calculator_id: id,
                handle: Arc::downgrade(calc),
                post: None,
            });
        }
        id
    }

    /// Publish a query result for the renderer
    ///
    /// A post older than what is already stored (or for an unknown or dead
    /// calculator) is dropped.
    pub fn post(&self, calculator_id: u64, generation: u64, points: Vec<Vec2>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries
            .iter_mut()
            .filter(|e| e.handle.strong_count() > 0)
            .find(|e| e.calculator_id == calculator_id)
        {
            let stale = entry
                .post
                .as_ref()
                .is_some_and(|prev| prev.generation > generation);
            if !stale {
                entry.post = Some(QueryPost { generation, points });
            }
        }
    }

    /// Take the freshest post for a calculator, pruning dead entries
    ///
    /// Returns `None` when nothing was posted, the post predates
    /// `min_generation`, or the calculator is gone.
    pub fn take_post(&self, calculator_id: u64, min_generation: u64) -> Option<QueryPost> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|e| e.handle.strong_count() > 0);
        let entry = entries
            .iter_mut()
            .find(|e| e.calculator_id == calculator_id)?;
        match &entry.post {
            Some(post) if post.generation >= min_generation => entry.post.take(),
            _ => None,
        }
    }

    /// Visit every still-alive calculator
    pub fn for_each_live(&self, mut f: impl FnMut(u64, &SharedCalculator)) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|e| e.handle.strong_count() > 0);
        for entry in entries.iter() {
            if let Some(strong) = entry.handle.upgrade() {
                f(entry.calculator_id, &strong);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.handle.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
