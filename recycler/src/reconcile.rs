use alloc::vec::Vec;

use crate::pool::{Cell, CellPool};
use crate::template::ActiveMap;
use crate::{IndexRange, TemplateId};

/// Everything the reconciler needs from the outside world during a pass.
///
/// [`crate::Recycler`] implements this over its layout, data source, and render surface; tests
/// implement it with recording doubles to assert call order.
pub trait CellHost<H, T> {
    /// Current number of items in the data source.
    fn count(&self) -> usize;

    /// The template `index` must be rendered with, or `None` when no usable template exists.
    fn template_for(&mut self, index: usize) -> Option<T>;

    fn instantiate(&mut self, template: &T) -> H;

    /// Places a freshly activated cell for `index`.
    fn position(&mut self, handle: &mut H, index: usize);

    /// Binds the data at `index`. Only called with `index < count()`.
    fn bind(&mut self, handle: &mut H, index: usize);

    fn detach(&mut self, handle: &mut H);

    fn destroy(&mut self, handle: H);
}

/// The set of materialized indexes and the cells bound to them.
///
/// This is the single source of truth for which indexes are live. It owns the [`CellPool`];
/// cells move into the pool on deactivation and back out on activation, never shared.
#[derive(Clone, Debug)]
pub struct ActiveSet<H, T> {
    range: IndexRange,
    cells: ActiveMap<Cell<H, T>>,
    pool: CellPool<H, T>,
    skipped: usize,
}

impl<H, T: TemplateId> Default for ActiveSet<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, T: TemplateId> ActiveSet<H, T> {
    pub fn new() -> Self {
        Self {
            range: IndexRange::EMPTY,
            cells: ActiveMap::new(),
            pool: CellPool::new(),
            skipped: 0,
        }
    }

    /// The active interval. Indexes inside it that are `< count` are bound.
    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// Number of bound cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell<H, T>> {
        self.cells.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Cell<H, T>> {
        self.cells.get_mut(&index)
    }

    pub fn is_bound(&self, index: usize) -> bool {
        self.cells.contains_key(&index)
    }

    pub fn pool(&self) -> &CellPool<H, T> {
        &self.pool
    }

    /// Activations skipped because the host had no template for the index.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Visits bound cells in ascending index order.
    pub fn for_each_bound(&self, mut f: impl FnMut(usize, &Cell<H, T>)) {
        for i in self.range.iter() {
            if let Some(cell) = self.cells.get(&i) {
                f(i, cell);
            }
        }
    }

    /// Moves the active interval to `next` with the minimal set of transitions.
    ///
    /// Returns `false` (and touches nothing, not even the pool) when `next` equals the current
    /// interval. Otherwise every transition is applied and the pool is committed exactly once.
    pub fn reconcile(&mut self, next: IndexRange, host: &mut impl CellHost<H, T>) -> bool {
        if next == self.range {
            return false;
        }
        self.apply(next, host);
        self.finish(next, host);
        true
    }

    /// Like [`Self::reconcile`], but also rebinds every retained index.
    ///
    /// Use this after the data source changed: indexes past the new count are released, retained
    /// indexes are rebound (or swapped to a new template), and the pool is committed once even
    /// when the interval itself did not move.
    ///
    /// Every release (departing indexes, then cells whose template changed) happens before the
    /// first acquire, so swaps and newly revealed indexes can reuse them within the pass.
    pub fn refresh(&mut self, next: IndexRange, host: &mut impl CellHost<H, T>) {
        let count = host.count();
        let prev = self.range;
        for i in prev.iter() {
            if i >= count || !next.contains(i) {
                self.deactivate(i);
            }
        }

        let retained = prev.intersection(&next);
        let mut resolved = Vec::with_capacity(retained.len());
        for i in retained.iter().take_while(|&i| i < count) {
            let template = host.template_for(i);
            if self
                .cells
                .get(&i)
                .is_some_and(|c| Some(&c.template) != template.as_ref())
            {
                self.deactivate(i);
            }
            resolved.push((i, template));
        }
        for (i, template) in resolved {
            self.activate_as(i, template, host);
        }

        if next != prev {
            self.apply(next, host);
        }
        self.finish(next, host);
    }

    /// Re-places every bound cell, e.g. after the layout changed.
    pub fn reposition(&mut self, host: &mut impl CellHost<H, T>) {
        for i in self.range.iter() {
            if let Some(cell) = self.cells.get_mut(&i) {
                host.position(&mut cell.handle, i);
            }
        }
    }

    /// Destroys every active and pooled cell and empties the interval.
    pub fn clear(&mut self, host: &mut impl CellHost<H, T>) {
        for i in self.range.iter() {
            if let Some(cell) = self.cells.remove(&i) {
                host.destroy(cell.handle);
            }
        }
        debug_assert!(self.cells.is_empty(), "bound cell outside the active range");
        for (_, cell) in core::mem::take(&mut self.cells) {
            host.destroy(cell.handle);
        }
        self.pool.clear(|h| host.destroy(h));
        self.range = IndexRange::EMPTY;
    }

    fn apply(&mut self, next: IndexRange, host: &mut impl CellHost<H, T>) {
        let prev = self.range;
        rtrace!(
            prev_start = prev.start,
            prev_end = prev.end,
            next_start = next.start,
            next_end = next.end,
            disjoint = prev.is_disjoint(&next),
            "ActiveSet::apply"
        );

        if prev.is_disjoint(&next) {
            for i in prev.iter() {
                self.deactivate(i);
            }
            for i in next.iter() {
                self.activate(i, host);
            }
            return;
        }

        // Release everything that left the window before acquiring, so freed cells are reusable
        // within the same pass. Activations then grow outward from the old window.
        for i in prev.start..next.start {
            self.deactivate(i);
        }
        for i in (next.end..prev.end).rev() {
            self.deactivate(i);
        }
        for i in (next.start..next.end.min(prev.start)).rev() {
            self.activate(i, host);
        }
        for i in next.start.max(prev.end)..next.end {
            self.activate(i, host);
        }
    }

    fn finish(&mut self, next: IndexRange, host: &mut impl CellHost<H, T>) {
        let _detached = self.pool.commit(|h| host.detach(h));
        rtrace!(
            detached = _detached,
            active = self.cells.len(),
            pooled = self.pool.len(),
            "ActiveSet::commit"
        );
        self.range = next;
    }

    pub(crate) fn deactivate(&mut self, index: usize) {
        if let Some(cell) = self.cells.remove(&index) {
            self.pool.release(cell);
        }
    }

    pub(crate) fn activate(&mut self, index: usize, host: &mut impl CellHost<H, T>) {
        if index >= host.count() {
            return;
        }
        let template = host.template_for(index);
        self.activate_as(index, template, host);
    }

    /// Activates `index < count` with an already resolved template.
    fn activate_as(&mut self, index: usize, template: Option<T>, host: &mut impl CellHost<H, T>) {
        let Some(template) = template else {
            // A cell bound under a template we can no longer confirm must not stay visible.
            self.deactivate(index);
            self.skipped = self.skipped.saturating_add(1);
            return;
        };

        if let Some(cell) = self.cells.get_mut(&index) {
            if cell.template == template {
                host.bind(&mut cell.handle, index);
                return;
            }
            self.deactivate(index);
        }

        let mut cell = self.pool.acquire(&template, |t| host.instantiate(t));
        host.position(&mut cell.handle, index);
        host.bind(&mut cell.handle, index);
        self.cells.insert(index, cell);
    }
}
