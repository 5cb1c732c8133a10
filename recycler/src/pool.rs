use alloc::vec::Vec;

/// A visual instance plus the template it was built from.
///
/// The template never changes for the lifetime of the instance; a cell that needs a different
/// template goes back to the pool and a matching one is acquired instead.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell<H, T> {
    pub handle: H,
    pub template: T,
}

/// Recycled cells waiting for reuse.
///
/// Release is two-phase. [`CellPool::release`] only appends the cell; the cell keeps its last
/// visual position until [`CellPool::commit`] runs the detach primitive for everything past the
/// committed prefix. This batches hierarchy operations to once per reconciliation pass.
///
/// ```text
/// cells: [ c0 c1 c2 | c3 c4 ]
///                   ^ committed (c3, c4 still attached)
/// ```
#[derive(Clone, Debug)]
pub struct CellPool<H, T> {
    cells: Vec<Cell<H, T>>,
    committed: usize,
    created: usize,
    reused: usize,
}

impl<H, T> Default for CellPool<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, T> CellPool<H, T> {
    pub const fn new() -> Self {
        Self {
            cells: Vec::new(),
            committed: 0,
            created: 0,
            reused: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Pooled cells that are logically free but not yet detached.
    pub fn pending_detach(&self) -> usize {
        self.cells.len() - self.committed
    }

    /// Total number of cells this pool has instantiated.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Total number of acquisitions served by an existing cell.
    pub fn reused(&self) -> usize {
        self.reused
    }

    /// Returns a cell built from `template`.
    ///
    /// Pooled cells are scanned newest to oldest so that an uncommitted (still attached) cell is
    /// preferred; falls back to `instantiate` when nothing matches. Never fails.
    pub fn acquire(
        &mut self,
        template: &T,
        instantiate: impl FnOnce(&T) -> H,
    ) -> Cell<H, T>
    where
        T: PartialEq + Clone,
    {
        if let Some(pos) = self.cells.iter().rposition(|c| c.template == *template) {
            let cell = self.cells.remove(pos);
            if pos < self.committed {
                // The prefix keeps describing the same detached cells.
                self.committed -= 1;
            }
            self.reused = self.reused.saturating_add(1);
            rtrace!(pos, pooled = self.cells.len(), "CellPool::acquire reused");
            return cell;
        }

        self.created = self.created.saturating_add(1);
        rtrace!(created = self.created, "CellPool::acquire instantiated");
        Cell {
            handle: instantiate(template),
            template: template.clone(),
        }
    }

    /// Appends `cell` to the pool. Detaching is deferred to [`Self::commit`].
    pub fn release(&mut self, cell: Cell<H, T>) {
        self.cells.push(cell);
    }

    /// Detaches every cell released since the last commit, exactly once each.
    ///
    /// Returns the number of cells detached. Calling it again without new releases is a no-op.
    pub fn commit(&mut self, mut detach: impl FnMut(&mut H)) -> usize {
        let pending = self.pending_detach();
        for cell in &mut self.cells[self.committed..] {
            detach(&mut cell.handle);
        }
        self.committed = self.cells.len();
        pending
    }

    /// Destroys every pooled cell and resets the bookkeeping (the lifetime counters survive).
    pub fn clear(&mut self, mut destroy: impl FnMut(H)) {
        for cell in self.cells.drain(..) {
            destroy(cell.handle);
        }
        self.committed = 0;
    }

    /// Number of pooled cells built from `template`.
    pub fn count_for(&self, template: &T) -> usize
    where
        T: PartialEq,
    {
        self.cells.iter().filter(|c| c.template == *template).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell<H, T>> {
        self.cells.iter()
    }
}
