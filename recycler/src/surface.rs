use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use crate::Placement;

/// The data collaborator: a count and an index lookup.
///
/// The engine never copies the data. Hand it a reference-like value (`&D`, `Rc<D>`, `Arc<D>`)
/// and call [`crate::Recycler::notify_changed`] after mutating the underlying collection.
pub trait DataSource {
    type Item: ?Sized;

    fn count(&self) -> usize;

    /// Returns `None` when `index >= count()`.
    fn item_at(&self, index: usize) -> Option<&Self::Item>;
}

impl<T> DataSource for [T] {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> DataSource for alloc::vec::Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn item_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

macro_rules! forward_data_source {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<D: DataSource + ?Sized> DataSource for $ptr {
                type Item = D::Item;

                fn count(&self) -> usize {
                    (**self).count()
                }

                fn item_at(&self, index: usize) -> Option<&Self::Item> {
                    (**self).item_at(index)
                }
            }
        )*
    };
}

forward_data_source!(&D, Rc<D>, Arc<D>, Box<D>);

/// The render collaborator. These calls are the only way the engine touches visuals; each is
/// expected to be cheap relative to layout work.
pub trait RenderSurface {
    /// Identifies the visual prototype a cell is instantiated from.
    type Template: crate::TemplateId;
    /// An owned visual instance.
    type Handle;
    /// The data type bound into cells. Must match the data source's `Item`.
    type Item: ?Sized;

    /// Whether `template` can be instantiated. Returning `false` turns activations that need it
    /// into skipped activations (see [`crate::ConfigError::UnavailableTemplate`]).
    fn has_template(&self, template: &Self::Template) -> bool {
        let _ = template;
        true
    }

    fn instantiate(&mut self, template: &Self::Template) -> Self::Handle;

    /// Takes a released cell out of the visible hierarchy. Called at most once per release.
    fn detach(&mut self, handle: &mut Self::Handle);

    fn position(&mut self, handle: &mut Self::Handle, placement: Placement);

    fn bind(&mut self, handle: &mut Self::Handle, index: usize, item: &Self::Item);

    /// Full-list teardown. The default just drops the handle.
    fn destroy(&mut self, handle: Self::Handle) {
        drop(handle);
    }
}
