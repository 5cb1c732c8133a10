#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Index → bound cell. Ordering is never relied upon; iteration goes through the active range.
#[cfg(feature = "std")]
pub(crate) type ActiveMap<C> = HashMap<usize, C>;
#[cfg(not(feature = "std"))]
pub(crate) type ActiveMap<C> = BTreeMap<usize, C>;

/// An opaque, comparable handle naming the visual prototype a cell is built from.
///
/// Blanket-implemented; any `Clone + PartialEq + Debug` value works (enum variants, interned
/// strings, integer ids, ...).
pub trait TemplateId: Clone + PartialEq + core::fmt::Debug {}
impl<T: Clone + PartialEq + core::fmt::Debug> TemplateId for T {}
