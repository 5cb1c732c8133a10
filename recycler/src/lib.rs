//! A headless cell-recycling virtualization engine.
//!
//! Very large lists and grids are rendered by materializing only the indexes inside the viewport
//! (plus a small buffer) and recycling visual cells as the viewport moves:
//!
//! - a [`LayoutStrategy`] turns scroll offset + viewport into a raw visible index interval
//! - [`compute_window`] normalizes, buffers, and clamps it to `[0, count)`
//! - an [`ActiveSet`] reconciles the previous window against the new one with the minimal set of
//!   activations/deactivations
//! - a [`CellPool`] hands released cells back out by template, deferring their detach to one
//!   commit per pass
//!
//! It is UI-agnostic. A host provides a [`RenderSurface`] (instantiate/detach/position/bind), a
//! [`DataSource`] (count + index lookup), viewport geometry, and scroll offsets; [`Recycler`]
//! ties them together.
//!
//! For adapter-level utilities (tween-driven scroll-to-index), see the `recycler-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod layout;
mod options;
mod pool;
mod reconcile;
mod recycler;
mod state;
mod stepper;
mod surface;
mod template;
mod types;
mod window;


pub use layout::{GridLayout, Layout, LayoutStrategy, ListLayout};
pub use options::{RecyclerOptions, SourceChangedCallback, TemplateSelector};
pub use pool::{Cell, CellPool};
pub use reconcile::{ActiveSet, CellHost};
pub use recycler::Recycler;
pub use state::{FrameState, ScrollState, ViewportState};
pub use stepper::{STEP_EPSILON, ScrollSteps, StepMetrics};
pub use surface::{DataSource, RenderSurface};
pub use template::TemplateId;
pub use types::{
    Align, Axis, ConfigError, Edge, IndexRange, Padding, Placement, PrincipalExtent, Rect,
    RecyclerStats, ScrollDirection,
};
pub use window::{clamp_window, compute_window};
