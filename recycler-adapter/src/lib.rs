//! Host-side helpers for the `recycler` crate.
//!
//! `recycler` owns the window math, the reconciler, and the cell pool. This crate adds the small
//! pieces most hosts end up writing on top of it:
//!
//! - a [`Controller`] that forwards viewport/scroll events and drives animated scroll-to-index
//! - a [`Tween`] with a handful of [`Easing`] curves
//!
//! Nothing here knows about a particular UI framework; the host calls `tick(now_ms)` from its
//! frame loop and applies the returned offset to its real scroll container.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod tween;


pub use controller::Controller;
pub use tween::{Easing, Tween};
