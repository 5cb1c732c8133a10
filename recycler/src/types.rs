use core::fmt;

/// Where a scrolled-to item should land inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset when the item is fully visible, otherwise scroll the minimum
    /// distance (`Start` when the item is before the viewport, `End` when after).
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The scroll axis of a layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// A platform-agnostic extent pair:
/// - `main` is along the scroll axis (height for vertical lists)
/// - `cross` is across it (width for vertical lists)
///
/// Used both for viewport geometry and for cell sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: f32,
    pub cross: f32,
}

impl Rect {
    pub const fn new(main: f32, cross: f32) -> Self {
        Self { main, cross }
    }

    /// A viewport with no usable extent along the scroll axis shows nothing.
    pub fn is_degenerate(&self) -> bool {
        self.main.is_nan() || self.main <= 0.0
    }
}

/// Content insets around the laid-out cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Before the first row, along the scroll axis.
    pub start: f32,
    /// After the last row, along the scroll axis.
    pub end: f32,
    pub cross_start: f32,
    pub cross_end: f32,
}

impl Padding {
    pub const fn uniform(v: f32) -> Self {
        Self {
            start: v,
            end: v,
            cross_start: v,
            cross_end: v,
        }
    }

    pub fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Start => self.start,
            Edge::End => self.end,
            Edge::CrossStart => self.cross_start,
            Edge::CrossEnd => self.cross_end,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Start,
    End,
    CrossStart,
    CrossEnd,
}

/// A cell rectangle in content coordinates (origin at the content's top-left corner).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// Resolves a main/cross placement into x/y for the given axis.
    pub fn from_axis(axis: Axis, main: f32, cross: f32, size: Rect) -> Self {
        match axis {
            Axis::Vertical => Self {
                x: cross,
                y: main,
                width: size.cross,
                height: size.main,
            },
            Axis::Horizontal => Self {
                x: main,
                y: cross,
                width: size.main,
                height: size.cross,
            },
        }
    }
}

/// The cell extent and inter-row spacing along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrincipalExtent {
    pub cell_size: f32,
    pub spacing: f32,
}

impl PrincipalExtent {
    pub fn stride(&self) -> f32 {
        self.cell_size + self.spacing
    }
}

/// A half-open range of data indexes: `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl IndexRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// `true` when the two ranges share no index. Empty ranges are disjoint from everything.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.end <= other.start || self.start >= other.end
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start >= end {
            Self::EMPTY
        } else {
            Self { start, end }
        }
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start..self.end.max(self.start)
    }
}

impl From<core::ops::Range<usize>> for IndexRange {
    fn from(r: core::ops::Range<usize>) -> Self {
        Self {
            start: r.start,
            end: r.end,
        }
    }
}

/// Counters describing the current cell population and its history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecyclerStats {
    /// Cells currently bound to an index.
    pub active: usize,
    /// Cells in the pool, committed or not.
    pub pooled: usize,
    /// Pooled cells still waiting for their detach.
    pub pending_detach: usize,
    /// Cells ever instantiated.
    pub created: usize,
    /// Acquisitions served from the pool.
    pub reused: usize,
    /// Activations skipped because no template was available.
    pub skipped: usize,
}

/// A setup-class failure. Reported once, never fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The `template_for` hook returned `None` for this index.
    MissingTemplate { index: usize },
    /// The render surface cannot instantiate the template chosen for this index.
    UnavailableTemplate { index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTemplate { index } => {
                write!(f, "no template configured for index {index}")
            }
            Self::UnavailableTemplate { index } => {
                write!(f, "render surface has no template for index {index}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
