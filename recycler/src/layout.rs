use crate::{Align, Axis, Edge, Padding, Placement, PrincipalExtent, Rect};

/// Tolerance, in rows, applied to window edges so that float noise never adds or drops a row.
const ROW_EPSILON: f32 = 1e-3;

/// Geometry of one list shape.
///
/// A strategy is pure apart from [`LayoutStrategy::recalculate`], which must run whenever the
/// item count changes and before any window computation.
pub trait LayoutStrategy {
    /// Recomputes the total content extent for `count` items.
    fn recalculate(&mut self, count: usize);

    /// Total content size along the scroll axis, padding included.
    fn content_extent(&self) -> f32;

    /// Number of rows for the last recalculated count.
    fn row_count(&self) -> usize;

    /// Visible index interval along the scroll axis.
    ///
    /// Not clamped to `[0, count)` and not required to be ordered; see
    /// [`crate::compute_window`] for normalization.
    fn raw_visible_indices(&self, viewport: Rect, scroll_offset: f32) -> (i64, i64);

    /// Where the cell for `index` goes, in content coordinates.
    fn placement(&self, index: usize) -> Placement;

    /// The scroll offset that brings `index` to `align`, clamped to
    /// `[0, max(0, content_extent - viewport.main)]`.
    ///
    /// `current_offset` is only consulted by [`Align::Auto`].
    fn scroll_position_for(
        &self,
        index: usize,
        align: Align,
        viewport: Rect,
        current_offset: f32,
    ) -> f32;

    /// 1 for single-axis layouts.
    fn items_per_row(&self) -> usize;

    fn principal_extent(&self) -> PrincipalExtent;

    fn leading_padding(&self, edge: Edge) -> f32;

    fn max_scroll_offset(&self, viewport: Rect) -> f32 {
        (self.content_extent() - viewport.main).max(0.0)
    }
}

/// Row arithmetic shared by every fixed-size shape.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Track {
    cell: Rect,
    spacing: f32,
    padding: Padding,
}

impl Track {
    fn stride(&self) -> f32 {
        self.cell.main + self.spacing
    }

    fn row_start(&self, row: usize) -> f32 {
        self.padding.start + row as f32 * self.stride()
    }

    fn extent(&self, rows: usize) -> f32 {
        let pad = self.padding.start + self.padding.end;
        if rows == 0 {
            return pad;
        }
        pad + rows as f32 * self.cell.main + (rows - 1) as f32 * self.spacing
    }

    /// Rows intersecting `[offset, offset + viewport.main)`, as `(first, end)`.
    fn visible_rows(&self, viewport: Rect, offset: f32, rows: usize) -> (i64, i64) {
        let stride = self.stride();
        if stride.is_nan() || stride <= ROW_EPSILON {
            return (0, rows as i64);
        }
        let local = offset - self.padding.start;
        if !local.is_finite() {
            return (0, 0);
        }
        // Row r covers [r * stride, r * stride + cell) in list-local space.
        let first = floor_i64((local - self.cell.main) / stride + ROW_EPSILON).saturating_add(1);
        let end = ceil_i64((local + viewport.main) / stride - ROW_EPSILON);
        (first, end)
    }

    fn scroll_position_for(
        &self,
        row: usize,
        align: Align,
        viewport: Rect,
        current: f32,
        content: f32,
    ) -> f32 {
        let start = self.row_start(row);
        let end = start + self.cell.main;
        let view = viewport.main.max(0.0);

        let to_start = start - self.padding.start;
        let to_end = end + self.padding.end - view;
        let target = match align {
            Align::Start => to_start,
            Align::End => to_end,
            Align::Center => start + self.cell.main / 2.0 - view / 2.0,
            Align::Auto => {
                if start >= current && end <= current + view {
                    current
                } else if start < current {
                    to_start
                } else {
                    to_end
                }
            }
        };

        target.clamp(0.0, (content - view).max(0.0))
    }

    fn principal(&self) -> PrincipalExtent {
        PrincipalExtent {
            cell_size: self.cell.main,
            spacing: self.spacing,
        }
    }
}

fn floor_i64(v: f32) -> i64 {
    let t = v as i64;
    if (t as f32) > v { t.saturating_sub(1) } else { t }
}

fn ceil_i64(v: f32) -> i64 {
    let t = v as i64;
    if (t as f32) < v { t.saturating_add(1) } else { t }
}

/// A single-axis list of equally sized cells.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListLayout {
    pub axis: Axis,
    /// Cell size; `main` is the row height for vertical lists.
    pub cell: Rect,
    /// Space between consecutive cells along the scroll axis.
    pub spacing: f32,
    pub padding: Padding,
    #[cfg_attr(feature = "serde", serde(skip))]
    count: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    content_extent: f32,
}

impl ListLayout {
    pub fn new(cell: Rect) -> Self {
        let mut layout = Self {
            axis: Axis::Vertical,
            cell,
            spacing: 0.0,
            padding: Padding::default(),
            count: 0,
            content_extent: 0.0,
        };
        layout.recalculate(0);
        layout
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self.recalculate(self.count);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self.recalculate(self.count);
        self
    }

    fn track(&self) -> Track {
        Track {
            cell: self.cell,
            spacing: self.spacing,
            padding: self.padding,
        }
    }
}

impl LayoutStrategy for ListLayout {
    fn recalculate(&mut self, count: usize) {
        self.count = count;
        self.content_extent = self.track().extent(count);
    }

    fn content_extent(&self) -> f32 {
        self.content_extent
    }

    fn row_count(&self) -> usize {
        self.count
    }

    fn raw_visible_indices(&self, viewport: Rect, scroll_offset: f32) -> (i64, i64) {
        self.track()
            .visible_rows(viewport, scroll_offset, self.count)
    }

    fn placement(&self, index: usize) -> Placement {
        let track = self.track();
        Placement::from_axis(
            self.axis,
            track.row_start(index),
            self.padding.cross_start,
            self.cell,
        )
    }

    fn scroll_position_for(
        &self,
        index: usize,
        align: Align,
        viewport: Rect,
        current_offset: f32,
    ) -> f32 {
        self.track().scroll_position_for(
            index,
            align,
            viewport,
            current_offset,
            self.content_extent,
        )
    }

    fn items_per_row(&self) -> usize {
        1
    }

    fn principal_extent(&self) -> PrincipalExtent {
        self.track().principal()
    }

    fn leading_padding(&self, edge: Edge) -> f32 {
        self.padding.get(edge)
    }
}

/// A grid with a fixed number of cells per row; rows stack along the scroll axis.
///
/// Index `i` sits at row `i / items_per_row`, column `i % items_per_row`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub axis: Axis,
    items_per_row: usize,
    pub cell: Rect,
    /// Space between rows (scroll axis).
    pub spacing: f32,
    /// Space between columns (cross axis).
    pub cross_spacing: f32,
    pub padding: Padding,
    #[cfg_attr(feature = "serde", serde(skip))]
    count: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    rows: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    content_extent: f32,
}

impl GridLayout {
    /// `items_per_row` of 0 is treated as 1.
    pub fn new(items_per_row: usize, cell: Rect) -> Self {
        let mut layout = Self {
            axis: Axis::Vertical,
            items_per_row: items_per_row.max(1),
            cell,
            spacing: 0.0,
            cross_spacing: 0.0,
            padding: Padding::default(),
            count: 0,
            rows: 0,
            content_extent: 0.0,
        };
        layout.recalculate(0);
        layout
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_spacing(mut self, spacing: f32, cross_spacing: f32) -> Self {
        self.spacing = spacing;
        self.cross_spacing = cross_spacing;
        self.recalculate(self.count);
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self.recalculate(self.count);
        self
    }

    /// `(row, column)` of `index`.
    pub fn cell_coords(&self, index: usize) -> (usize, usize) {
        (index / self.items_per_row, index % self.items_per_row)
    }

    /// Inverse of [`Self::cell_coords`] for the current count.
    pub fn index_at(&self, row: usize, column: usize) -> Option<usize> {
        if column >= self.items_per_row {
            return None;
        }
        let index = row.checked_mul(self.items_per_row)?.checked_add(column)?;
        (index < self.count).then_some(index)
    }

    fn track(&self) -> Track {
        Track {
            cell: self.cell,
            spacing: self.spacing,
            padding: self.padding,
        }
    }
}

impl LayoutStrategy for GridLayout {
    fn recalculate(&mut self, count: usize) {
        self.count = count;
        self.rows = count.div_ceil(self.items_per_row);
        self.content_extent = self.track().extent(self.rows);
    }

    fn content_extent(&self) -> f32 {
        self.content_extent
    }

    fn row_count(&self) -> usize {
        self.rows
    }

    fn raw_visible_indices(&self, viewport: Rect, scroll_offset: f32) -> (i64, i64) {
        let (first, end) = self
            .track()
            .visible_rows(viewport, scroll_offset, self.rows);
        let per_row = self.items_per_row as i64;
        (first.saturating_mul(per_row), end.saturating_mul(per_row))
    }

    fn placement(&self, index: usize) -> Placement {
        let (row, column) = self.cell_coords(index);
        let cross =
            self.padding.cross_start + column as f32 * (self.cell.cross + self.cross_spacing);
        Placement::from_axis(self.axis, self.track().row_start(row), cross, self.cell)
    }

    fn scroll_position_for(
        &self,
        index: usize,
        align: Align,
        viewport: Rect,
        current_offset: f32,
    ) -> f32 {
        let (row, _) = self.cell_coords(index);
        self.track().scroll_position_for(
            row,
            align,
            viewport,
            current_offset,
            self.content_extent,
        )
    }

    fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    fn principal_extent(&self) -> PrincipalExtent {
        self.track().principal()
    }

    fn leading_padding(&self, edge: Edge) -> f32 {
        self.padding.get(edge)
    }
}

/// The layout shape selected for one list instance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    List(ListLayout),
    Grid(GridLayout),
}

impl From<ListLayout> for Layout {
    fn from(l: ListLayout) -> Self {
        Self::List(l)
    }
}

impl From<GridLayout> for Layout {
    fn from(g: GridLayout) -> Self {
        Self::Grid(g)
    }
}

macro_rules! dispatch {
    ($self:ident, $l:ident => $e:expr) => {
        match $self {
            Layout::List($l) => $e,
            Layout::Grid($l) => $e,
        }
    };
}

impl LayoutStrategy for Layout {
    fn recalculate(&mut self, count: usize) {
        dispatch!(self, l => l.recalculate(count))
    }

    fn content_extent(&self) -> f32 {
        dispatch!(self, l => l.content_extent())
    }

    fn row_count(&self) -> usize {
        dispatch!(self, l => l.row_count())
    }

    fn raw_visible_indices(&self, viewport: Rect, scroll_offset: f32) -> (i64, i64) {
        dispatch!(self, l => l.raw_visible_indices(viewport, scroll_offset))
    }

    fn placement(&self, index: usize) -> Placement {
        dispatch!(self, l => l.placement(index))
    }

    fn scroll_position_for(
        &self,
        index: usize,
        align: Align,
        viewport: Rect,
        current_offset: f32,
    ) -> f32 {
        dispatch!(self, l => l.scroll_position_for(index, align, viewport, current_offset))
    }

    fn items_per_row(&self) -> usize {
        dispatch!(self, l => l.items_per_row())
    }

    fn principal_extent(&self) -> PrincipalExtent {
        dispatch!(self, l => l.principal_extent())
    }

    fn leading_padding(&self, edge: Edge) -> f32 {
        dispatch!(self, l => l.leading_padding(edge))
    }
}
