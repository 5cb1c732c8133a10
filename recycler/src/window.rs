use crate::layout::LayoutStrategy;
use crate::{IndexRange, Rect};

/// Computes the buffered, clamped index window `[start, end)` for the current geometry.
///
/// Returns the empty window when there is nothing to show: no viewport, a viewport without
/// extent along the scroll axis, or `count == 0`. Pure; cheap enough to call every frame.
pub fn compute_window<L: LayoutStrategy + ?Sized>(
    layout: &L,
    viewport: Option<Rect>,
    scroll_offset: f32,
    count: usize,
    buffer: usize,
) -> IndexRange {
    let Some(viewport) = viewport else {
        return IndexRange::EMPTY;
    };
    if count == 0 || viewport.is_degenerate() {
        return IndexRange::EMPTY;
    }
    clamp_window(
        layout.raw_visible_indices(viewport, scroll_offset),
        count,
        buffer,
    )
}

/// Normalizes a raw `(a, b)` interval (possibly reversed, possibly out of range), widens it by
/// `buffer` on both sides, and clamps it to `[0, count)`.
pub fn clamp_window(raw: (i64, i64), count: usize, buffer: usize) -> IndexRange {
    let (a, b) = raw;
    let lo = a.min(b);
    let hi = a.max(b);
    let buffer = i64::try_from(buffer).unwrap_or(i64::MAX);
    let count_i = i64::try_from(count).unwrap_or(i64::MAX);

    let start = lo.saturating_sub(buffer).clamp(0, count_i);
    let end = hi.saturating_add(buffer).clamp(0, count_i);
    // Both values are within [0, count], so the casts are lossless.
    IndexRange::new(start as usize, end as usize)
}
