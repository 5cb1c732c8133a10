/// Space, in layout units, below which a remaining gap is treated as zero.
pub const STEP_EPSILON: f32 = 1e-3;

/// Inputs for discretized scrollbar stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepMetrics {
    pub viewport_extent: f32,
    pub leading_padding: f32,
    pub cell_size: f32,
    pub spacing: f32,
    pub item_count: usize,
    pub row_count: usize,
    pub items_per_row: usize,
}

/// Number of discrete scroll positions a stepped scrollbar needs.
pub struct ScrollSteps;

impl ScrollSteps {
    /// Counts the rows that fit fully in the viewport (after the leading padding) and returns
    /// `row_count - visible_rows + 1` when content overflows, or 0 when it fits.
    pub fn compute(m: &StepMetrics) -> usize {
        if m.item_count == 0 {
            return 0;
        }
        debug_assert!(
            m.row_count == m.item_count.div_ceil(m.items_per_row.max(1)),
            "row_count does not match item_count / items_per_row (rows={}, items={}, per_row={})",
            m.row_count,
            m.item_count,
            m.items_per_row
        );

        let mut remaining = m.viewport_extent - m.leading_padding;
        let mut rows = 0usize;
        while rows < m.item_count && remaining > STEP_EPSILON {
            let extent = if rows == 0 {
                m.cell_size
            } else {
                m.cell_size + m.spacing
            };
            if extent <= 0.0 || extent > remaining + STEP_EPSILON {
                break;
            }
            remaining -= extent;
            rows += 1;
        }

        let visible_rows = rows.min(m.item_count);
        if m.row_count > visible_rows {
            m.row_count - visible_rows + 1
        } else {
            0
        }
    }
}
