// Example: a heterogeneous grid where every tenth cell is a header-style template.
use recycler::{GridLayout, Layout, Placement, Rect, Recycler, RecyclerOptions, RenderSurface};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Kind {
    Tile,
    Banner,
}

#[derive(Default)]
struct GridSurface {
    next: u32,
    placed: Vec<(u32, Placement)>,
}

impl RenderSurface for GridSurface {
    type Template = Kind;
    type Handle = u32;
    type Item = u32;

    fn instantiate(&mut self, _: &Kind) -> u32 {
        self.next += 1;
        self.next
    }

    fn detach(&mut self, _: &mut u32) {}

    fn position(&mut self, handle: &mut u32, placement: Placement) {
        self.placed.push((*handle, placement));
    }

    fn bind(&mut self, _: &mut u32, _: usize, _: &u32) {}
}

fn main() {
    let photos: Vec<u32> = (0..10_000).collect();

    let opts = RecyclerOptions::new_with_templates(|i| {
        Some(if i % 10 == 0 { Kind::Banner } else { Kind::Tile })
    })
    .with_initial_rect(Some(Rect::new(480.0, 640.0)));
    let layout = Layout::from(GridLayout::new(4, Rect::new(120.0, 150.0)).with_spacing(8.0, 10.0));
    let mut r = Recycler::new(opts, GridSurface::default(), layout).with_source(photos);

    for offset in [0.0, 64.0, 900.0, 12_345.0] {
        r.set_scroll_offset(offset);
        let mut banners = 0;
        r.for_each_active(|i, _| {
            if r.cell_template(i) == Some(&Kind::Banner) {
                banners += 1;
            }
        });
        println!(
            "offset={offset} window={:?} banners={banners} stats={:?}",
            r.active_range(),
            r.stats()
        );
    }

    println!(
        "content_extent={} steps={} last placement={:?}",
        r.content_extent(),
        r.scrollbar_steps(),
        r.surface().placed.last()
    );
}
