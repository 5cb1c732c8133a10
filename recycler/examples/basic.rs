// Example: a million-row list backed by a printing render surface.
use recycler::{
    Align, Layout, ListLayout, Placement, Rect, Recycler, RecyclerOptions, RenderSurface,
};

#[derive(Default)]
struct PrintSurface {
    next: u32,
    binds: usize,
}

impl RenderSurface for PrintSurface {
    type Template = &'static str;
    type Handle = u32;
    type Item = String;

    fn instantiate(&mut self, template: &&'static str) -> u32 {
        self.next += 1;
        println!("  instantiate {template} -> #{}", self.next);
        self.next
    }

    fn detach(&mut self, handle: &mut u32) {
        println!("  detach #{handle}");
    }

    fn position(&mut self, _: &mut u32, _: Placement) {}

    fn bind(&mut self, _: &mut u32, _: usize, _: &String) {
        self.binds += 1;
    }
}

fn main() {
    let items: Vec<String> = (0..1_000_000).map(|i| format!("row {i}")).collect();

    let opts = RecyclerOptions::new("row")
        .with_buffer(2)
        .with_initial_rect(Some(Rect::new(200.0, 320.0)));
    let layout = Layout::from(ListLayout::new(Rect::new(20.0, 320.0)).with_spacing(4.0));
    let mut r = Recycler::new(opts, PrintSurface::default(), layout).with_source(&items);

    println!("content_extent={}", r.content_extent());
    println!("active_range={:?}", r.active_range());

    println!("scroll by a few rows:");
    r.set_scroll_offset(100.0);
    println!("active_range={:?} stats={:?}", r.active_range(), r.stats());

    println!("jump to the end:");
    let off = r.scroll_to_index(999_999, Align::End);
    println!(
        "offset={off:?} active_range={:?} stats={:?}",
        r.active_range(),
        r.stats()
    );
    println!("binds={} scrollbar_steps={}", r.surface().binds, r.scrollbar_steps());

    r.clear();
}
