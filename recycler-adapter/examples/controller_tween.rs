use recycler::{
    Align, Layout, ListLayout, Placement, Rect, Recycler, RecyclerOptions, RenderSurface,
};
use recycler_adapter::{Controller, Easing};

struct NullSurface;

impl RenderSurface for NullSurface {
    type Template = ();
    type Handle = ();
    type Item = u64;

    fn instantiate(&mut self, _: &()) {}
    fn detach(&mut self, _: &mut ()) {}
    fn position(&mut self, _: &mut (), _: Placement) {}
    fn bind(&mut self, _: &mut (), _: usize, _: &u64) {}
}

fn main() {
    // Example: a controller driving tween scrolling without holding any UI objects.
    //
    // A host would:
    // - start a tween in response to a "scroll to index" command
    // - call tick(now_ms) from its frame loop
    // - apply the returned offset to the real scroll container (if any)
    // - render the recycler's active cells
    let items: Vec<u64> = (0..10_000).collect();
    let opts = RecyclerOptions::new(()).with_initial_rect(Some(Rect::new(400.0, 300.0)));
    let layout = Layout::from(ListLayout::new(Rect::new(20.0, 300.0)));
    let mut c = Controller::new(Recycler::new(opts, NullSurface, layout).with_source(items));

    let Some(target) = c.start_tween_to_index(2_000, Align::Center, 0, 240, Easing::SmoothStep)
    else {
        return;
    };
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    while let Some(off) = c.tick(now_ms) {
        if now_ms.is_multiple_of(80) {
            println!(
                "t={now_ms} off={off} active={:?}",
                c.recycler().active_range()
            );
        }
        now_ms += 16;
    }

    println!(
        "done: off={} range={:?} stats={:?}",
        c.recycler().scroll_offset(),
        c.recycler().active_range(),
        c.recycler().stats()
    );
}
