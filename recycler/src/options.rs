use alloc::sync::Arc;

use crate::Rect;

/// Chooses the template an index is rendered with. `None` means "no usable template".
pub type TemplateSelector<T> = Arc<dyn Fn(usize) -> Option<T> + Send + Sync>;

/// Fired after every data-source change with the new item count.
///
/// This is the hook for recomputing scrollbar steps or anything else that depends on count.
pub type SourceChangedCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Configuration for [`crate::Recycler`].
///
/// Cheap to clone: closures live in `Arc`s, so a host can tweak a field and call
/// `Recycler::set_options` without reallocating them.
pub struct RecyclerOptions<T> {
    pub template_for: TemplateSelector<T>,

    /// Extra indexes materialized on each side of the visible window to mask pop-in.
    pub buffer: usize,

    /// When disabled, the window is always empty and every cell is released.
    pub enabled: bool,

    /// Viewport geometry to start with. `None` keeps the list empty until one is provided.
    pub initial_rect: Option<Rect>,

    pub initial_offset: f32,

    pub on_source_changed: Option<SourceChangedCallback>,
}

impl<T> Clone for RecyclerOptions<T> {
    fn clone(&self) -> Self {
        Self {
            template_for: Arc::clone(&self.template_for),
            buffer: self.buffer,
            enabled: self.enabled,
            initial_rect: self.initial_rect,
            initial_offset: self.initial_offset,
            on_source_changed: self.on_source_changed.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> RecyclerOptions<T> {
    /// Options for a homogeneous list: every index uses `template`.
    pub fn new(template: T) -> Self {
        Self::new_with_templates(move |_| Some(template.clone()))
    }
}

impl<T> RecyclerOptions<T> {
    /// Options for a heterogeneous list.
    ///
    /// `template_for(i)` should be cheap; it runs for every activation and every rebind.
    pub fn new_with_templates(
        template_for: impl Fn(usize) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            template_for: Arc::new(template_for),
            buffer: 1,
            enabled: true,
            initial_rect: None,
            initial_offset: 0.0,
            on_source_changed: None,
        }
    }

    pub fn with_template_for(
        mut self,
        template_for: impl Fn(usize) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        self.template_for = Arc::new(template_for);
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: f32) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_on_source_changed(
        mut self,
        on_source_changed: Option<impl Fn(usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_source_changed = on_source_changed.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T> core::fmt::Debug for RecyclerOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RecyclerOptions")
            .field("buffer", &self.buffer)
            .field("enabled", &self.enabled)
            .field("initial_rect", &self.initial_rect)
            .field("initial_offset", &self.initial_offset)
            .field("on_source_changed", &self.on_source_changed.is_some())
            .finish_non_exhaustive()
    }
}
