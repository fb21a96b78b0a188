use ferrous_core::glam::Vec2;
use ferrous_core::{Camera, PointerEvent, Viewport, World};

/// Per-event context passed to every [`FerrousApp`](crate::FerrousApp)
/// callback.
///
/// ```rust,ignore
/// fn on_pointer(&mut self, ev: PointerEvent, ctx: &mut AppContext) {
///     if let Some(ndc) = ctx.ndc(&ev) {
///         // cast a ray through `ndc` with `ctx.camera`
///     }
/// }
/// ```
pub struct AppContext<'a> {
    /// The scene graph.  Nodes spawned here are what the host renders.
    pub world: &'a mut World,

    /// Camera used for picking; hosts may move it between events.
    pub camera: &'a mut Camera,

    /// Current size of the 3-D view.
    pub viewport: Viewport,

    /// Set to `true` via [`request_exit`](Self::request_exit) to stop after
    /// the current event.
    pub(crate) exit_requested: bool,
}

impl<'a> AppContext<'a> {
    /// Signal the runner to stop after the current event.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Pointer position in normalised device coordinates, if the viewport
    /// has an area.
    #[inline]
    pub fn ndc(&self, pointer: &PointerEvent) -> Option<Vec2> {
        self.viewport.to_ndc(pointer.x, pointer.y)
    }

    /// Aspect ratio (width / height). Returns 1.0 if height is zero.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }
}
