use ferrous_core::PointerEvent;

use crate::context::AppContext;

/// The core trait that every Ferrous application implements.
///
/// All methods have empty default implementations so you only override what
/// you need.
///
/// ```rust,ignore
/// struct Viewer;
///
/// impl FerrousApp for Viewer {
///     type Message = ();
///
///     fn setup(&mut self, ctx: &mut AppContext) {
///         ctx.world.spawn_cube("origin", Vec3::ZERO);
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait FerrousApp {
    /// Application-defined message carried by [`AppEvent::Message`](crate::AppEvent::Message).
    type Message;

    /// Called once before the first event.
    fn setup(&mut self, ctx: &mut AppContext) {}

    /// Called before every event and once more after the last one.
    ///
    /// Fold finished background work into the app here; must not block.
    fn poll(&mut self, ctx: &mut AppContext) {}

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut AppContext) {}

    fn on_message(&mut self, message: Self::Message, ctx: &mut AppContext) {}

    /// Called after the viewport and camera aspect have been updated.
    fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut AppContext) {}

    /// Called once when the event stream ends or an exit was requested.
    fn shutdown(&mut self, ctx: &mut AppContext) {}
}
