use ferrous_core::{Camera, Viewport, World};

use crate::builder::RunOutcome;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::event::AppEvent;
use crate::traits::FerrousApp;

struct Runner<A: FerrousApp> {
    app: A,
    world: World,
    camera: Camera,
    viewport: Viewport,
    exit_requested: bool,
}

impl<A: FerrousApp> Runner<A> {
    fn new(app: A, config: &AppConfig, mut camera: Camera) -> Self {
        let viewport = Viewport::new(config.width, config.height);
        camera.set_aspect(viewport.aspect());
        Self {
            app,
            world: World::new(),
            camera,
            viewport,
            exit_requested: false,
        }
    }

    /// Runs `f` with a fresh context and records any exit request.
    fn with_ctx(&mut self, f: impl FnOnce(&mut A, &mut AppContext)) {
        let mut ctx = AppContext {
            world: &mut self.world,
            camera: &mut self.camera,
            viewport: self.viewport,
            exit_requested: false,
        };
        f(&mut self.app, &mut ctx);
        self.exit_requested |= ctx.exit_requested;
    }

    fn handle(&mut self, event: AppEvent<A::Message>) {
        match event {
            AppEvent::Pointer(pointer) => {
                log::debug!("pointer {:?} at ({}, {})", pointer.button, pointer.x, pointer.y);
                self.with_ctx(|app, ctx| app.on_pointer(pointer, ctx));
            }
            AppEvent::Resized { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.camera.set_aspect(self.viewport.aspect());
                self.with_ctx(|app, ctx| app.on_resize((width, height), ctx));
            }
            AppEvent::Message(message) => {
                self.with_ctx(|app, ctx| app.on_message(message, ctx));
            }
            AppEvent::Wait(duration) => {
                // the next poll picks up whatever finished meanwhile
                std::thread::sleep(duration);
            }
            AppEvent::Quit => self.exit_requested = true,
        }
    }
}

pub(crate) fn run_internal<A, I>(config: AppConfig, camera: Camera, app: A, events: I) -> RunOutcome<A>
where
    A: FerrousApp,
    I: IntoIterator<Item = AppEvent<A::Message>>,
{
    log::info!(
        "starting `{}` ({}x{})",
        config.title,
        config.width,
        config.height
    );
    let mut runner = Runner::new(app, &config, camera);
    runner.with_ctx(|app, ctx| app.setup(ctx));

    let mut processed = 0;
    for event in events {
        if runner.exit_requested {
            break;
        }
        runner.with_ctx(|app, ctx| app.poll(ctx));
        runner.handle(event);
        processed += 1;
    }

    runner.with_ctx(|app, ctx| app.poll(ctx));
    runner.with_ctx(|app, ctx| app.shutdown(ctx));
    log::info!("stopped after {processed} events");

    RunOutcome {
        app: runner.app,
        world: runner.world,
        camera: runner.camera,
        events_processed: processed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::App;
    use ferrous_core::glam::Vec3;
    use ferrous_core::PointerEvent;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl FerrousApp for Recorder {
        type Message = &'static str;

        fn setup(&mut self, ctx: &mut AppContext) {
            ctx.world.spawn_cube("origin", Vec3::ZERO);
            self.log.push("setup".into());
        }

        fn poll(&mut self, _ctx: &mut AppContext) {
            self.log.push("poll".into());
        }

        fn on_pointer(&mut self, event: PointerEvent, ctx: &mut AppContext) {
            let ndc = ctx.ndc(&event).unwrap();
            self.log.push(format!("pointer {} {}", ndc.x, ndc.y));
        }

        fn on_message(&mut self, message: &'static str, ctx: &mut AppContext) {
            if message == "exit" {
                ctx.request_exit();
            }
            self.log.push(message.into());
        }

        fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut AppContext) {
            self.log.push(format!("resize {}x{} {}", new_size.0, new_size.1, ctx.aspect()));
        }

        fn shutdown(&mut self, _ctx: &mut AppContext) {
            self.log.push("shutdown".into());
        }
    }

    #[test]
    fn events_are_handled_in_order_with_poll_between() {
        let outcome = App::new(Recorder::default()).with_size(200, 100).run([
            AppEvent::Message("a"),
            AppEvent::Pointer(PointerEvent::left(100.0, 50.0)),
            AppEvent::Wait(Duration::ZERO),
            AppEvent::Resized { width: 50, height: 50 },
        ]);

        assert_eq!(
            outcome.app.log,
            [
                "setup",
                "poll",
                "a",
                "poll",
                "pointer 0 0",
                "poll",
                "poll",
                "resize 50x50 1",
                "poll",
                "shutdown",
            ]
        );
        assert_eq!(outcome.events_processed, 4);
        assert_eq!(outcome.world.len(), 1);
        assert_eq!(outcome.camera.aspect, 1.0);
    }

    #[test]
    fn exit_request_stops_the_stream() {
        let outcome = App::new(Recorder::default()).run([
            AppEvent::Message("exit"),
            AppEvent::Message("never"),
        ]);
        assert!(!outcome.app.log.iter().any(|l| l == "never"));
        assert_eq!(outcome.events_processed, 1);
    }

    #[test]
    fn quit_event_stops_the_stream() {
        let outcome = App::new(Recorder::default()).run([
            AppEvent::Quit,
            AppEvent::Message("never"),
        ]);
        assert_eq!(outcome.events_processed, 1);
        assert_eq!(outcome.app.log.last().map(String::as_str), Some("shutdown"));
    }

    #[test]
    fn camera_aspect_follows_initial_size() {
        let outcome = App::new(Recorder::default())
            .with_size(400, 200)
            .run(std::iter::empty());
        assert_eq!(outcome.camera.aspect, 2.0);
    }
}
