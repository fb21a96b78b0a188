use ferrous_core::{Camera, World};

use crate::config::AppConfig;
use crate::event::AppEvent;
use crate::traits::FerrousApp;

/// What is left once the event stream has been processed.
pub struct RunOutcome<A> {
    pub app: A,
    pub world: World,
    pub camera: Camera,
    /// Events handled before the stream ended or an exit was requested.
    pub events_processed: usize,
}

/// El punto de entrada principal. Usa el patrón Builder para configurar la app.
pub struct App<A: FerrousApp> {
    config: AppConfig,
    camera: Camera,
    app_state: A,
}

impl<A: FerrousApp> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            camera: Camera::default(),
            app_state,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Ejecuta el bucle principal de la aplicación sobre `events`.
    pub fn run<I>(self, events: I) -> RunOutcome<A>
    where
        I: IntoIterator<Item = AppEvent<A::Message>>,
    {
        crate::runner::run_internal(self.config, self.camera, self.app_state, events)
    }
}
