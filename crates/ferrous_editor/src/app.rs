use std::sync::Arc;
use std::time::Instant;

use ferrous_app::{AppContext, FerrousApp};
use ferrous_assets::{AssetLoader, AssetManifest, FsSource};
use ferrous_core::{MouseButton, PointerEvent, ScenePicker};

use crate::config::EditorSettings;
use crate::editor::Editor;
use crate::notice::Notice;
use crate::persistence::{FileStorage, LayoutStorage};
use crate::state::Command;

/// Hosts an [`Editor`] inside the `ferrous_app` event loop.
///
/// Pointer presses become `Click` commands, finished asset loads become
/// `Asset` commands; both go through [`Editor::dispatch`] like any other
/// command.
pub struct EditorApp<S: LayoutStorage> {
    editor: Editor<S>,
    picker: ScenePicker,
    loader: Option<(AssetLoader, AssetManifest)>,
    notices: Vec<Notice>,
}

impl<S: LayoutStorage> EditorApp<S> {
    pub fn new(editor: Editor<S>) -> Self {
        let picker = ScenePicker::new(editor.config().ground());
        Self {
            editor,
            picker,
            loader: None,
            notices: Vec::new(),
        }
    }

    /// Fetch every model in `manifest` at startup.
    pub fn with_loader(mut self, loader: AssetLoader, manifest: AssetManifest) -> Self {
        self.loader = Some((loader, manifest));
        self
    }

    pub fn editor(&self) -> &Editor<S> {
        &self.editor
    }

    /// Every notice produced so far, oldest first.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn into_editor(self) -> Editor<S> {
        self.editor
    }

    fn apply(&mut self, command: Command, ctx: &mut AppContext) {
        let notices = self
            .editor
            .dispatch(command, ctx.world, ctx.camera, &self.picker);
        self.notices.extend(notices);
    }
}

impl EditorApp<FileStorage> {
    /// Disk-backed editor: layouts under `editor.storage_dir`, models
    /// fetched from `assets.root`.
    pub fn from_settings(settings: &EditorSettings) -> Self {
        let storage = FileStorage::new(&settings.editor.storage_dir);
        let editor = Editor::new(settings.editor.clone(), storage);
        let source = Arc::new(FsSource::new(&settings.assets.root));
        let loader = AssetLoader::new(source, settings.assets.timeout());
        Self::new(editor).with_loader(loader, settings.assets.clone())
    }
}

impl<S: LayoutStorage> FerrousApp for EditorApp<S> {
    type Message = Command;

    fn setup(&mut self, _ctx: &mut AppContext) {
        if let Some((loader, manifest)) = &mut self.loader {
            for name in loader.request_all(manifest) {
                self.editor.registry_mut().mark_pending(&name);
            }
        }
    }

    fn poll(&mut self, ctx: &mut AppContext) {
        let events = match &mut self.loader {
            Some((loader, _)) => loader.poll(Instant::now()),
            None => return,
        };
        for event in events {
            self.apply(Command::Asset(event), ctx);
        }
    }

    fn on_pointer(&mut self, event: PointerEvent, ctx: &mut AppContext) {
        if event.button != MouseButton::Left {
            return;
        }
        if let Some(ndc) = ctx.ndc(&event) {
            self.apply(Command::Click { ndc }, ctx);
        }
    }

    fn on_message(&mut self, command: Command, ctx: &mut AppContext) {
        self.apply(command, ctx);
    }

    fn shutdown(&mut self, _ctx: &mut AppContext) {
        if let Some((loader, _)) = &self.loader {
            if !loader.is_idle() {
                log::warn!("{} asset loads still pending at exit", loader.pending());
            }
        }
    }
}
