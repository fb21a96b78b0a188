//! The editor session: one place where every command is applied.
//!
//! [`Editor::dispatch`] handles a single [`Command`] to completion.  The
//! placement store is the source of truth; the scene `World` is updated from
//! it through the [`Realizer`] after every change.

use glam::Vec3;

use ferrous_assets::{AssetEvent, AssetRegistry};
use ferrous_core::{Camera, Picker, World};

use crate::config::EditorConfig;
use crate::notice::Notice;
use crate::persistence::{load_layout, save_layout, LayoutStorage, PersistError};
use crate::placement::{place_at, relocate, PlacementStore};
use crate::realize::Realizer;
use crate::state::{reduce, Command, EditorState};

pub struct Editor<S: LayoutStorage> {
    config: EditorConfig,
    state: EditorState,
    store: PlacementStore,
    registry: AssetRegistry,
    realizer: Realizer,
    storage: S,
}

impl<S: LayoutStorage> Editor<S> {
    pub fn new(config: EditorConfig, storage: S) -> Self {
        let state = EditorState {
            layer: config.layers.clamp(0),
            ..EditorState::default()
        };
        Self {
            config,
            state,
            store: PlacementStore::new(),
            registry: AssetRegistry::new(),
            realizer: Realizer::new(),
            storage,
        }
    }

    /// Starts from an already-populated registry.
    pub fn with_registry(mut self, registry: AssetRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// Lets the host mark loads as pending before their completions arrive.
    pub fn registry_mut(&mut self) -> &mut AssetRegistry {
        &mut self.registry
    }

    pub fn realizer(&self) -> &Realizer {
        &self.realizer
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Applies `command` and returns the notices it produced.
    pub fn dispatch(
        &mut self,
        command: Command,
        world: &mut World,
        camera: &Camera,
        picker: &dyn Picker,
    ) -> Vec<Notice> {
        log::debug!("dispatch {command:?}");
        if command.is_mode_change() {
            return self.change_mode(&command);
        }

        match command {
            Command::Click { ndc } => {
                let point = camera
                    .ray_from_ndc(ndc)
                    .and_then(|ray| picker.pick(&ray, world));
                match point {
                    Some(point) => self.place(point, world),
                    None => {
                        log::debug!("click at {ndc} hit nothing");
                        Vec::new()
                    }
                }
            }
            Command::PlaceAt { point } => self.place(point, world),
            Command::Remove { index } => self.remove(index, world),
            Command::Move { index, point } => self.move_object(index, point, world),
            Command::Save => self.save(),
            Command::Load => self.load(world),
            Command::Asset(event) => self.asset_arrived(event, world),
            // mode changes returned above
            _ => Vec::new(),
        }
    }

    fn change_mode(&mut self, command: &Command) -> Vec<Notice> {
        let mut notices = Vec::new();
        match command {
            Command::SetLayer(layer) if !self.config.layers.contains(*layer) => {
                notices.push(Notice::warning(format!(
                    "layer {layer} is outside {}..={}; clamped",
                    self.config.layers.min, self.config.layers.max
                )));
            }
            Command::SelectAsset(name) if !self.registry.contains(name) => {
                log::debug!("selected `{name}` before it finished loading");
            }
            _ => {}
        }
        self.state = reduce(&self.state, command, &self.config.layers);
        notices
    }

    fn place(&mut self, point: Vec3, world: &mut World) -> Vec<Notice> {
        let placed = place_at(
            point,
            self.state.layer,
            &self.state.tool,
            &self.registry,
            &mut self.store,
            self.config.grid_step,
        );
        match placed {
            Ok(Some(id)) => {
                if let Err(e) = self
                    .realizer
                    .realize(id, &self.store, &self.registry, world)
                {
                    log::warn!("placed object could not be shown: {e}");
                }
                Vec::new()
            }
            Ok(None) => Vec::new(),
            Err(e) => vec![Notice::warning(format!("cannot place: {e}"))],
        }
    }

    fn remove(&mut self, index: usize, world: &mut World) -> Vec<Notice> {
        let Some(id) = self.store.id_at(index) else {
            return vec![Notice::warning(format!("no placed object at index {index}"))];
        };
        self.realizer.unrealize(id, world);
        if let Some(object) = self.store.remove(id) {
            log::debug!("removed {} at {}", object.asset, object.position);
        }
        Vec::new()
    }

    fn move_object(&mut self, index: usize, point: Vec3, world: &mut World) -> Vec<Notice> {
        let Some(id) = self.store.id_at(index) else {
            return vec![Notice::warning(format!("no placed object at index {index}"))];
        };
        match relocate(
            &mut self.store,
            id,
            point,
            self.state.layer,
            self.config.grid_step,
        ) {
            Ok(_) => {
                self.realizer.sync(&self.store, &self.registry, world);
                Vec::new()
            }
            Err(e) => vec![Notice::warning(format!("cannot move: {e}"))],
        }
    }

    fn save(&mut self) -> Vec<Notice> {
        match save_layout(&mut self.storage, &self.config.slot, &self.store) {
            Ok(n) => vec![Notice::info(format!("map saved ({n} objects)"))],
            Err(e) => vec![Notice::error(format!("could not save map: {e}"))],
        }
    }

    fn load(&mut self, world: &mut World) -> Vec<Notice> {
        let objects = match load_layout(&self.storage, &self.config.slot) {
            Ok(objects) => objects,
            Err(PersistError::NotFound) => {
                return vec![Notice::info("no saved map to load")];
            }
            Err(e) => return vec![Notice::error(format!("could not load map: {e}"))],
        };

        self.realizer.clear(world);
        self.store.replace_all(objects);
        let report = self.realizer.sync(&self.store, &self.registry, world);

        let mut notices = vec![Notice::info(format!(
            "map loaded ({} objects)",
            self.store.len()
        ))];
        if !report.skipped.is_empty() {
            let mut names: Vec<&str> = report.skipped.iter().map(|s| s.asset.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            notices.push(Notice::warning(format!(
                "{} objects wait for unloaded assets: {}",
                report.skipped.len(),
                names.join(", ")
            )));
        }
        notices
    }

    fn asset_arrived(&mut self, event: AssetEvent, world: &mut World) -> Vec<Notice> {
        let name = event.name().to_string();
        let mut notices = Vec::new();
        if let AssetEvent::LoadFailed { reason, .. } = &event {
            notices.push(Notice::warning(format!(
                "asset `{name}` failed to load: {reason}"
            )));
        }
        if let Err(e) = self.registry.apply(event) {
            notices.push(Notice::error(format!("asset rejected: {e}")));
            return notices;
        }

        let report = self.realizer.sync(&self.store, &self.registry, world);
        if report.realized > 0 {
            log::info!("{} objects waiting on `{name}` are now shown", report.realized);
        }
        notices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;
    use crate::placement::Tool;
    use ferrous_assets::ModelPrototype;
    use ferrous_core::{Aabb, Ray, ScenePicker};
    use std::sync::Arc;

    /// Always hits the same point.
    struct FixedPicker(Option<Vec3>);

    impl Picker for FixedPicker {
        fn pick(&self, _ray: &Ray, _world: &World) -> Option<Vec3> {
            self.0
        }
    }

    fn proto(name: &str) -> Arc<ModelPrototype> {
        Arc::new(ModelPrototype::new(
            name,
            format!("models/{name}.glb"),
            vec![7u8; 8],
            Aabb::unit_cube(),
        ))
    }

    struct Session {
        editor: Editor<MemoryStorage>,
        world: World,
        camera: Camera,
    }

    impl Session {
        fn new() -> Self {
            Self {
                editor: Editor::new(EditorConfig::default(), MemoryStorage::new()),
                world: World::new(),
                camera: Camera::default(),
            }
        }

        fn run(&mut self, cmd: Command, picker: &dyn Picker) -> Vec<Notice> {
            self.editor
                .dispatch(cmd, &mut self.world, &self.camera, picker)
        }

        fn send(&mut self, cmd: Command) -> Vec<Notice> {
            self.run(cmd, &FixedPicker(None))
        }
    }

    #[test]
    fn click_places_cube_at_snapped_point() {
        let mut s = Session::new();
        s.send(Command::SetLayer(3));
        s.send(Command::ToggleCubePlacement);
        let hit = FixedPicker(Some(Vec3::new(1.4, 0.0, 2.6)));
        assert!(s.run(Command::Click { ndc: glam::Vec2::ZERO }, &hit).is_empty());

        let (id, obj) = s.editor.store().iter().next().unwrap();
        assert_eq!(obj.position, Vec3::new(1.0, 3.0, 3.0));
        let node = s.editor.realizer().handle(id).unwrap();
        assert_eq!(s.world.position(node), Some(Vec3::new(1.0, 3.0, 3.0)));
    }

    #[test]
    fn click_on_nothing_is_silent() {
        let mut s = Session::new();
        s.send(Command::ToggleCubePlacement);
        assert!(s.send(Command::Click { ndc: glam::Vec2::ZERO }).is_empty());
        assert!(s.editor.store().is_empty());
    }

    #[test]
    fn click_with_real_picker_hits_ground() {
        let mut s = Session::new();
        s.send(Command::ToggleCubePlacement);
        let picker = ScenePicker::new(EditorConfig::default().ground());
        s.run(Command::Click { ndc: glam::Vec2::ZERO }, &picker);
        // the default camera looks at the origin
        let obj = s.editor.store().iter().next().unwrap().1;
        assert_eq!(obj.position, Vec3::ZERO);
    }

    #[test]
    fn unknown_asset_warns_and_keeps_store() {
        let mut s = Session::new();
        s.send(Command::SelectAsset("eevee".into()));
        let notices = s.send(Command::PlaceAt { point: Vec3::ONE });
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, crate::NoticeLevel::Warning);
        assert!(s.editor.store().is_empty());
        assert!(s.world.is_empty());
    }

    #[test]
    fn unrepresentable_points_never_reach_the_saved_map() {
        let mut s = Session::new();
        s.send(Command::ToggleCubePlacement);
        s.send(Command::PlaceAt { point: Vec3::new(1.0, 0.0, 1.0) });

        let notices = s.send(Command::PlaceAt { point: Vec3::new(f32::NAN, 0.0, 1.0) });
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, crate::NoticeLevel::Warning);
        let notices = s.send(Command::Move { index: 0, point: Vec3::new(2e6, 0.0, 0.0) });
        assert_eq!(notices[0].level, crate::NoticeLevel::Warning);
        assert_eq!(s.editor.store().len(), 1);
        assert_eq!(s.world.len(), 1);

        s.send(Command::Save);
        let notices = s.send(Command::Load);
        assert!(notices.iter().all(|n| n.level == crate::NoticeLevel::Info));
        assert_eq!(
            s.editor.store().to_vec(),
            [crate::PlacedObject::new("cube", Vec3::new(1.0, 0.0, 1.0), 0)]
        );
    }

    #[test]
    fn remove_and_move_by_index() {
        let mut s = Session::new();
        s.send(Command::ToggleCubePlacement);
        s.send(Command::PlaceAt { point: Vec3::ZERO });
        s.send(Command::PlaceAt { point: Vec3::new(4.0, 0.0, 4.0) });

        s.send(Command::SetLayer(2));
        s.send(Command::Move { index: 1, point: Vec3::new(-2.4, 0.0, 0.6) });
        let moved = s.editor.store().iter().nth(1).unwrap().1.clone();
        assert_eq!(moved.position, Vec3::new(-2.0, 2.0, 1.0));
        assert_eq!(moved.layer, 2);

        s.send(Command::Remove { index: 0 });
        assert_eq!(s.editor.store().len(), 1);
        assert_eq!(s.world.len(), 1);
        assert!(!s.send(Command::Remove { index: 5 }).is_empty());
    }

    #[test]
    fn load_with_nothing_saved_is_informational() {
        let mut s = Session::new();
        let notices = s.send(Command::Load);
        assert_eq!(notices[0].level, crate::NoticeLevel::Info);
    }

    #[test]
    fn asset_arrival_realizes_waiting_objects() {
        let storage = MemoryStorage::new().with_slot(
            "mapData",
            r#"(schemaVersion: 1, objects: [
                (assetId: "pikachu", position: (1.4, 3.0, 2.6), layer: 3),
            ])"#,
        );
        let mut s = Session::new();
        s.editor = Editor::new(EditorConfig::default(), storage);

        let notices = s.send(Command::Load);
        assert!(notices.iter().any(|n| n.level == crate::NoticeLevel::Warning));
        assert!(s.world.is_empty());

        s.send(Command::Asset(AssetEvent::Loaded(proto("pikachu"))));
        assert_eq!(s.world.len(), 1);
    }

    #[test]
    fn failed_asset_load_is_reported() {
        let mut s = Session::new();
        let notices = s.send(Command::Asset(AssetEvent::LoadFailed {
            name: "eevee".into(),
            reason: "timed out".into(),
        }));
        assert_eq!(notices[0].level, crate::NoticeLevel::Warning);
        assert!(matches!(
            s.editor.registry().status("eevee"),
            ferrous_assets::AssetStatus::Failed(_)
        ));
    }

    #[test]
    fn out_of_range_layer_is_clamped_with_warning() {
        let mut s = Session::new();
        let notices = s.send(Command::SetLayer(12));
        assert_eq!(notices.len(), 1);
        assert_eq!(s.editor.state().layer, 4);
        assert_eq!(s.editor.state().tool, Tool::None);
    }
}
