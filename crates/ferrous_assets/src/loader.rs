//! Background model loading.
//!
//! Each [`AssetLoader::request`] starts one worker thread that fetches the
//! bytes and sends the result back over an `mpsc` channel.  The host calls
//! [`AssetLoader::poll`] from its event loop; it never blocks and turns every
//! finished fetch into an [`AssetEvent`].  Requests that stay pending longer
//! than the timeout are reported as `LoadFailed`, and a worker that finishes
//! after that is ignored.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ferrous_core::Aabb;

use crate::bounds::gltf_bounds;
use crate::error::AssetError;
use crate::manifest::{AssetManifest, ModelEntry};
use crate::prototype::ModelPrototype;
use crate::registry::AssetEvent;
use crate::source::AssetSource;

struct Completion {
    name: String,
    generation: u64,
    result: Result<ModelPrototype, AssetError>,
}

pub struct AssetLoader {
    source: Arc<dyn AssetSource>,
    timeout: Option<Duration>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    /// name → (generation, time the request was issued)
    pending: HashMap<String, (u64, Instant)>,
    next_generation: u64,
    /// failures detected synchronously, reported on the next poll
    ready: Vec<AssetEvent>,
}

impl AssetLoader {
    pub fn new(source: Arc<dyn AssetSource>, timeout: Option<Duration>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            timeout,
            tx,
            rx,
            pending: HashMap::new(),
            next_generation: 0,
            ready: Vec::new(),
        }
    }

    /// Starts fetching `name`.  Returns `false` if a load for that name is
    /// already in flight.
    pub fn request(&mut self, name: &str, entry: &ModelEntry) -> bool {
        if self.pending.contains_key(name) {
            log::debug!("asset `{name}` already loading");
            return false;
        }
        let generation = self.next_generation;
        self.next_generation += 1;
        self.pending
            .insert(name.to_string(), (generation, Instant::now()));

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let job_name = name.to_string();
        let path: PathBuf = entry.path.clone();
        let fallback = Aabb::centered(entry.half_extent);

        let spawned = std::thread::Builder::new()
            .name(format!("asset-{name}"))
            .spawn(move || {
                let result = source.fetch(&path).map(|bytes| {
                    let bounds = gltf_bounds(&bytes).unwrap_or(fallback);
                    ModelPrototype::new(job_name.clone(), path, bytes, bounds)
                });
                // the loader may already be gone; nothing to report to then
                let _ = tx.send(Completion {
                    name: job_name,
                    generation,
                    result,
                });
            });

        if let Err(e) = spawned {
            self.pending.remove(name);
            self.ready.push(AssetEvent::LoadFailed {
                name: name.to_string(),
                reason: AssetError::Spawn(e).to_string(),
            });
        } else {
            log::debug!("asset `{name}` requested from {}", entry.path.display());
        }
        true
    }

    /// Requests every model listed in `manifest`, in name order.  Returns the
    /// names that were requested.
    pub fn request_all(&mut self, manifest: &AssetManifest) -> Vec<String> {
        manifest
            .models
            .iter()
            .filter(|(name, entry)| self.request(name, entry))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Drains finished loads and expired requests.  Never blocks.
    pub fn poll(&mut self, now: Instant) -> Vec<AssetEvent> {
        let mut events = std::mem::take(&mut self.ready);

        while let Ok(done) = self.rx.try_recv() {
            // a completion only counts for the request that started it
            match self.pending.get(&done.name) {
                Some(&(generation, _)) if generation == done.generation => {
                    self.pending.remove(&done.name);
                }
                _ => {
                    log::debug!("dropping stale completion for `{}`", done.name);
                    continue;
                }
            }
            events.push(match done.result {
                Ok(proto) => {
                    log::info!("asset `{}` loaded ({} bytes)", proto.name, proto.byte_len());
                    AssetEvent::Loaded(Arc::new(proto))
                }
                Err(e) => {
                    log::warn!("asset `{}` failed to load: {e}", done.name);
                    AssetEvent::LoadFailed {
                        name: done.name,
                        reason: e.to_string(),
                    }
                }
            });
        }

        if let Some(timeout) = self.timeout {
            let mut expired: Vec<String> = self
                .pending
                .iter()
                .filter(|(_, &(_, started))| now.saturating_duration_since(started) >= timeout)
                .map(|(name, _)| name.clone())
                .collect();
            expired.sort_unstable();
            for name in expired {
                self.pending.remove(&name);
                log::warn!("asset `{name}` timed out after {timeout:?}");
                events.push(AssetEvent::LoadFailed {
                    name,
                    reason: AssetError::TimedOut(timeout).to_string(),
                });
            }
        }

        events
    }

    /// Number of loads still in flight.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.ready.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FsSource;
    use std::path::Path;
    use std::sync::Mutex;

    /// Polls until `want` events arrive or a generous deadline passes.
    fn poll_until(loader: &mut AssetLoader, want: usize) -> Vec<AssetEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < want && Instant::now() < deadline {
            out.extend(loader.poll(Instant::now()));
            std::thread::sleep(Duration::from_millis(5));
        }
        out
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("models")).unwrap();
        std::fs::write(dir.path().join("models/pikachu.glb"), b"glTF-data").unwrap();

        let mut loader = AssetLoader::new(Arc::new(FsSource::new(dir.path())), None);
        let mut entry = ModelEntry::new("models/pikachu.glb");
        entry.half_extent = 1.5;
        assert!(loader.request("pikachu", &entry));
        assert!(!loader.request("pikachu", &entry));

        let events = poll_until(&mut loader, 1);
        assert_eq!(events.len(), 1);
        match &events[0] {
            AssetEvent::Loaded(proto) => {
                assert_eq!(proto.name, "pikachu");
                assert_eq!(&proto.bytes[..], b"glTF-data");
                assert_eq!(proto.bounds, Aabb::centered(1.5));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(loader.is_idle());
    }

    #[test]
    fn missing_file_becomes_load_failed() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = AssetLoader::new(Arc::new(FsSource::new(dir.path())), None);
        let requested = loader.request_all(&AssetManifest::default());
        assert_eq!(requested, ["eevee", "pikachu"]);

        let events = poll_until(&mut loader, 2);
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| matches!(e, AssetEvent::LoadFailed { .. })));
    }

    /// Source that blocks until the test releases it.
    struct Gate(Mutex<Receiver<()>>);

    impl AssetSource for Gate {
        fn fetch(&self, _path: &Path) -> Result<Vec<u8>, AssetError> {
            let _ = self.0.lock().unwrap().recv();
            Ok(vec![1])
        }
    }

    #[test]
    fn slow_load_times_out_and_late_result_is_dropped() {
        let (release, gate) = mpsc::channel();
        let timeout = Duration::from_secs(10);
        let mut loader = AssetLoader::new(Arc::new(Gate(Mutex::new(gate))), Some(timeout));
        loader.request("eevee", &ModelEntry::new("eevee.glb"));

        // nothing yet, and not expired
        assert!(loader.poll(Instant::now()).is_empty());

        let later = Instant::now() + Duration::from_secs(60);
        let events = loader.poll(later);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            AssetEvent::LoadFailed { name, .. } if name == "eevee"
        ));
        assert_eq!(loader.pending(), 0);

        release.send(()).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        assert!(loader.poll(Instant::now()).is_empty());
    }

    /// One gate per path, so each request can be released on its own.
    struct Gates(HashMap<PathBuf, Mutex<Receiver<()>>>);

    impl AssetSource for Gates {
        fn fetch(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
            if let Some(gate) = self.0.get(path) {
                let _ = gate.lock().unwrap().recv();
            }
            Ok(vec![2])
        }
    }

    #[test]
    fn timed_out_worker_does_not_answer_a_retry() {
        let (release_old, old) = mpsc::channel();
        let (release_new, new) = mpsc::channel();
        let gates = Gates(HashMap::from([
            (PathBuf::from("old.glb"), Mutex::new(old)),
            (PathBuf::from("new.glb"), Mutex::new(new)),
        ]));
        let timeout = Duration::from_secs(10);
        let mut loader = AssetLoader::new(Arc::new(gates), Some(timeout));

        assert!(loader.request("eevee", &ModelEntry::new("old.glb")));
        let expired = loader.poll(Instant::now() + Duration::from_secs(60));
        assert_eq!(expired.len(), 1);

        // retry under the same name while the first worker is still stuck
        assert!(loader.request("eevee", &ModelEntry::new("new.glb")));
        release_old.send(()).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        assert!(loader.poll(Instant::now()).is_empty());
        assert_eq!(loader.pending(), 1);

        release_new.send(()).unwrap();
        let events = poll_until(&mut loader, 1);
        assert_eq!(events.len(), 1);
        match &events[0] {
            AssetEvent::Loaded(proto) => assert_eq!(proto.source, Path::new("new.glb")),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(loader.is_idle());
    }
}
