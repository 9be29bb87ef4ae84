use crate::config::LabelConfig;
use crate::error::LabelError;
use crate::queue::LabelQueue;
use crate::viewer::{DocumentViewer, SystemViewer, ViewerStatus};
use jarlabel_layout::{LabelComposer, RenderWarning, SheetPlan, Standard14Metrics};
use jarlabel_render_lopdf::{AssetStore, LabelRenderer};
use jarlabel_resource::FilesystemResourceProvider;
use jarlabel_traits::ResourceProvider;
use jarlabel_types::{Brand, QueueEntry, Strain, Tier};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a render call currently is. Every call starts and ends at `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Validating,
    Paginating,
    Drawing,
    Saving,
    QueueCleared,
}

/// The result of a successful [`LabelGenerator::generate`] call.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Absolute path of the saved sheet.
    pub path: PathBuf,
    pub page_count: usize,
    pub entry_count: usize,
    pub warnings: Vec<RenderWarning>,
    pub viewer: ViewerStatus,
}

/// Owns the label queue and turns it into a saved PDF sheet.
#[derive(Debug)]
pub struct LabelGenerator {
    config: LabelConfig,
    queue: LabelQueue,
    assets: AssetStore,
    viewer: Box<dyn DocumentViewer>,
    state: RenderState,
}

impl LabelGenerator {
    /// A generator reading artwork from `config.resource_root` and opening
    /// finished sheets with the system viewer.
    pub fn new(config: LabelConfig) -> Result<Self, LabelError> {
        let provider = Arc::new(FilesystemResourceProvider::new(&config.resource_root));
        Self::with_resources(config, provider)
    }

    pub fn with_resources(config: LabelConfig, provider: Arc<dyn ResourceProvider>) -> Result<Self, LabelError> {
        config.validate()?;
        log::debug!("Artwork is read through the {} provider", provider.name());
        Ok(Self {
            config,
            queue: LabelQueue::new(),
            assets: AssetStore::new(provider),
            viewer: Box::new(SystemViewer),
            state: RenderState::Idle,
        })
    }

    pub fn with_viewer(mut self, viewer: Box<dyn DocumentViewer>) -> Self {
        self.viewer = viewer;
        self
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    pub fn set_output_path(&mut self, path: impl Into<PathBuf>) {
        self.config.output_path = path.into();
    }

    pub fn set_auto_open(&mut self, auto_open: bool) {
        self.config.auto_open = auto_open;
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn queue(&self) -> &LabelQueue {
        &self.queue
    }

    /// Queues one label pair. The tier must belong to the brand.
    pub fn add_to_queue(&mut self, strain: Strain, brand: Brand, tier: Tier) -> Result<(), LabelError> {
        let entry = QueueEntry::new(strain, brand, tier)?;
        self.queue.push(entry);
        Ok(())
    }

    pub fn add_entry(&mut self, entry: QueueEntry) {
        self.queue.push(entry);
    }

    pub fn remove_from_queue(&mut self, index: usize) -> Result<QueueEntry, LabelError> {
        Ok(self.queue.remove(index)?)
    }

    pub fn queue_summary(&self) -> Vec<String> {
        self.queue.summary()
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Lays out the current queue without rendering or clearing it.
    pub fn plan(&self) -> SheetPlan {
        LabelComposer::new(
            &self.config.sheet,
            &self.config.layout,
            &Standard14Metrics,
            &self.assets,
        )
        .plan(self.queue.entries())
    }

    /// Renders the whole queue into one document, saves it over the
    /// configured output path and clears the queue. On error the queue and
    /// any previous output are left untouched.
    pub fn generate(&mut self) -> Result<RenderOutcome, LabelError> {
        self.transition(RenderState::Validating);
        if self.queue.is_empty() {
            self.transition(RenderState::Idle);
            return Err(LabelError::EmptyQueue);
        }
        log::info!("Rendering {} label pairs", self.queue.len());

        let saved = self.render_and_save();
        self.assets.clear();
        let (path, page_count, warnings) = match saved {
            Ok(saved) => saved,
            Err(e) => {
                self.transition(RenderState::Idle);
                return Err(e);
            }
        };

        let entry_count = self.queue.len();
        self.queue.clear();
        self.transition(RenderState::QueueCleared);

        let viewer = self.open_viewer(&path);
        self.transition(RenderState::Idle);

        Ok(RenderOutcome {
            path,
            page_count,
            entry_count,
            warnings,
            viewer,
        })
    }

    fn render_and_save(&mut self) -> Result<(PathBuf, usize, Vec<RenderWarning>), LabelError> {
        self.assets.clear();
        self.transition(RenderState::Paginating);
        let plan = self.plan();

        self.transition(RenderState::Drawing);
        let rendered =
            LabelRenderer::new(self.config.render_options()).render(&plan, &self.config.sheet, &self.assets)?;

        self.transition(RenderState::Saving);
        let path = save_atomically(&self.config.output_path, &rendered.bytes)?;
        log::info!(
            "Saved {} ({} pages, {} bytes)",
            path.display(),
            rendered.page_count,
            rendered.bytes.len()
        );
        self.log_warned_entries(&plan.warnings);
        Ok((path, rendered.page_count, plan.warnings))
    }

    fn log_warned_entries(&self, warnings: &[RenderWarning]) {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for warning in warnings {
            *counts.entry(warning.entry()).or_default() += 1;
        }
        for (index, count) in counts {
            if let Some(entry) = self.queue.entries().get(index) {
                log::info!(
                    "Label {} ({}) rendered with {} warning(s)",
                    index + 1,
                    entry.strain().name(),
                    count
                );
            }
        }
    }

    fn open_viewer(&self, path: &Path) -> ViewerStatus {
        if !self.config.auto_open {
            return ViewerStatus::Disabled;
        }
        let status = self.viewer.open(path);
        if let ViewerStatus::Failed { reason } = &status {
            log::warn!("Could not open the sheet ({reason}); it is saved at {}", path.display());
        }
        status
    }

    fn transition(&mut self, next: RenderState) {
        log::debug!("Render state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Writes `bytes` to a temporary sibling of `target`, then renames it over
/// `target`. Returns the absolute path of the saved file.
pub fn save_atomically(target: &Path, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".jarlabel-")
        .suffix(".tmp")
        .tempfile_in(&dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(target).map_err(|e| e.error)?;

    fs::canonicalize(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jarlabel_traits::InMemoryResourceProvider;
    use jarlabel_types::{BrandId, Category, Classification, PriceTable, TierId};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default, Clone)]
    struct RecordingViewer {
        opened: Rc<RefCell<Vec<PathBuf>>>,
        fail: bool,
    }

    impl DocumentViewer for RecordingViewer {
        fn open(&self, path: &Path) -> ViewerStatus {
            self.opened.borrow_mut().push(path.to_path_buf());
            if self.fail {
                ViewerStatus::Failed {
                    reason: "no viewer".into(),
                }
            } else {
                ViewerStatus::Opened
            }
        }
    }

    fn records(strain: &str) -> (Strain, Brand, Tier) {
        let brand = Brand::new(BrandId(1), "Cherry", Category::Med, None).unwrap();
        let tier = Tier::new(TierId(1), BrandId(1), "Red Tier", None, None, 0.5, PriceTable::new()).unwrap();
        let strain = Strain::new(strain, Classification::Hybrid, 20.5, None).unwrap();
        (strain, brand, tier)
    }

    fn generator(dir: &Path, auto_open: bool) -> LabelGenerator {
        let config = LabelConfig {
            output_path: dir.join("out/labels.pdf"),
            auto_open,
            ..LabelConfig::default()
        };
        LabelGenerator::with_resources(config, Arc::new(InMemoryResourceProvider::new())).unwrap()
    }

    #[test]
    fn empty_queue_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = generator(dir.path(), false);
        assert!(matches!(generator.generate(), Err(LabelError::EmptyQueue)));
        assert_eq!(generator.state(), RenderState::Idle);
        assert!(!dir.path().join("out/labels.pdf").exists());
    }

    #[test]
    fn generate_saves_and_clears_queue() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = generator(dir.path(), false);
        for name in ["A", "B", "C", "D", "E"] {
            let (strain, brand, tier) = records(name);
            generator.add_to_queue(strain, brand, tier).unwrap();
        }

        let outcome = generator.generate().unwrap();
        assert_eq!(outcome.page_count, 2);
        assert_eq!(outcome.entry_count, 5);
        assert_eq!(outcome.viewer, ViewerStatus::Disabled);
        assert!(outcome.path.is_absolute());
        assert!(outcome.path.ends_with("out/labels.pdf"));
        assert!(fs::read(&outcome.path).unwrap().starts_with(b"%PDF"));
        assert!(generator.queue().is_empty());
        assert_eq!(generator.state(), RenderState::Idle);
        assert!(matches!(generator.generate(), Err(LabelError::EmptyQueue)));
    }

    #[test]
    fn plan_does_not_clear_queue() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = generator(dir.path(), false);
        let (strain, brand, tier) = records("Gelato");
        generator.add_to_queue(strain, brand, tier).unwrap();

        let first = generator.plan();
        let second = generator.plan();
        assert_eq!(first, second);
        assert_eq!(generator.queue().len(), 1);
    }

    #[test]
    fn mismatched_tier_is_not_queued() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = generator(dir.path(), false);
        let (strain, brand, _) = records("Gelato");
        let other = Tier::new(TierId(9), BrandId(2), "Red Tier", None, None, 0.5, PriceTable::new()).unwrap();
        let err = generator.add_to_queue(strain, brand, other).unwrap_err();
        assert!(matches!(err, LabelError::Validation(_)));
        assert!(generator.queue().is_empty());
    }

    #[test]
    fn remove_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = generator(dir.path(), false);
        let (strain, brand, tier) = records("Gelato");
        generator.add_to_queue(strain, brand, tier).unwrap();
        assert!(matches!(generator.remove_from_queue(3), Err(LabelError::Queue(_))));
        assert_eq!(generator.remove_from_queue(0).unwrap().strain().name(), "Gelato");
        assert!(generator.queue_summary().is_empty());
    }

    #[test]
    fn viewer_failure_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let viewer = RecordingViewer {
            fail: true,
            ..RecordingViewer::default()
        };
        let opened = viewer.opened.clone();
        let mut generator = generator(dir.path(), true).with_viewer(Box::new(viewer));
        let (strain, brand, tier) = records("Gelato");
        generator.add_to_queue(strain, brand, tier).unwrap();

        let outcome = generator.generate().unwrap();
        assert!(matches!(outcome.viewer, ViewerStatus::Failed { .. }));
        assert!(outcome.path.exists());
        assert_eq!(opened.borrow().as_slice(), [outcome.path.clone()]);
    }

    #[test]
    fn failed_save_keeps_queue() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let config = LabelConfig {
            output_path: blocker.join("labels.pdf"),
            auto_open: false,
            ..LabelConfig::default()
        };
        let mut generator =
            LabelGenerator::with_resources(config, Arc::new(InMemoryResourceProvider::new())).unwrap();
        let (strain, brand, tier) = records("Gelato");
        generator.add_to_queue(strain, brand, tier).unwrap();

        assert!(matches!(generator.generate(), Err(LabelError::Io(_))));
        assert_eq!(generator.queue().len(), 1);
        assert_eq!(generator.state(), RenderState::Idle);
    }

    #[test]
    fn save_atomically_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("labels.pdf");
        fs::write(&target, b"old").unwrap();
        let saved = save_atomically(&target, b"new").unwrap();
        assert_eq!(fs::read(&saved).unwrap(), b"new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".jarlabel-"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
