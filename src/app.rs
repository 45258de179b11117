//! Application core.
//!
//! Wires settings, the local store, the frequently viewed manager and its
//! view, and the static page loader together.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::database::connection::Database;
use crate::managers::frequently_viewed::{FrequentlyViewedManager, FrequentlyViewedTrait};
use crate::managers::frequently_viewed_view::FrequentlyViewedView;
use crate::platform;
use crate::services::clock::{Clock, SystemClock};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::static_page::{PageState, StaticPageLoader, StaticPageRequest};
use crate::storage::{LocalStorage, SqliteStorage};
use crate::types::document::Doc;
use crate::types::frequently_viewed::VisitRecord;

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub frequently_viewed: FrequentlyViewedManager,
    pub frequently_viewed_view: FrequentlyViewedView,
    pub static_pages: StaticPageLoader,
    runtime: tokio::runtime::Runtime,
}

impl App {
    /// Opens the app with the settings file at `config_path` (platform default
    /// when `None`) and the store in `data_dir` (platform default when `None`,
    /// or the path named in settings).
    pub fn new(
        config_path: Option<String>,
        data_dir: Option<PathBuf>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;

        let db_path = match (&settings.storage.database_path, data_dir) {
            (_, Some(dir)) => dir.join("docbrowser.db"),
            (Some(path), None) => PathBuf::from(path),
            (None, None) => platform::get_data_dir().join("docbrowser.db"),
        };
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let storage = SqliteStorage::new(Database::open(&db_path)?);
        info!(db = %db_path.display(), config = %settings_engine.get_config_path(), "opened local store");

        Ok(Self::with_parts(settings_engine, Box::new(storage), Arc::new(SystemClock))?)
    }

    /// Builds an app over an explicit store and clock.
    pub fn with_parts(
        settings_engine: SettingsEngine,
        storage: Box<dyn LocalStorage>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, std::io::Error> {
        let settings = settings_engine.get_settings().clone();
        let frequently_viewed =
            FrequentlyViewedManager::new(storage, clock, settings.frequently_viewed.clone());
        let frequently_viewed_view = FrequentlyViewedView::new(settings.frequently_viewed.page_size, 0);
        let static_pages =
            StaticPageLoader::new(&settings.general.base_url, &settings.general.site_title);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            settings_engine,
            frequently_viewed,
            frequently_viewed_view,
            static_pages,
            runtime,
        })
    }

    /// Re-reads derived state after a settings change.
    pub fn apply_settings(&mut self) {
        let settings = self.settings_engine.get_settings().clone();
        self.frequently_viewed
            .set_settings(settings.frequently_viewed.clone());
        self.frequently_viewed_view
            .set_limit(settings.frequently_viewed.page_size);
        self.frequently_viewed_view.mark_updated();
        self.static_pages =
            StaticPageLoader::new(&settings.general.base_url, &settings.general.site_title);
    }

    /// Page-view hook: counts `doc` and invalidates the cached collection.
    pub fn on_document_view(&mut self, doc: Option<&Doc>) -> Option<VisitRecord> {
        self.frequently_viewed_view
            .record_view(&mut self.frequently_viewed, doc)
    }

    /// Loads a static page, blocking on the app's runtime.
    pub fn load_static_page(&self, request: &StaticPageRequest) -> PageState {
        self.runtime.block_on(self.static_pages.load(request))
    }

    /// Whether tracking is on for this session.
    pub fn is_tracking_enabled(&self) -> bool {
        self.frequently_viewed.is_tracking_enabled()
    }
}
