//! Display labels for status, type and priority codes.
//!
//! YesDev publishes its enumerations (task status, need priority, problem
//! attribution, ...) in a global configuration document. The document is
//! fetched once per process by [`LabelCache::initialize`] and every
//! formatter resolves codes through [`LabelCache::label`].
//!
//! Lookups never fail: an unknown category, an unknown code, or a cache that
//! never became ready all resolve to the category's default label.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::YesDevClient;
use crate::error::{Result, YesDevError};

/// Service returning the global configuration document.
pub const GLOBAL_CONFIG_SERVICE: &str = "Platform.Config.GetGlobalConfig";

/// Fallback for status-like categories.
pub const UNKNOWN_STATUS: &str = "未知状态";
/// Fallback for type-like categories.
pub const UNKNOWN_TYPE: &str = "其他";
/// Fallback for level/priority categories.
pub const UNKNOWN_LEVEL: &str = "未知优先级";

/// A label category in the `alias_list` of the global configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabelCategory {
    TaskStatus,
    TaskType,
    ProjectStatus,
    NeedStatus,
    NeedLevel,
    ProblemStatus,
    ProblemType,
    ProblemLevel,
    ProblemAttribution,
}

impl LabelCategory {
    /// Every category the formatters use.
    pub const ALL: [Self; 9] = [
        Self::TaskStatus,
        Self::TaskType,
        Self::ProjectStatus,
        Self::NeedStatus,
        Self::NeedLevel,
        Self::ProblemStatus,
        Self::ProblemType,
        Self::ProblemLevel,
        Self::ProblemAttribution,
    ];

    /// Key under `alias_list`.
    pub fn key(self) -> &'static str {
        match self {
            Self::TaskStatus => "TASK_STATUS",
            Self::TaskType => "TASK_TYPE",
            Self::ProjectStatus => "PROJECT_STATUS",
            Self::NeedStatus => "NEED_STATUS",
            Self::NeedLevel => "NEED_LEVEL",
            Self::ProblemStatus => "PROBLEM_STATUS",
            Self::ProblemType => "PROBLEM_TYPE",
            Self::ProblemLevel => "PROBLEM_LEVEL",
            Self::ProblemAttribution => "PROBLEM_ATTRIBUTION",
        }
    }

    /// Look a category up by its `alias_list` key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Label used when a code cannot be resolved.
    pub fn default_label(self) -> &'static str {
        match self {
            Self::TaskStatus | Self::ProjectStatus | Self::NeedStatus | Self::ProblemStatus => {
                UNKNOWN_STATUS
            }
            Self::TaskType | Self::ProblemType | Self::ProblemAttribution => UNKNOWN_TYPE,
            Self::NeedLevel | Self::ProblemLevel => UNKNOWN_LEVEL,
        }
    }
}

impl fmt::Display for LabelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One resolved code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// Display name.
    pub name: String,
    /// UI color, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Short alias, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl LabelEntry {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self {
                name: name.clone(),
                color: None,
                alias: None,
            }),
            Value::Object(map) => {
                let text = |key: &str| {
                    map.get(key)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                };
                Some(Self {
                    name: text("name")?,
                    color: text("color"),
                    alias: text("alias"),
                })
            }
            _ => None,
        }
    }
}

/// Immutable code → label tables, keyed by category.
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    categories: HashMap<LabelCategory, HashMap<i64, LabelEntry>>,
}

impl LabelCatalog {
    /// Build a catalog from the global configuration document.
    ///
    /// Categories may be objects keyed by code or arrays indexed by code.
    /// Unknown categories and malformed entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`YesDevError::MissingData`] if the document has no `alias_list` object.
    pub fn from_config(config: &Value) -> Result<Self> {
        let alias_list = config
            .get("alias_list")
            .and_then(Value::as_object)
            .ok_or_else(|| YesDevError::MissingData {
                service: GLOBAL_CONFIG_SERVICE.to_string(),
            })?;

        let mut catalog = Self::default();
        for (key, table) in alias_list {
            let Some(category) = LabelCategory::from_key(key) else {
                continue;
            };
            let entries: HashMap<i64, LabelEntry> = match table {
                Value::Object(map) => map
                    .iter()
                    .filter_map(|(code, v)| Some((code.trim().parse().ok()?, LabelEntry::from_value(v)?)))
                    .collect(),
                Value::Array(items) => items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| Some((i64::try_from(i).ok()?, LabelEntry::from_value(v)?)))
                    .collect(),
                _ => continue,
            };
            catalog.categories.insert(category, entries);
        }
        Ok(catalog)
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, category: LabelCategory, code: i64, name: impl Into<String>) {
        self.categories.entry(category).or_default().insert(
            code,
            LabelEntry {
                name: name.into(),
                color: None,
                alias: None,
            },
        );
    }

    /// Look up one entry.
    pub fn get(&self, category: LabelCategory, code: i64) -> Option<&LabelEntry> {
        self.categories.get(&category)?.get(&code)
    }

    /// Number of categories present.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if no category was loaded.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Where a [`LabelCache`] gets its catalog from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the catalog once.
    async fn fetch_catalog(&self) -> Result<LabelCatalog>;
}

#[async_trait]
impl CatalogSource for YesDevClient {
    async fn fetch_catalog(&self) -> Result<LabelCatalog> {
        let config: Value = self.call(GLOBAL_CONFIG_SERVICE, &()).await?;
        LabelCatalog::from_config(&config)
    }
}

/// Observable lifecycle of a [`LabelCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelCacheState {
    Uninitialized,
    Initializing,
    Ready,
}

enum Slot {
    Uninitialized,
    Initializing,
    Ready(Arc<LabelCatalog>),
}

struct Inner {
    slot: Slot,
    /// Fetches started so far.
    attempts: u64,
}

/// Process-wide label cache with a single in-flight initialization.
///
/// `initialize` may be called any number of times, concurrently or not.
/// Callers that arrive while a fetch is running wait for it and never start
/// a second one. Once `Ready`, the catalog is kept for the life of the cache.
pub struct LabelCache {
    inner: RwLock<Inner>,
    fetch_lock: tokio::sync::Mutex<()>,
}

impl Default for LabelCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LabelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelCache")
            .field("state", &self.state())
            .field("attempts", &self.attempts())
            .finish()
    }
}

impl LabelCache {
    /// An uninitialized cache; every lookup returns defaults until initialized.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                slot: Slot::Uninitialized,
                attempts: 0,
            }),
            fetch_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// A cache that is already `Ready` with the given catalog.
    pub fn with_catalog(catalog: LabelCatalog) -> Self {
        let cache = Self::new();
        cache.write().slot = Slot::Ready(Arc::new(catalog));
        cache
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LabelCacheState {
        match self.read().slot {
            Slot::Uninitialized => LabelCacheState::Uninitialized,
            Slot::Initializing => LabelCacheState::Initializing,
            Slot::Ready(_) => LabelCacheState::Ready,
        }
    }

    /// Returns true once a fetch has succeeded.
    pub fn is_ready(&self) -> bool {
        self.state() == LabelCacheState::Ready
    }

    /// Number of remote fetches started so far.
    pub fn attempts(&self) -> u64 {
        self.read().attempts
    }

    /// The loaded catalog, if ready.
    pub fn catalog(&self) -> Option<Arc<LabelCatalog>> {
        match &self.read().slot {
            Slot::Ready(catalog) => Some(Arc::clone(catalog)),
            _ => None,
        }
    }

    /// Fetch the catalog unless it is already loaded or being loaded.
    ///
    /// Never fails: a failed fetch is logged and leaves the cache
    /// `Uninitialized`, so lookups keep returning defaults.
    pub async fn initialize<S: CatalogSource + ?Sized>(&self, source: &S) {
        let (observed_in_flight, seen_attempts) = {
            let inner = self.read();
            match inner.slot {
                Slot::Ready(_) => return,
                Slot::Initializing => (true, inner.attempts),
                Slot::Uninitialized => (false, inner.attempts),
            }
        };

        let _guard = self.fetch_lock.lock().await;

        {
            let mut inner = self.write();
            match inner.slot {
                Slot::Ready(_) => return,
                // Nobody else holds the fetch lock, so this is a fetch whose
                // future was dropped; start over.
                Slot::Initializing => {}
                Slot::Uninitialized if observed_in_flight || inner.attempts != seen_attempts => {
                    return;
                }
                Slot::Uninitialized => {}
            }
            inner.slot = Slot::Initializing;
            inner.attempts += 1;
        }

        tracing::debug!("fetching YesDev label catalog");
        let fetched = source.fetch_catalog().await;

        let mut inner = self.write();
        match fetched {
            Ok(catalog) => {
                tracing::info!(categories = catalog.len(), "YesDev label catalog loaded");
                inner.slot = Slot::Ready(Arc::new(catalog));
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load YesDev label catalog; using default labels");
                inner.slot = Slot::Uninitialized;
            }
        }
    }

    /// Display name for `code` in `category`, or the category default.
    pub fn label(&self, category: LabelCategory, code: i64) -> String {
        match &self.read().slot {
            Slot::Ready(catalog) => catalog
                .get(category, code)
                .map_or_else(|| category.default_label().to_string(), |e| e.name.clone()),
            _ => category.default_label().to_string(),
        }
    }

    /// Like [`label`](Self::label) for codes that may be missing.
    pub fn label_opt(&self, category: LabelCategory, code: Option<i64>) -> String {
        code.map_or_else(
            || category.default_label().to_string(),
            |c| self.label(category, c),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn sample_config() -> Value {
        json!({
            "alias_list": {
                "TASK_STATUS": {
                    "600": {"name": "待办", "color": "#999"},
                    "1500": {"name": "进行中"},
                    "2000": {"name": "已完成"}
                },
                "TASK_TYPE": ["其他", "UI设计", "产品原型", "技术开发"],
                "NEED_LEVEL": {"1": "高", "2": "中"},
                "SOMETHING_ELSE": {"1": {"name": "ignored"}}
            }
        })
    }

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
                delay: Duration::from_millis(50),
            }
        }
    }

    #[async_trait]
    impl CatalogSource for CountingSource {
        async fn fetch_catalog(&self) -> Result<LabelCatalog> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                Err(YesDevError::remote(500, "config unavailable"))
            } else {
                LabelCatalog::from_config(&sample_config())
            }
        }
    }

    #[test]
    fn catalog_parses_object_and_array_shapes() {
        let catalog = LabelCatalog::from_config(&sample_config()).unwrap();
        assert_eq!(catalog.get(LabelCategory::TaskStatus, 600).unwrap().name, "待办");
        assert_eq!(
            catalog.get(LabelCategory::TaskStatus, 600).unwrap().color.as_deref(),
            Some("#999")
        );
        assert_eq!(catalog.get(LabelCategory::TaskType, 3).unwrap().name, "技术开发");
        assert_eq!(catalog.get(LabelCategory::NeedLevel, 1).unwrap().name, "高");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn catalog_without_alias_list_is_rejected() {
        let err = LabelCatalog::from_config(&json!({"version": 3})).unwrap_err();
        assert!(matches!(err, YesDevError::MissingData { .. }));
    }

    #[test]
    fn uninitialized_cache_returns_defaults() {
        let cache = LabelCache::new();
        assert_eq!(cache.state(), LabelCacheState::Uninitialized);
        assert_eq!(cache.label(LabelCategory::TaskStatus, 600), UNKNOWN_STATUS);
        assert_eq!(cache.label(LabelCategory::TaskType, 3), UNKNOWN_TYPE);
        assert_eq!(cache.label(LabelCategory::NeedLevel, 1), UNKNOWN_LEVEL);
        assert_eq!(cache.label(LabelCategory::ProblemAttribution, 100), UNKNOWN_TYPE);
    }

    #[test]
    fn unknown_codes_fall_back_per_category() {
        let cache = LabelCache::with_catalog(LabelCatalog::from_config(&sample_config()).unwrap());
        for category in LabelCategory::ALL {
            assert_eq!(cache.label(category, -12345), category.default_label());
        }
        assert_eq!(cache.label_opt(LabelCategory::NeedStatus, None), UNKNOWN_STATUS);
        assert_eq!(cache.label(LabelCategory::TaskStatus, 1500), "进行中");
    }

    #[test]
    fn category_keys_round_trip() {
        for category in LabelCategory::ALL {
            assert_eq!(LabelCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(LabelCategory::from_key("NOPE"), None);
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let cache = LabelCache::new();
        let source = CountingSource::new(false);

        cache.initialize(&source).await;
        cache.initialize(&source).await;

        assert_eq!(cache.state(), LabelCacheState::Ready);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.label(LabelCategory::TaskStatus, 2000), "已完成");
    }

    #[tokio::test]
    async fn concurrent_initialize_fetches_once() {
        let cache = Arc::new(LabelCache::new());
        let source = Arc::new(CountingSource::new(false));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let source = Arc::clone(&source);
                tokio::spawn(async move { cache.initialize(source.as_ref()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state(), LabelCacheState::Ready);
    }

    #[tokio::test]
    async fn concurrent_failed_initialize_fetches_once_and_stays_uninitialized() {
        let cache = Arc::new(LabelCache::new());
        let source = Arc::new(CountingSource::new(true));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let source = Arc::clone(&source);
                tokio::spawn(async move { cache.initialize(source.as_ref()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state(), LabelCacheState::Uninitialized);
        assert_eq!(cache.label(LabelCategory::TaskStatus, 600), UNKNOWN_STATUS);
    }

    #[tokio::test]
    async fn failed_initialize_can_be_retried_later() {
        let cache = LabelCache::new();
        cache.initialize(&CountingSource::new(true)).await;
        assert_eq!(cache.state(), LabelCacheState::Uninitialized);

        let source = CountingSource::new(false);
        cache.initialize(&source).await;
        assert_eq!(cache.state(), LabelCacheState::Ready);
        assert_eq!(cache.attempts(), 2);
    }
}
