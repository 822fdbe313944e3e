// Local key-value persistence: recent searches and CMS content blocks.
//
// The site keeps two small entries in browser-style local storage. Both are
// best-effort caches: a missing or corrupt value is treated as empty (recent
// searches) or as the built-in defaults (CMS), and is overwritten on the next
// write. Reading therefore never fails; only writes surface `StoreError`.
//
// Storage is abstracted behind `KeyValueStore` with two implementations:
// - `MemoryStore`: a `BTreeMap`, for tests and ephemeral sessions.
// - `JsonFileStore`: one JSON object on disk, rewritten atomically (temp
//   file + rename) on every change.
//
// Entries:
// - `capitalmed-recent-searches`: JSON array of strings, most recent first,
//   deduplicated, at most 5.
// - `cms_content`: JSON object of content blocks keyed by `"{page}-{section}"`.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const RECENT_SEARCHES_KEY: &str = "capitalmed-recent-searches";
pub const CMS_CONTENT_KEY: &str = "cms_content";

/// How many recent searches are kept.
pub const MAX_RECENT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

/// String-keyed, string-valued persistent storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A store persisted as a single JSON object file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`. A missing file starts empty; an unreadable or corrupt
    /// one is logged and also starts empty (it is replaced on first write).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                log::warn!("{}: corrupt store, starting empty: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("{}: unreadable store, starting empty: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recent searches
// ---------------------------------------------------------------------------

/// Most-recent-first list of palette selections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentSearches {
    terms: Vec<String>,
}

impl RecentSearches {
    /// Read the list from `store`. Missing or corrupt data yields an empty
    /// list; anything past the cap is dropped.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mut terms: Vec<String> = match store.get(RECENT_SEARCHES_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("{RECENT_SEARCHES_KEY}: corrupt value, ignoring: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        terms.truncate(MAX_RECENT);
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Move `term` to the front (adding it if new), cap the list and
    /// persist it. The list is re-read from `store` first, so terms added
    /// through another handle on the same store are kept.
    pub fn add(&mut self, term: &str, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        *self = Self::load(&*store);
        self.terms.retain(|t| t != term);
        self.terms.insert(0, term.to_owned());
        self.terms.truncate(MAX_RECENT);
        store.set(RECENT_SEARCHES_KEY, serde_json::to_string(&self.terms)?)
    }

    pub fn clear(&mut self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        self.terms.clear();
        store.remove(RECENT_SEARCHES_KEY)
    }
}

// ---------------------------------------------------------------------------
// CMS content
// ---------------------------------------------------------------------------

/// One editable block of page copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    pub page: String,
    pub section: String,
    pub content: BTreeMap<String, String>,
    pub last_updated: DateTime<Utc>,
}

impl ContentBlock {
    fn new(page: &str, section: &str, fields: &[(&str, &str)], now: DateTime<Utc>) -> Self {
        Self {
            id: block_id(page, section),
            page: page.to_owned(),
            section: section.to_owned(),
            content: fields
                .iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            last_updated: now,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.content.get(name).map(String::as_str)
    }
}

pub fn block_id(page: &str, section: &str) -> String {
    format!("{page}-{section}")
}

/// The blocks shipped with the site.
pub fn default_blocks(now: DateTime<Utc>) -> BTreeMap<String, ContentBlock> {
    [
        ContentBlock::new(
            "home",
            "hero",
            &[
                ("title_en", "CAPITALMED"),
                ("title_ar", "كابيتال ميد"),
                ("tagline_en", "Trusted for Life"),
                ("tagline_ar", "موثوق به مدى الحياة"),
            ],
            now,
        ),
        ContentBlock::new(
            "home",
            "stats",
            &[
                ("patients", "500000"),
                ("beds", "4500"),
                ("icu", "450"),
                ("operating", "120"),
                ("providers", "3000"),
                ("specialties", "100"),
            ],
            now,
        ),
    ]
    .into_iter()
    .map(|b| (b.id.clone(), b))
    .collect()
}

/// Editable page content with an edit-mode toggle.
#[derive(Clone, Debug)]
pub struct CmsStore {
    blocks: BTreeMap<String, ContentBlock>,
    edit_mode: bool,
}

impl CmsStore {
    /// Load blocks from `store`, falling back to the defaults when the entry
    /// is missing or corrupt.
    pub fn load(store: &impl KeyValueStore, now: DateTime<Utc>) -> Self {
        let blocks = match store.get(CMS_CONTENT_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("{CMS_CONTENT_KEY}: corrupt value, using defaults: {e}");
                default_blocks(now)
            }),
            None => default_blocks(now),
        };
        Self {
            blocks,
            edit_mode: false,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Flip edit mode. Returns the new state.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.edit_mode
    }

    pub fn blocks(&self) -> &BTreeMap<String, ContentBlock> {
        &self.blocks
    }

    pub fn get(&self, page: &str, section: &str) -> Option<&ContentBlock> {
        self.blocks.get(&block_id(page, section))
    }

    /// Merge `fields` into block `id`, stamp it and persist every block.
    /// An unknown id creates the block, splitting page and section at the
    /// first `-`.
    pub fn update(
        &mut self,
        id: &str,
        fields: impl IntoIterator<Item = (String, String)>,
        now: DateTime<Utc>,
        store: &mut impl KeyValueStore,
    ) -> Result<(), StoreError> {
        let block = self.blocks.entry(id.to_owned()).or_insert_with(|| {
            let (page, section) = id.split_once('-').unwrap_or((id, ""));
            ContentBlock {
                id: id.to_owned(),
                page: page.to_owned(),
                section: section.to_owned(),
                content: BTreeMap::new(),
                last_updated: now,
            }
        });
        block.content.extend(fields);
        block.last_updated = now;
        log::debug!("cms: updated {id}");
        store.set(CMS_CONTENT_KEY, serde_json::to_string(&self.blocks)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn seeded(terms: &[&str]) -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .set(RECENT_SEARCHES_KEY, serde_json::to_string(terms).unwrap())
            .unwrap();
        store
    }

    #[test]
    fn re_adding_moves_to_front_without_duplicating() {
        let mut store = seeded(&["Cardiology", "ICU"]);
        let mut recent = RecentSearches::load(&store);
        recent.add("Cardiology", &mut store).unwrap();
        assert_eq!(recent.terms(), ["Cardiology", "ICU"]);
        recent.add("ICU", &mut store).unwrap();
        assert_eq!(recent.terms(), ["ICU", "Cardiology"]);
        assert_eq!(RecentSearches::load(&store), recent);
    }

    #[test]
    fn two_handles_on_one_store_keep_each_others_terms() {
        let mut store = MemoryStore::new();
        let mut palette = RecentSearches::load(&store);
        let mut header = RecentSearches::load(&store);
        palette.add("Cardiology", &mut store).unwrap();
        header.add("ICU", &mut store).unwrap();
        assert_eq!(header.terms(), ["ICU", "Cardiology"]);
        palette.add("News", &mut store).unwrap();
        assert_eq!(palette.terms(), ["News", "ICU", "Cardiology"]);
        assert_eq!(RecentSearches::load(&store), palette);
    }

    #[test]
    fn recent_list_is_capped() {
        let mut store = MemoryStore::new();
        let mut recent = RecentSearches::load(&store);
        for term in ["a", "b", "c", "d", "e", "f", "g"] {
            recent.add(term, &mut store).unwrap();
        }
        assert_eq!(recent.terms(), ["g", "f", "e", "d", "c"]);
    }

    #[test]
    fn oversized_stored_list_is_truncated_on_load() {
        let store = seeded(&["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(RecentSearches::load(&store).terms().len(), MAX_RECENT);
    }

    #[test]
    fn corrupt_recent_searches_load_empty_then_overwrite() {
        let mut store = MemoryStore::new();
        store.set(RECENT_SEARCHES_KEY, "{not json".into()).unwrap();
        let mut recent = RecentSearches::load(&store);
        assert!(recent.terms().is_empty());
        recent.add("News", &mut store).unwrap();
        assert_eq!(
            store.get(RECENT_SEARCHES_KEY).as_deref(),
            Some(r#"["News"]"#)
        );
    }

    #[test]
    fn clear_removes_entry() {
        let mut store = seeded(&["x"]);
        let mut recent = RecentSearches::load(&store);
        recent.clear(&mut store).unwrap();
        assert!(store.get(RECENT_SEARCHES_KEY).is_none());
    }

    #[test]
    fn cms_defaults() {
        let cms = CmsStore::load(&MemoryStore::new(), t(0));
        let hero = cms.get("home", "hero").unwrap();
        assert_eq!(hero.field("title_en"), Some("CAPITALMED"));
        assert_eq!(hero.field("tagline_en"), Some("Trusted for Life"));
        let stats = cms.get("home", "stats").unwrap();
        assert_eq!(stats.field("beds"), Some("4500"));
        assert_eq!(stats.content.len(), 6);
        assert!(cms.get("home", "footer").is_none());
        assert!(!cms.is_edit_mode());
    }

    #[test]
    fn cms_update_merges_and_persists() {
        let mut store = MemoryStore::new();
        let mut cms = CmsStore::load(&store, t(0));
        cms.update(
            "home-hero",
            [("tagline_en".to_string(), "Care for Life".to_string())],
            t(100),
            &mut store,
        )
        .unwrap();
        let hero = cms.get("home", "hero").unwrap();
        assert_eq!(hero.field("tagline_en"), Some("Care for Life"));
        assert_eq!(hero.field("title_en"), Some("CAPITALMED"));
        assert_eq!(hero.last_updated, t(100));
        // Untouched blocks keep their stamp.
        assert_eq!(cms.get("home", "stats").unwrap().last_updated, t(0));

        let reloaded = CmsStore::load(&store, t(200));
        assert_eq!(reloaded.blocks(), cms.blocks());
    }

    #[test]
    fn cms_update_creates_unknown_block() {
        let mut store = MemoryStore::new();
        let mut cms = CmsStore::load(&store, t(0));
        cms.update(
            "about-mission",
            [("body_en".to_string(), "Care first.".to_string())],
            t(5),
            &mut store,
        )
        .unwrap();
        let block = cms.get("about", "mission").unwrap();
        assert_eq!(block.page, "about");
        assert_eq!(block.section, "mission");
        assert_eq!(block.field("body_en"), Some("Care first."));
    }

    #[test]
    fn corrupt_cms_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(CMS_CONTENT_KEY, "[[[".into()).unwrap();
        let cms = CmsStore::load(&store, t(0));
        assert_eq!(cms.blocks(), &default_blocks(t(0)));
    }

    #[test]
    fn edit_mode_toggles() {
        let mut cms = CmsStore::load(&MemoryStore::new(), t(0));
        assert!(cms.toggle_edit_mode());
        assert!(!cms.toggle_edit_mode());
    }

    #[test]
    fn json_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        {
            let mut store = JsonFileStore::open(&path);
            let mut recent = RecentSearches::load(&store);
            recent.add("Careers", &mut store).unwrap();
            recent.add("FAQ", &mut store).unwrap();
        }
        let store = JsonFileStore::open(&path);
        assert_eq!(RecentSearches::load(&store).terms(), ["FAQ", "Careers"]);
    }

    #[test]
    fn json_file_store_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "garbage").unwrap();
        let mut store = JsonFileStore::open(&path);
        assert!(store.get(CMS_CONTENT_KEY).is_none());
        store.set("k", "v".into()).unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get("k").as_deref(), Some("v"));
    }
}
