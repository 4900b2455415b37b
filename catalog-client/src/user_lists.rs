use crate::error::{Error, Result};
use crate::movie::Movie;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use strum_macros::{Display, EnumIter};

pub const FAVORITES_KEY: &str = "filmflix_favorites";
pub const WATCHLIST_KEY: &str = "filmflix_watchlist";

/// String-keyed store the lists are persisted in.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk. The whole file is rewritten
/// on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens `path`, treating a missing file as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };
        log::debug!("Opened list store at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Storage("list store lock poisoned".to_string()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock()?;
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&updated)?)?;
        *entries = updated;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ListKind {
    Favorites,
    Watchlist,
}

impl ListKind {
    pub fn storage_key(self) -> &'static str {
        match self {
            ListKind::Favorites => FAVORITES_KEY,
            ListKind::Watchlist => WATCHLIST_KEY,
        }
    }

    /// Catalog positions seeded into a list on first run.
    fn seed_range(self) -> std::ops::Range<usize> {
        match self {
            ListKind::Favorites => 0..3,
            ListKind::Watchlist => 5..10,
        }
    }
}

/// Insertion-ordered set of movie ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList {
    ids: Vec<u32>,
}

impl IdList {
    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut list = Self::default();
        for id in ids {
            if !list.contains(id) {
                list.ids.push(id);
            }
        }
        list
    }

    /// Adds `id` if absent, removes it if present. Returns whether the id is
    /// in the list afterwards.
    pub fn toggle(&mut self, id: u32) -> bool {
        if let Some(pos) = self.ids.iter().position(|&existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn decode(raw: &str) -> Result<Self> {
        let ids: Vec<u32> = serde_json::from_str(raw)?;
        Ok(Self::from_ids(ids))
    }

    fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.ids)?)
    }
}

struct StoredList {
    list: IdList,
    // Set when nothing was stored at load time; cleared once seeded.
    unseeded: bool,
}

/// Favorites and watch-later lists, persisted through a [`KeyValueStore`].
pub struct UserLists<S: KeyValueStore> {
    store: S,
    favorites: StoredList,
    watchlist: StoredList,
}

impl<S: KeyValueStore> UserLists<S> {
    pub fn load(store: S) -> Result<Self> {
        let favorites = Self::read(&store, ListKind::Favorites)?;
        let watchlist = Self::read(&store, ListKind::Watchlist)?;
        Ok(Self {
            store,
            favorites,
            watchlist,
        })
    }

    fn read(store: &S, kind: ListKind) -> Result<StoredList> {
        match store.get(kind.storage_key())? {
            Some(raw) => Ok(StoredList {
                list: IdList::decode(&raw)?,
                unseeded: false,
            }),
            None => Ok(StoredList {
                list: IdList::default(),
                unseeded: true,
            }),
        }
    }

    fn stored(&self, kind: ListKind) -> &StoredList {
        match kind {
            ListKind::Favorites => &self.favorites,
            ListKind::Watchlist => &self.watchlist,
        }
    }

    fn stored_mut(&mut self, kind: ListKind) -> &mut StoredList {
        match kind {
            ListKind::Favorites => &mut self.favorites,
            ListKind::Watchlist => &mut self.watchlist,
        }
    }

    /// Writes `list` to the store and only then makes it the current list.
    fn commit(&mut self, kind: ListKind, list: IdList) -> Result<()> {
        self.store.set(kind.storage_key(), &list.encode()?)?;
        let stored = self.stored_mut(kind);
        stored.list = list;
        stored.unseeded = false;
        Ok(())
    }

    /// Fills lists that had nothing stored with a demo selection taken from
    /// the first listing: favorites get positions 0..3, the watchlist gets
    /// positions 5..10. Lists that were already stored are left untouched.
    pub fn seed_defaults(&mut self, movies: &[Movie]) -> Result<()> {
        if movies.is_empty() {
            return Ok(());
        }

        for kind in [ListKind::Favorites, ListKind::Watchlist] {
            if !self.stored(kind).unseeded {
                continue;
            }
            let ids = movies
                .iter()
                .skip(kind.seed_range().start)
                .take(kind.seed_range().len())
                .map(|movie| movie.id);
            self.commit(kind, IdList::from_ids(ids))?;
            log::info!("Seeded {} with {} movies", kind, self.list(kind).len());
        }
        Ok(())
    }

    pub fn toggle(&mut self, kind: ListKind, id: u32) -> Result<bool> {
        let mut list = self.list(kind).clone();
        let present = list.toggle(id);
        self.commit(kind, list)?;
        log::debug!(
            "{} movie {} {} {}",
            if present { "Added" } else { "Removed" },
            id,
            if present { "to" } else { "from" },
            kind
        );
        Ok(present)
    }

    pub fn list(&self, kind: ListKind) -> &IdList {
        &self.stored(kind).list
    }

    pub fn contains(&self, kind: ListKind, id: u32) -> bool {
        self.list(kind).contains(id)
    }

    /// Movies from `movies` that are on the list, in catalog order.
    pub fn movies_in<'a>(&self, kind: ListKind, movies: &'a [Movie]) -> Vec<&'a Movie> {
        let list = self.list(kind);
        movies.iter().filter(|movie| list.contains(movie.id)).collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
