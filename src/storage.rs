//! Highscore persistence.
//!
//! The game keeps exactly one durable value: the best score, stored as a decimal
//! string under a fixed key. `LocalStorage` backs it in the browser and
//! `MemoryStore` everywhere else.

use std::collections::HashMap;

use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url, window};

use crate::error::{GameError, Result};

/// Durable string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store for native builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
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

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`.
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// None when the page has no storage (e.g. disabled by privacy settings).
    pub fn open() -> Option<Self> {
        let win = window()?;
        let inner = win.local_storage().ok().flatten()?;
        Some(Self { inner })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| GameError::Storage(format!("{e:?}")))
    }
}

/// Notified after a new highscore has been written.
pub trait HighscoreObserver {
    fn on_highscore(&mut self, score: u32);
}

/// Highscore record on top of any [`KeyValueStore`].
pub struct HighscoreStore<S: KeyValueStore> {
    store: S,
    key: String,
    observers: Vec<Box<dyn HighscoreObserver>>,
}

impl<S: KeyValueStore> HighscoreStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn HighscoreObserver>) {
        self.observers.push(observer);
    }

    /// Stored highscore, or 0 when absent or unparseable.
    pub fn load(&self) -> u32 {
        self.store
            .get(&self.key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Persist `score` if it beats the stored value. Returns whether it was written.
    pub fn record(&mut self, score: u32) -> bool {
        let stored = self.store.get(&self.key).and_then(|v| v.trim().parse::<u32>().ok());
        if stored.is_some_and(|s| score <= s) {
            return false;
        }
        if let Err(e) = self.store.set(&self.key, &score.to_string()) {
            warn!("failed to persist highscore {score}: {e}");
            return false;
        }
        debug!("highscore {score} saved under '{}'", self.key);
        for obs in &mut self.observers {
            obs.on_highscore(score);
        }
        true
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

pub const HIGHSCORE_FILE_NAME: &str = "highscore.txt";

/// Plain-text body of the downloadable highscore file.
pub fn highscore_file_contents(score: u32) -> String {
    format!("Highscore: {score}")
}

/// Offers "highscore.txt" as a browser download on every new highscore.
pub struct DownloadHighscore;

/// Anchor pointing at a fresh `text/plain` object URL holding the highscore file.
/// The caller revokes the returned URL once the anchor has been used.
pub(crate) fn download_anchor(doc: &Document, score: u32) -> Result<(HtmlAnchorElement, String)> {
    let parts = js_sys::Array::of1(&JsValue::from_str(&highscore_file_contents(score)));
    let opts = BlobPropertyBag::new();
    opts.set_type("text/plain");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = doc
        .create_element("a")?
        .dyn_into()
        .map_err(|_| GameError::Dom("created <a> is not an HtmlAnchorElement".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(HIGHSCORE_FILE_NAME);
    Ok((anchor, url))
}

impl DownloadHighscore {
    fn trigger(score: u32) -> Result<()> {
        let doc = window()
            .ok_or(GameError::NoWindow)?
            .document()
            .ok_or(GameError::NoDocument)?;
        let (anchor, url) = download_anchor(&doc, score)?;
        anchor.click();
        Url::revoke_object_url(&url)?;
        Ok(())
    }
}

impl HighscoreObserver for DownloadHighscore {
    fn on_highscore(&mut self, score: u32) {
        if let Err(e) = Self::trigger(score) {
            warn!("highscore download failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Spy(Rc<RefCell<Vec<u32>>>);

    impl HighscoreObserver for Spy {
        fn on_highscore(&mut self, score: u32) {
            self.0.borrow_mut().push(score);
        }
    }

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(GameError::Storage("quota exceeded".to_string()))
        }
    }

    #[test]
    fn load_defaults_to_zero() {
        let hs = HighscoreStore::new(MemoryStore::new(), "highscore");
        assert_eq!(hs.load(), 0);
    }

    #[test]
    fn load_ignores_garbage() {
        let mut mem = MemoryStore::new();
        mem.set("highscore", "lots").unwrap();
        let hs = HighscoreStore::new(mem, "highscore");
        assert_eq!(hs.load(), 0);
    }

    #[test]
    fn record_only_writes_improvements() {
        let mut hs = HighscoreStore::new(MemoryStore::new(), "highscore");
        assert!(hs.record(5));
        assert!(!hs.record(5));
        assert!(!hs.record(3));
        assert!(hs.record(6));
        assert_eq!(hs.load(), 6);
    }

    #[test]
    fn record_overwrites_unparseable_value() {
        let mut mem = MemoryStore::new();
        mem.set("highscore", "NaN").unwrap();
        let mut hs = HighscoreStore::new(mem, "highscore");
        assert!(hs.record(1));
        assert_eq!(hs.load(), 1);
    }

    #[test]
    fn observers_see_only_written_scores() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hs = HighscoreStore::new(MemoryStore::new(), "highscore");
        hs.add_observer(Box::new(Spy(seen.clone())));
        hs.record(2);
        hs.record(1);
        hs.record(4);
        assert_eq!(*seen.borrow(), vec![2, 4]);
    }

    #[test]
    fn failed_write_is_swallowed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut hs = HighscoreStore::new(ReadOnly, "highscore");
        hs.add_observer(Box::new(Spy(seen.clone())));
        assert!(!hs.record(10));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn download_body() {
        assert_eq!(highscore_file_contents(42), "Highscore: 42");
        assert_eq!(HIGHSCORE_FILE_NAME, "highscore.txt");
    }
}
