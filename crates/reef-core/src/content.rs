//! Section content payload: a keyed lookup fetched once from a well-known
//! path. A missing or malformed payload degrades to empty content; the
//! overlay simply renders nothing for sections it has no entry for.

use fnv::FnvHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Path the frontend fetches at startup.
pub const CONTENT_PATH: &str = "/data/portfolioContent.json";

#[derive(Debug, Error)]
#[error("content payload unreadable: {0}")]
pub struct ContentError(#[from] serde_json::Error);

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct SectionContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub list: Vec<String>,
}

/// All section content, keyed by section id.
#[derive(Clone, Debug, Default)]
pub struct ContentStore {
    entries: FnvHashMap<String, SectionContent>,
}

impl ContentStore {
    pub fn empty() -> ContentStore {
        ContentStore::default()
    }

    /// Parse the fetched payload.
    pub fn parse(body: &str) -> Result<ContentStore, ContentError> {
        let entries = serde_json::from_str::<FnvHashMap<String, SectionContent>>(body)?;
        Ok(ContentStore { entries })
    }

    /// Parse, degrading any failure to the empty store; missing content must
    /// never take the scene down.
    pub fn from_json(body: &str) -> ContentStore {
        match ContentStore::parse(body) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("{err}, sections will be empty");
                ContentStore::empty()
            }
        }
    }

    pub fn get(&self, section_id: &str) -> Option<&SectionContent> {
        self.entries.get(section_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
