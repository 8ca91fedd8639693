// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Region lookup table - integer region code to anatomical acronym.

Atlas tables ship as XML documents of the form

```xml
<atlas>
  <data>
    <label><index>7001</index><name>Caudate_L</name></label>
    ...
  </data>
</atlas>
```

Indices are strings in the document and integers everywhere else. Index
text is trimmed before parsing; `<name>` text is stored as given.
*/

use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{AtlasError, AtlasResult};

/// Region code reserved for background / non-brain tissue
pub const BACKGROUND_CODE: i32 = 0;

#[derive(Debug, Deserialize)]
struct AtlasDocument {
    data: LabelData,
}

#[derive(Debug, Default, Deserialize)]
struct LabelData {
    #[serde(rename = "label", default)]
    labels: Vec<LabelEntry>,
}

#[derive(Debug, Deserialize)]
struct LabelEntry {
    index: String,
    #[serde(default)]
    name: String,
}

/// Immutable mapping from region code to acronym.
///
/// Code [`BACKGROUND_CODE`] is always present; it resolves to `""` unless the
/// atlas defines its own name for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLut {
    names: AHashMap<i32, String>,
}

impl LabelLut {
    /// Build a table from `(code, acronym)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        let mut names: AHashMap<i32, String> = entries
            .into_iter()
            .map(|(code, name)| (code, name.into()))
            .collect();
        names.entry(BACKGROUND_CODE).or_default();
        LabelLut { names }
    }

    /// Parse an atlas XML document.
    ///
    /// # Errors
    ///
    /// Returns `AtlasError::LutParse` if the document is malformed or an
    /// `<index>` is not an integer.
    pub fn from_xml_str(xml: &str) -> AtlasResult<Self> {
        let document: AtlasDocument = quick_xml::de::from_str(xml)?;

        let mut names = AHashMap::with_capacity(document.data.labels.len() + 1);
        for entry in document.data.labels {
            let index = entry.index.trim();
            let code: i32 = index.parse().map_err(|_| {
                AtlasError::LutParse(format!("label index '{}' is not an integer", index))
            })?;
            if let Some(previous) = names.insert(code, entry.name) {
                warn!(code, previous = %previous, "Duplicate label index in atlas table, keeping the last entry");
            }
        }
        if !names.contains_key(&BACKGROUND_CODE) {
            debug!("Atlas table has no entry for code 0, defaulting it to an empty acronym");
            names.insert(BACKGROUND_CODE, String::new());
        }

        Ok(LabelLut { names })
    }

    /// Read and parse an atlas XML file.
    pub fn from_xml_file(path: &Path) -> AtlasResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AtlasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_xml_str(&content)
    }

    /// Acronym for `code`, if the table defines it.
    pub fn acronym(&self, code: i32) -> Option<&str> {
        self.names.get(&code).map(String::as_str)
    }

    pub fn contains(&self, code: i32) -> bool {
        self.names.contains_key(&code)
    }

    /// Number of entries, including the background entry.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All codes in ascending order.
    pub fn codes(&self) -> Vec<i32> {
        let mut codes: Vec<i32> = self.names.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Reverse lookup, exact and case-sensitive.
    pub fn code_of(&self, acronym: &str) -> Option<i32> {
        self.names
            .iter()
            .filter(|(_, name)| name.as_str() == acronym)
            .map(|(code, _)| *code)
            .min()
    }
}
