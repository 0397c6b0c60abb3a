use std::collections::BTreeSet;
use std::fmt;

use crate::foundation::error::{WeaveError, WeaveResult};

/// Stable identity of a gallery item, independent of its position in any array.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemKey(pub String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON-facing description of one item.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GalleryItemDef {
    /// Defaults to the title.
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tag: String,
    /// Raster image path; empty or missing means "no image".
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// One validated narrative item.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct GalleryItem {
    pub key: ItemKey,
    pub title: String,
    pub category: String,
    pub tag: String,
    pub image: Option<String>,
    pub description: String,
    pub index: usize,
}

impl GalleryItem {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Two-digit badge label (`01`, `02`, ...).
    pub fn marker_label(&self) -> String {
        format!("{:02}", self.index + 1)
    }

    /// Odd items mirror the image/text columns.
    pub fn is_reversed(&self) -> bool {
        self.index % 2 == 1
    }
}

/// Keys beginning with this are used for page-level textures, never for items.
pub const RESERVED_KEY_PREFIX: char = '@';

/// Immutable ordered list of items.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Gallery {
    items: Vec<GalleryItem>,
}

impl Gallery {
    pub fn from_defs(defs: &[GalleryItemDef]) -> WeaveResult<Self> {
        let mut seen = BTreeSet::new();
        let mut items = Vec::with_capacity(defs.len());
        for (index, def) in defs.iter().enumerate() {
            let key = def
                .key
                .clone()
                .unwrap_or_else(|| def.title.clone())
                .trim()
                .to_owned();
            if key.is_empty() {
                return Err(WeaveError::validation(format!(
                    "gallery item {index} needs a non-empty key or title"
                )));
            }
            if key.starts_with(RESERVED_KEY_PREFIX) {
                return Err(WeaveError::validation(format!(
                    "gallery item key '{key}' uses the reserved '{RESERVED_KEY_PREFIX}' prefix"
                )));
            }
            if !seen.insert(key.clone()) {
                return Err(WeaveError::validation(format!(
                    "duplicate gallery item key '{key}'"
                )));
            }
            let image = match def.image.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(path) => Some(normalize_asset_path(path)?),
            };
            items.push(GalleryItem {
                key: ItemKey(key),
                title: def.title.clone(),
                category: def.category.clone(),
                tag: def.tag.clone(),
                image,
                description: def.description.clone(),
                index,
            });
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &ItemKey) -> Option<&GalleryItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// `true` when at least one item references an image.
    pub fn has_images(&self) -> bool {
        self.items.iter().any(GalleryItem::has_image)
    }
}

/// Normalize a site-relative asset path.
///
/// Uses `/` separators, drops a leading `/` (site root) and `.` segments, and rejects parent
/// traversals (`..`).
pub fn normalize_asset_path(source: &str) -> WeaveResult<String> {
    let s = source.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(WeaveError::validation(format!(
                "asset path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }
    if out.is_empty() {
        return Err(WeaveError::validation(format!(
            "asset path '{source}' must contain a file name"
        )));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/item.rs"]
mod tests;
