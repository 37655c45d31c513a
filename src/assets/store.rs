use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode as assets_decode,
    foundation::error::{StudioError, StudioResult},
    foundation::math::Fnv1a64,
};

/// Reference to an image source consumed by the preview and the compositor.
///
/// `Path` references are resolved relative to the store root at prepare time;
/// `Inline` carries the encoded bytes directly (uploaded models and garments).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    /// Relative path under the asset root.
    Path(String),
    /// Encoded image bytes held inline.
    Inline(Vec<u8>),
}

impl ImageRef {
    /// Stable identity key used to index prepared images.
    pub fn key(&self) -> StudioResult<String> {
        match self {
            Self::Path(p) => Ok(format!("path:{}", normalize_rel_path(p)?)),
            Self::Inline(bytes) => {
                let mut hasher = Fnv1a64::new_default();
                hasher.write_bytes(bytes);
                Ok(format!("inline:{:016x}", hasher.finish()))
            }
        }
    }
}

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Immutable store of decoded images keyed by [`ImageRef`] identity.
///
/// All IO and decoding is front-loaded here so the compositor stays
/// deterministic and IO-free, and so a failed decode aborts the whole
/// operation before any drawing happens.
pub struct PreparedImageStore {
    root: PathBuf,
    images_by_key: HashMap<String, PreparedImage>,
}

impl PreparedImageStore {
    /// Read and decode every referenced image, resolving relative paths
    /// against `root`. Fails atomically on the first unreadable or
    /// undecodable source.
    #[tracing::instrument(skip(refs), fields(root = %root.as_ref().display()))]
    pub fn prepare<'a>(
        refs: impl IntoIterator<Item = &'a ImageRef>,
        root: impl AsRef<Path> + std::fmt::Debug,
    ) -> StudioResult<Self> {
        let root = root.as_ref().to_path_buf();
        let mut out = Self {
            root,
            images_by_key: HashMap::new(),
        };

        for image_ref in refs {
            let key = image_ref.key()?;
            if out.images_by_key.contains_key(&key) {
                continue;
            }
            let bytes = match image_ref {
                ImageRef::Path(p) => out.read_bytes(&normalize_rel_path(p)?)?,
                ImageRef::Inline(bytes) => bytes.clone(),
            };
            let prepared = assets_decode::decode_image(&bytes)?;
            tracing::debug!(key, width = prepared.width, height = prepared.height, "prepared image");
            out.images_by_key.insert(key, prepared);
        }

        Ok(out)
    }

    /// Return root directory used when resolving relative image paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lookup a prepared image by its source reference.
    pub fn get(&self, image_ref: &ImageRef) -> StudioResult<&PreparedImage> {
        let key = image_ref.key()?;
        self.images_by_key
            .get(&key)
            .ok_or_else(|| StudioError::validation(format!("unprepared image '{key}'")))
    }

    fn read_bytes(&self, norm_path: &str) -> StudioResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .map_err(|e| StudioError::decode(format!("read image bytes from '{}': {e}", path.display())))
    }
}

/// Normalize and validate store-relative image paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> StudioResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(StudioError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(StudioError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(StudioError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(StudioError::validation("image path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
