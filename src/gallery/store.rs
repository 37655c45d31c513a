use std::{collections::HashMap, path::PathBuf};

use crate::{
    assets::store::ImageRef,
    foundation::error::{StudioError, StudioResult},
    gallery::records::{CategoryMap, GalleryItem, base_categories},
    session::model::{
        Gender, GarmentKind, ModelDimensions, ModelKind, ModelSelection, StudioSession,
    },
};

/// Minimal persistence seam the gallery sits on. Values are opaque strings
/// (JSON documents in practice) keyed by namespaced string keys.
pub trait KeyValueStore {
    /// Fetch the value at `key`, or `None` when absent.
    fn get(&self, key: &str) -> StudioResult<Option<String>>;
    /// Write `value` at `key`, replacing any existing value.
    fn set(&mut self, key: &str, value: &str) -> StudioResult<()>;
    /// Remove the value at `key`. Removing an absent key succeeds.
    fn delete(&mut self, key: &str) -> StudioResult<()>;
}

/// In-memory backend, used in tests and for ephemeral sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StudioResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StudioResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StudioResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-per-key backend under one directory. Keys are sanitized into file
/// names; values are written whole, so a partial read never observes a torn
/// record within one key.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) the backing directory.
    pub fn open(dir: impl Into<PathBuf>) -> StudioResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StudioError::persistence(format!("create '{}': {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StudioResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StudioError::persistence(format!(
                "read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StudioResult<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| StudioError::persistence(format!("write '{}': {e}", path.display())))
    }

    fn delete(&mut self, key: &str) -> StudioResult<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StudioError::persistence(format!(
                "delete '{}': {e}",
                path.display()
            ))),
        }
    }
}

/// A user's uploaded body model photo, kept separate from the gallery.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UploadedModel {
    /// Gender the uploaded photo should be treated as.
    pub gender: Gender,
    /// The uploaded photo's image source.
    pub image: ImageRef,
}

/// The studio state snapshot restored on the next visit: which model was
/// active, the slider dimensions, and the background color. Garment
/// assignments are deliberately not part of it; a fresh visit starts with an
/// empty outfit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LastStudioState {
    /// Whether the active model was a catalog model or an upload.
    pub kind: ModelKind,
    /// Gender of the active model.
    pub gender: Gender,
    /// The slider dimensions at save time.
    pub dimensions: ModelDimensions,
    /// The background color at save time.
    pub background_color: String,
}

const LAST_STATE_KEY: &str = "studio:last_state";

/// Typed persistence layer over a [`KeyValueStore`] backend.
///
/// Per-user collections (gallery, categories, uploaded model) key on the
/// lowercased user id, so lookups are case-insensitive the way sign-in is.
#[derive(Clone, Debug)]
pub struct StudioStore<S> {
    backend: S,
}

impl<S: KeyValueStore> StudioStore<S> {
    /// Wrap a backend in the typed store.
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    fn gallery_key(user_id: &str) -> String {
        format!("gallery:{}", user_id.to_lowercase())
    }

    fn categories_key(user_id: &str) -> String {
        format!("categories:{}", user_id.to_lowercase())
    }

    fn uploaded_model_key(user_id: &str) -> String {
        format!("uploaded_model:{}", user_id.to_lowercase())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> StudioResult<Option<T>> {
        match self.backend.get(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StudioError::persistence(format!("corrupt record at '{key}': {e}"))),
        }
    }

    fn write_json<T: serde::Serialize>(&mut self, key: &str, value: &T) -> StudioResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StudioError::persistence(format!("encode record for '{key}': {e}")))?;
        self.backend.set(key, &raw)
    }

    /// The user's gallery in insertion order. An absent record is an empty
    /// gallery, not an error.
    pub fn gallery(&self, user_id: &str) -> StudioResult<Vec<GalleryItem>> {
        Ok(self
            .read_json(&Self::gallery_key(user_id))?
            .unwrap_or_default())
    }

    /// Append an item to the user's gallery. Fails with
    /// [`StudioError::Duplicate`] when an item with the same id is already
    /// stored; the existing record is left untouched.
    pub fn add_gallery_item(&mut self, user_id: &str, item: GalleryItem) -> StudioResult<()> {
        let mut items = self.gallery(user_id)?;
        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(StudioError::duplicate(item.id().to_string()));
        }
        items.push(item);
        self.write_json(&Self::gallery_key(user_id), &items)
    }

    /// Delete the gallery item with `id`. Deleting an id that is not present
    /// succeeds without changing anything.
    #[tracing::instrument(skip(self))]
    pub fn remove_gallery_item(&mut self, user_id: &str, id: &str) -> StudioResult<()> {
        let mut items = self.gallery(user_id)?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            tracing::debug!(id, "gallery item already absent");
            return Ok(());
        }
        self.write_json(&Self::gallery_key(user_id), &items)
    }

    /// The effective category map: base categories overlaid with the user's
    /// custom ones. Base names always win.
    pub fn categories(&self, user_id: &str) -> StudioResult<CategoryMap> {
        let mut merged: CategoryMap = self
            .read_json(&Self::categories_key(user_id))?
            .unwrap_or_default();
        merged.extend(base_categories());
        Ok(merged)
    }

    /// Register a custom category mapping a name to the slot kind its
    /// garments occupy. Rejects empty names and names already taken.
    pub fn add_category(
        &mut self,
        user_id: &str,
        name: &str,
        kind: GarmentKind,
    ) -> StudioResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StudioError::validation("category name must be non-empty"));
        }
        if self.categories(user_id)?.contains_key(name) {
            return Err(StudioError::duplicate(format!(
                "category '{name}' already exists"
            )));
        }
        let mut custom: CategoryMap = self
            .read_json(&Self::categories_key(user_id))?
            .unwrap_or_default();
        custom.insert(name.to_string(), kind);
        self.write_json(&Self::categories_key(user_id), &custom)
    }

    /// The user's uploaded model photo, if one is stored.
    pub fn uploaded_model(&self, user_id: &str) -> StudioResult<Option<UploadedModel>> {
        self.read_json(&Self::uploaded_model_key(user_id))
    }

    /// Store (or replace) the user's uploaded model photo.
    pub fn set_uploaded_model(&mut self, user_id: &str, model: &UploadedModel) -> StudioResult<()> {
        self.write_json(&Self::uploaded_model_key(user_id), model)
    }

    /// Delete the user's uploaded model. When the session currently shows the
    /// uploaded model, it falls back to the default female model.
    pub fn remove_uploaded_model(
        &mut self,
        user_id: &str,
        session: &mut StudioSession,
    ) -> StudioResult<()> {
        self.backend.delete(&Self::uploaded_model_key(user_id))?;
        if session.model().kind == ModelKind::Uploaded {
            session.select_model(ModelSelection::default_female());
        }
        Ok(())
    }

    /// The persisted last studio state, if any.
    pub fn last_studio_state(&self) -> StudioResult<Option<LastStudioState>> {
        self.read_json(LAST_STATE_KEY)
    }

    /// Record the session's model choice, dimensions, and background so the
    /// next visit can restore them.
    pub fn persist_session_state(&mut self, session: &StudioSession) -> StudioResult<()> {
        let state = LastStudioState {
            kind: session.model().kind,
            gender: session.model().gender,
            dimensions: session.dimensions(),
            background_color: session.background_color().to_string(),
        };
        self.write_json(LAST_STATE_KEY, &state)
    }

    /// Build a session from the persisted last state, or a fresh default
    /// female session when nothing was saved. A stale `Uploaded` state whose
    /// model photo has since been removed degrades to the default model of
    /// the recorded gender.
    #[tracing::instrument(skip(self))]
    pub fn restore_session(&self, user_id: &str) -> StudioResult<StudioSession> {
        let Some(state) = self.last_studio_state()? else {
            return Ok(StudioSession::new(ModelSelection::default_female()));
        };

        let model = match state.kind {
            ModelKind::Uploaded => match self.uploaded_model(user_id)? {
                Some(uploaded) => ModelSelection::uploaded(uploaded.gender, uploaded.image),
                None => default_for(state.gender),
            },
            ModelKind::Default => default_for(state.gender),
        };

        let mut session = StudioSession::new(model);
        session.set_dimensions(state.dimensions);
        session.set_background_color(state.background_color);
        Ok(session)
    }
}

fn default_for(gender: Gender) -> ModelSelection {
    match gender {
        Gender::Female => ModelSelection::default_female(),
        Gender::Male => ModelSelection::default_male(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/store.rs"]
mod tests;
