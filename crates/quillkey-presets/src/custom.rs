//! Custom char-map transformations
//!
//! User-defined substitution maps live under per-id keys plus an index
//! document listing the ids, so no single stored item outgrows the host
//! store's per-item size limit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use quillkey_storage::{get_doc, set_doc, KeyValueStore};

use crate::error::PresetError;

const INDEX_KEY: &str = "custom_transform_index";
const ITEM_PREFIX: &str = "custom_transform_";

/// Upper bound on stored custom transformations
pub const MAX_CUSTOM_TRANSFORMS: usize = 20;

fn item_key(id: &str) -> String {
    format!("{}{}", ITEM_PREFIX, id)
}

/// A user-defined character substitution map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTransform {
    pub id: String,
    pub name: String,
    /// Characters absent from the map pass through unchanged
    pub char_map: HashMap<char, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TransformIndex {
    ids: Vec<String>,
}

/// CRUD service over the sharded custom-transform storage
pub struct CustomTransformService {
    store: Arc<dyn KeyValueStore>,
}

impl CustomTransformService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        CustomTransformService { store }
    }

    fn index(&self) -> Result<TransformIndex, PresetError> {
        Ok(get_doc::<TransformIndex>(self.store.as_ref(), INDEX_KEY)?.unwrap_or_default())
    }

    /// All stored transformations, in index order
    pub fn list(&self) -> Result<Vec<CustomTransform>, PresetError> {
        let index = self.index()?;
        let mut transforms = Vec::with_capacity(index.ids.len());
        for id in &index.ids {
            if let Some(transform) =
                get_doc::<CustomTransform>(self.store.as_ref(), &item_key(id))?
            {
                transforms.push(transform);
            }
        }
        Ok(transforms)
    }

    /// Resolve a transformation by id; a stale reference is `TransformNotFound`
    pub fn get(&self, id: &str) -> Result<CustomTransform, PresetError> {
        get_doc::<CustomTransform>(self.store.as_ref(), &item_key(id))?
            .ok_or_else(|| PresetError::TransformNotFound(id.to_string()))
    }

    /// Create a new transformation, enforcing the storage cap
    pub fn create(
        &self,
        name: impl Into<String>,
        char_map: HashMap<char, String>,
    ) -> Result<CustomTransform, PresetError> {
        let mut index = self.index()?;
        if index.ids.len() >= MAX_CUSTOM_TRANSFORMS {
            return Err(PresetError::TransformLimitReached(MAX_CUSTOM_TRANSFORMS));
        }

        let now = Utc::now();
        let transform = CustomTransform {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            char_map,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %transform.id, name = %transform.name, "creating custom transform");
        index.ids.push(transform.id.clone());
        set_doc(self.store.as_ref(), &item_key(&transform.id), &transform)?;
        set_doc(self.store.as_ref(), INDEX_KEY, &index)?;
        Ok(transform)
    }

    /// Update name and/or map of an existing transformation
    pub fn update(
        &self,
        id: &str,
        name: Option<String>,
        char_map: Option<HashMap<char, String>>,
    ) -> Result<CustomTransform, PresetError> {
        let mut transform = self.get(id)?;
        if let Some(name) = name {
            transform.name = name;
        }
        if let Some(char_map) = char_map {
            transform.char_map = char_map;
        }
        transform.updated_at = Utc::now();
        set_doc(self.store.as_ref(), &item_key(id), &transform)?;
        Ok(transform)
    }

    /// Delete a transformation; deleting an unknown id is `TransformNotFound`
    pub fn delete(&self, id: &str) -> Result<(), PresetError> {
        let mut index = self.index()?;
        let position = index
            .ids
            .iter()
            .position(|existing| existing == id)
            .ok_or_else(|| PresetError::TransformNotFound(id.to_string()))?;

        index.ids.remove(position);
        set_doc(self.store.as_ref(), INDEX_KEY, &index)?;
        self.store.remove(&item_key(id))?;
        Ok(())
    }
}
