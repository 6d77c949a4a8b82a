//! In-memory vector store
//!
//! A [`VectorStoreClient`] kept in process memory, for development and tests.
//! It follows the same contract as the Qdrant adapter: unknown collections are
//! `CollectionNotFound`, duplicate creates are `CollectionExists`, upserts
//! overwrite by id. Nothing is persisted.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::{IndexError, IndexResult};
use crate::models::{CollectionInfo, CollectionSpec, FieldMatch, PointBatch, SectionPayload};
use crate::store::VectorStoreClient;

/// A stored point
#[derive(Debug, Clone, PartialEq)]
pub struct StoredPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: SectionPayload,
}

#[derive(Debug)]
struct MemoryCollection {
    spec: CollectionSpec,
    points: BTreeMap<String, StoredPoint>,
}

/// In-memory vector store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<DashMap<String, MemoryCollection>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.collections.iter().map(|c| c.key().clone()).collect();
        names.sort();
        names
    }

    /// Every point in a collection, ordered by id
    pub fn points(&self, name: &str) -> IndexResult<Vec<StoredPoint>> {
        let collection = self
            .collections
            .get(name)
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))?;

        Ok(collection.points.values().cloned().collect())
    }
}

#[async_trait]
impl VectorStoreClient for InMemoryStore {
    async fn get_collection(&self, name: &str) -> IndexResult<CollectionInfo> {
        let collection = self
            .collections
            .get(name)
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))?;

        Ok(CollectionInfo {
            name: name.to_string(),
            vector_size: collection.spec.vector_size,
            distance: collection.spec.distance,
            points_count: collection.points.len() as u64,
        })
    }

    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> IndexResult<()> {
        match self.collections.entry(name.to_string()) {
            Entry::Occupied(_) => Err(IndexError::CollectionExists(name.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(MemoryCollection {
                    spec,
                    points: BTreeMap::new(),
                });
                Ok(())
            }
        }
    }

    async fn delete_collection(&self, name: &str) -> IndexResult<()> {
        self.collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))
    }

    async fn upsert(&self, name: &str, batch: PointBatch, _wait: bool) -> IndexResult<()> {
        let mut collection = self
            .collections
            .get_mut(name)
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))?;

        let size = collection.spec.vector_size;
        if let Some(bad) = batch.vectors().iter().find(|v| v.len() as u64 != size) {
            return Err(IndexError::Validation(format!(
                "Vector dimension {} does not match collection '{}' size {}",
                bad.len(),
                name,
                size
            )));
        }

        for (id, vector, payload) in batch.into_points() {
            collection.points.insert(
                id.clone(),
                StoredPoint {
                    id,
                    vector,
                    payload,
                },
            );
        }

        Ok(())
    }

    async fn delete_by_filter(
        &self,
        name: &str,
        filter: FieldMatch,
        _wait: bool,
    ) -> IndexResult<()> {
        let mut collection = self
            .collections
            .get_mut(name)
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))?;

        collection
            .points
            .retain(|_, point| !filter.matches(&point.payload));

        Ok(())
    }
}
