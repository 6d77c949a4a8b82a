use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::qdrant::{
    self, Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointId,
    PointStruct, UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::{Qdrant, QdrantError};
use tracing::debug;
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{IndexError, IndexResult};
use crate::models::{
    CollectionInfo, CollectionSpec, DistanceMetric, FieldMatch, PointBatch, SectionPayload,
};
use crate::store::VectorStoreClient;

/// gRPC status codes the store reports for collection lifecycle conflicts
const GRPC_NOT_FOUND: i32 = 5;
const GRPC_ALREADY_EXISTS: i32 = 6;

/// Namespace for deriving point ids from free-form section ids
const SECTION_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a4e_93b7_4d0c_a51e_0b8d_27c4_f3a9);

/// Qdrant-backed implementation of VectorStoreClient
pub struct QdrantStore {
    client: Qdrant,
}

impl QdrantStore {
    pub fn new(config: QdrantConfig) -> IndexResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| IndexError::Config(format!("Failed to build Qdrant client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
            DistanceMetric::Manhattan => Distance::Manhattan,
        }
    }

    fn from_qdrant_distance(distance: Distance) -> Option<DistanceMetric> {
        match distance {
            Distance::Cosine => Some(DistanceMetric::Cosine),
            Distance::Euclid => Some(DistanceMetric::Euclidean),
            Distance::Dot => Some(DistanceMetric::DotProduct),
            Distance::Manhattan => Some(DistanceMetric::Manhattan),
            _ => None,
        }
    }

    fn payload_to_qdrant(payload: SectionPayload) -> HashMap<String, QdrantValue> {
        HashMap::from([
            ("content".to_string(), QdrantValue::from(payload.content)),
            ("category".to_string(), QdrantValue::from(payload.category)),
            ("sourcepage".to_string(), QdrantValue::from(payload.sourcepage)),
            ("sourcefile".to_string(), QdrantValue::from(payload.sourcefile)),
        ])
    }

    /// Size and distance of the collection's vectors, `None` when there is no
    /// vector config or the distance is not one we model
    fn extract_vector_params(
        config: &Option<qdrant::CollectionConfig>,
    ) -> Option<(u64, DistanceMetric)> {
        let params = config
            .as_ref()
            .and_then(|c| c.params.as_ref())
            .and_then(|p| p.vectors_config.as_ref())
            .and_then(|vc| vc.config.as_ref())?;

        let params = match params {
            qdrant::vectors_config::Config::Params(p) => p,
            // Named vectors: report the first one
            qdrant::vectors_config::Config::ParamsMap(map) => map.map.values().next()?,
        };

        Self::from_qdrant_distance(params.distance()).map(|distance| (params.size, distance))
    }
}

/// Map a section id onto a Qdrant point id.
///
/// Canonical hyphenated lowercase UUIDs and canonical unsigned integers are
/// used as-is. Any other string, including non-canonical spellings such as
/// `"042"` or an uppercase UUID, is hashed into a UUIDv5, so distinct section
/// ids never share a point and the same id always lands on the same point.
pub fn point_id_for(section_id: &str) -> PointId {
    if let Ok(uuid) = Uuid::parse_str(section_id) {
        if uuid.hyphenated().to_string() == section_id {
            return PointId::from(section_id.to_string());
        }
    }
    if let Ok(num) = section_id.parse::<u64>() {
        if num.to_string() == section_id {
            return PointId::from(num);
        }
    }
    PointId::from(Uuid::new_v5(&SECTION_ID_NAMESPACE, section_id.as_bytes()).to_string())
}

/// Classify a client error by its gRPC status code
fn classify(err: QdrantError, collection: &str) -> IndexError {
    if let QdrantError::ResponseError { status } = &err {
        match i32::from(status.code()) {
            GRPC_NOT_FOUND => return IndexError::CollectionNotFound(collection.to_string()),
            GRPC_ALREADY_EXISTS => return IndexError::CollectionExists(collection.to_string()),
            _ => {}
        }
    }
    IndexError::Transport(err.to_string())
}

#[async_trait]
impl VectorStoreClient for QdrantStore {
    async fn get_collection(&self, name: &str) -> IndexResult<CollectionInfo> {
        let info = self
            .client
            .collection_info(name)
            .await
            .map_err(|e| classify(e, name))?;

        let result = info
            .result
            .ok_or_else(|| IndexError::Internal("Collection info missing result".to_string()))?;

        let (vector_size, distance) =
            Self::extract_vector_params(&result.config).ok_or_else(|| {
                IndexError::Validation(format!(
                    "Collection \"{}\" has no supported vector configuration",
                    name
                ))
            })?;

        Ok(CollectionInfo {
            name: name.to_string(),
            vector_size,
            distance,
            points_count: result.points_count.unwrap_or(0),
        })
    }

    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> IndexResult<()> {
        let builder = CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
            spec.vector_size,
            Self::to_qdrant_distance(spec.distance),
        ));

        self.client
            .create_collection(builder)
            .await
            .map_err(|e| classify(e, name))?;

        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> IndexResult<()> {
        let response = self
            .client
            .delete_collection(name)
            .await
            .map_err(|e| classify(e, name))?;

        // Qdrant acknowledges deletes of unknown collections with `false`
        if !response.result {
            return Err(IndexError::CollectionNotFound(name.to_string()));
        }

        Ok(())
    }

    async fn upsert(&self, name: &str, batch: PointBatch, wait: bool) -> IndexResult<()> {
        let points: Vec<PointStruct> = batch
            .into_points()
            .map(|(id, vector, payload)| {
                PointStruct::new(point_id_for(&id), vector, Self::payload_to_qdrant(payload))
            })
            .collect();

        debug!(collection = name, points = points.len(), "Upserting points");

        self.client
            .upsert_points(UpsertPointsBuilder::new(name, points).wait(wait))
            .await
            .map_err(|e| classify(e, name))?;

        Ok(())
    }

    async fn delete_by_filter(
        &self,
        name: &str,
        filter: FieldMatch,
        wait: bool,
    ) -> IndexResult<()> {
        let builder = DeletePointsBuilder::new(name)
            .points(Filter::must([Condition::matches(
                filter.field.as_str(),
                filter.value,
            )]))
            .wait(wait);

        self.client
            .delete_points(builder)
            .await
            .map_err(|e| classify(e, name))?;

        Ok(())
    }
}
