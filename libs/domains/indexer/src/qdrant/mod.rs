mod client;
mod config;

pub use client::{QdrantStore, point_id_for};
pub use config::QdrantConfig;
