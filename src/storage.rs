//! # Object Storage
//!
//! The upload handler writes through the [`ObjectStore`] trait. In the worker
//! the implementation is [`R2Store`], a thin wrapper over the bound R2 bucket.
//!
//! Each upload is a single `put` under a fresh key. Nothing here retries, and
//! nothing ever mutates or deletes an object once written.

use async_trait::async_trait;
use worker::{Bucket, Env, HttpMetadata};

use crate::errors::{AppError, AppResult};
use crate::models::ObjectMetadata;

/// A key/value blob store with public read access handled elsewhere.
#[async_trait(?Send)]
pub trait ObjectStore {
    /// Writes `bytes` under `key`. Called at most once per upload.
    async fn put(&self, key: &str, bytes: Vec<u8>, metadata: &ObjectMetadata) -> AppResult<()>;
}

/// R2 bucket binding.
pub struct R2Store {
    bucket: Bucket,
}

impl R2Store {
    pub fn new(bucket: Bucket) -> Self {
        Self { bucket }
    }

    /// Resolves the bucket binding by name.
    pub fn from_env(env: &Env, binding: &str) -> AppResult<Self> {
        let bucket = env.bucket(binding).map_err(|e| AppError::Unexpected {
            message: format!("Failed to access R2 bucket {}: {}", binding, e),
        })?;
        Ok(Self::new(bucket))
    }
}

#[async_trait(?Send)]
impl ObjectStore for R2Store {
    async fn put(&self, key: &str, bytes: Vec<u8>, metadata: &ObjectMetadata) -> AppResult<()> {
        self.bucket
            .put(key, bytes)
            .http_metadata(HttpMetadata {
                content_type: Some(metadata.content_type.clone()),
                cache_control: Some(metadata.cache_control.clone()),
                ..Default::default()
            })
            .execute()
            .await
            .map_err(|e| AppError::Storage {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// A recorded `put` call.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PutCall {
        pub key: String,
        pub bytes: Vec<u8>,
        pub metadata: ObjectMetadata,
    }

    /// In-memory store that records writes and can be told to fail.
    #[derive(Default)]
    pub struct MemoryStore {
        pub puts: RefCell<Vec<PutCall>>,
        pub fail_with: Option<String>,
    }

    impl MemoryStore {
        pub fn failing(message: &str) -> Self {
            Self {
                puts: RefCell::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ObjectStore for MemoryStore {
        async fn put(&self, key: &str, bytes: Vec<u8>, metadata: &ObjectMetadata) -> AppResult<()> {
            self.puts.borrow_mut().push(PutCall {
                key: key.to_string(),
                bytes,
                metadata: metadata.clone(),
            });
            match &self.fail_with {
                Some(message) => Err(AppError::Storage {
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }
}
