//! # Upload Handler
//!
//! `POST /api/upload` accepts a multipart body with a `file` field, stores it
//! in R2 under `<uuid>-<file name>` and answers with the public URL.
//!
//! ## Flow
//!
//! ```text
//! authorize (x-api-key, then site_auth cookie)  → 401
//! read multipart `file` field                   → 400
//! check R2_PUBLIC_URL                           → 500
//! put object                                    → 500 with details
//! respond { "url": "<R2_PUBLIC_URL>/<key>" }
//! ```
//!
//! The public URL is checked before the write so a misconfigured deployment
//! never leaves orphaned objects behind.

use async_trait::async_trait;
use serde_json::json;
use worker::{Env, FormEntry, Request, Response, Result};

use crate::config::Config;
use crate::constants::{
    DEFAULT_CONTENT_TYPE, FILE_FIELD, HEADER_API_KEY, OBJECT_CACHE_CONTROL,
};
use crate::errors::{AppError, AppResult};
use crate::logging::Logger;
use crate::middleware::AuthMiddleware;
use crate::models::{Authorization, ObjectMetadata, UploadResponse, UploadedFile};
use crate::storage::{ObjectStore, R2Store};
use crate::utils::{generate_object_key, public_object_url};

/// Source of the uploaded file part.
///
/// Reading is deferred until after authorization so an unauthorized request
/// never has its body consumed.
#[async_trait(?Send)]
pub trait UploadSource {
    async fn read_file(&mut self) -> AppResult<Option<UploadedFile>>;
}

#[async_trait(?Send)]
impl UploadSource for Request {
    async fn read_file(&mut self) -> AppResult<Option<UploadedFile>> {
        let form = self.form_data().await.map_err(|e| AppError::Unexpected {
            message: e.to_string(),
        })?;

        match form.get(FILE_FIELD) {
            Some(FormEntry::File(file)) => {
                let bytes = file.bytes().await.map_err(|e| AppError::Unexpected {
                    message: e.to_string(),
                })?;
                Ok(Some(UploadedFile {
                    name: file.name(),
                    content_type: file.type_(),
                    bytes,
                }))
            }
            // A plain text field named `file` carries no upload.
            Some(FormEntry::Field(_)) | None => Ok(None),
        }
    }
}

/// Runs the upload pipeline once authorization has been decided.
///
/// At most one write is attempted; a failed write is returned as
/// [`AppError::Storage`] without retrying.
pub async fn process_upload<S, U>(
    store: &S,
    source: &mut U,
    config: &Config,
    authorization: Authorization,
) -> AppResult<UploadResponse>
where
    S: ObjectStore + ?Sized,
    U: UploadSource + ?Sized,
{
    if !authorization.is_authorized() {
        return Err(AppError::Unauthorized);
    }

    let file = source.read_file().await?.ok_or(AppError::NoFileUploaded)?;

    let host = config
        .public_url
        .as_deref()
        .ok_or(AppError::PublicUrlNotConfigured)?;

    let key = generate_object_key(config.key_policy, &file.name);
    let metadata = ObjectMetadata {
        content_type: if file.content_type.is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            file.content_type
        },
        cache_control: OBJECT_CACHE_CONTROL.to_string(),
    };

    // The whole file is already in memory here; `worker::File` only exposes bytes.
    store.put(&key, file.bytes, &metadata).await?;

    Ok(UploadResponse {
        url: public_object_url(host, &key),
    })
}

/// Worker entry for `POST /api/upload`. Always answers with JSON.
pub async fn handle_upload(req: Request, env: &Env, config: &Config) -> Result<Response> {
    let logger = Logger::from_request(&req);

    let result = upload(req, env, config, &logger).await;

    let response = match result {
        Ok(body) => Response::from_json(&body),
        Err(err) => {
            match &err {
                AppError::Unauthorized | AppError::NoFileUploaded => {
                    logger.warn("Upload rejected", Some(json!({ "reason": err.to_string() })))
                }
                _ => logger.error("Upload failed", Some(json!({ "error": err.to_string() }))),
            }
            err.to_response()
        }
    };

    response.or_else(|_| Response::error("Internal Server Error", 500))
}

async fn upload(
    mut req: Request,
    env: &Env,
    config: &Config,
    logger: &Logger,
) -> AppResult<UploadResponse> {
    let api_key = req.headers().get(HEADER_API_KEY)?;
    let cookie_header = req.headers().get("Cookie")?.unwrap_or_default();

    let authorization = AuthMiddleware::authorize(api_key.as_deref(), &cookie_header, config);
    if !authorization.is_authorized() {
        return Err(AppError::Unauthorized);
    }
    logger.info("Upload authorized", Some(json!({ "via": authorization.as_str() })));

    let store = R2Store::from_env(env, &config.bucket_binding)?;
    let response = process_upload(&store, &mut req, config, authorization).await?;

    logger.info("Upload stored", Some(json!({ "url": response.url })));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::MemoryStore;
    use futures::executor::block_on;
    use uuid::Uuid;

    struct FakeSource {
        file: Option<UploadedFile>,
        reads: usize,
    }

    impl FakeSource {
        fn with_file(name: &str, content_type: &str, bytes: &[u8]) -> Self {
            Self {
                file: Some(UploadedFile {
                    name: name.to_string(),
                    content_type: content_type.to_string(),
                    bytes: bytes.to_vec(),
                }),
                reads: 0,
            }
        }

        fn empty() -> Self {
            Self { file: None, reads: 0 }
        }
    }

    #[async_trait(?Send)]
    impl UploadSource for FakeSource {
        async fn read_file(&mut self) -> AppResult<Option<UploadedFile>> {
            self.reads += 1;
            Ok(self.file.take())
        }
    }

    struct BrokenSource;

    #[async_trait(?Send)]
    impl UploadSource for BrokenSource {
        async fn read_file(&mut self) -> AppResult<Option<UploadedFile>> {
            Err(AppError::Unexpected {
                message: "malformed multipart body".to_string(),
            })
        }
    }

    fn config(public_url: Option<&str>) -> Config {
        Config {
            page_password: Some("hunter2".to_string()),
            api_key: Some("k-123".to_string()),
            public_url: public_url.map(str::to_string),
            ..Config::default()
        }
    }

    #[test]
    fn successful_upload_stores_under_uuid_key_and_returns_url() {
        let store = MemoryStore::default();
        let mut source = FakeSource::with_file("photo.png", "image/png", b"\x89PNG");
        let config = config(Some("https://files.example.com"));

        let response = block_on(process_upload(
            &store,
            &mut source,
            &config,
            Authorization::AuthorizedByKey,
        ))
        .unwrap();

        let puts = store.puts.borrow();
        assert_eq!(puts.len(), 1);
        let put = &puts[0];
        assert!(put.key.ends_with("-photo.png"));
        assert!(Uuid::parse_str(&put.key[..36]).is_ok());
        assert_eq!(put.bytes, b"\x89PNG");
        assert_eq!(put.metadata.content_type, "image/png");
        assert_eq!(put.metadata.cache_control, "public, max-age=31536000");
        assert_eq!(response.url, format!("https://files.example.com/{}", put.key));
    }

    #[test]
    fn unauthorized_upload_reads_nothing_and_writes_nothing() {
        let store = MemoryStore::default();
        let mut source = FakeSource::with_file("photo.png", "image/png", b"data");

        let err = block_on(process_upload(
            &store,
            &mut source,
            &config(Some("https://files.example.com")),
            Authorization::Unauthorized,
        ))
        .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
        assert_eq!(source.reads, 0);
        assert!(store.puts.borrow().is_empty());
    }

    #[test]
    fn missing_file_is_a_bad_request() {
        let store = MemoryStore::default();
        let mut source = FakeSource::empty();

        let err = block_on(process_upload(
            &store,
            &mut source,
            &config(Some("https://files.example.com")),
            Authorization::AuthorizedByCookie,
        ))
        .unwrap_err();

        assert!(matches!(err, AppError::NoFileUploaded));
        assert_eq!(err.status_code().as_u16(), 400);
        assert!(store.puts.borrow().is_empty());
    }

    #[test]
    fn missing_public_url_fails_before_writing() {
        let store = MemoryStore::default();
        let mut source = FakeSource::with_file("photo.png", "image/png", b"data");

        let err = block_on(process_upload(
            &store,
            &mut source,
            &config(None),
            Authorization::AuthorizedByKey,
        ))
        .unwrap_err();

        assert!(matches!(err, AppError::PublicUrlNotConfigured));
        assert_eq!(err.status_code().as_u16(), 500);
        assert!(store.puts.borrow().is_empty());
    }

    #[test]
    fn storage_failure_is_reported_with_details() {
        let store = MemoryStore::failing("bucket unavailable");
        let mut source = FakeSource::with_file("notes.txt", "text/plain", b"hi");

        let err = block_on(process_upload(
            &store,
            &mut source,
            &config(Some("https://files.example.com")),
            Authorization::AuthorizedByKey,
        ))
        .unwrap_err();

        assert_eq!(store.puts.borrow().len(), 1);
        assert_eq!(err.status_code().as_u16(), 500);
        let body = err.to_body();
        assert_eq!(body.error, "Internal Server Error");
        assert_eq!(body.details.as_deref(), Some("bucket unavailable"));
    }

    #[test]
    fn unreadable_body_becomes_internal_error() {
        let store = MemoryStore::default();
        let err = block_on(process_upload(
            &store,
            &mut BrokenSource,
            &config(Some("https://files.example.com")),
            Authorization::AuthorizedByKey,
        ))
        .unwrap_err();

        assert_eq!(err.status_code().as_u16(), 500);
        assert_eq!(err.to_body().details.as_deref(), Some("malformed multipart body"));
        assert!(store.puts.borrow().is_empty());
    }

    #[test]
    fn empty_content_type_falls_back_to_octet_stream() {
        let store = MemoryStore::default();
        let mut source = FakeSource::with_file("blob", "", b"raw");

        block_on(process_upload(
            &store,
            &mut source,
            &config(Some("https://files.example.com")),
            Authorization::AuthorizedByKey,
        ))
        .unwrap();

        assert_eq!(
            store.puts.borrow()[0].metadata.content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn strip_path_policy_is_applied_to_keys() {
        let store = MemoryStore::default();
        let mut source = FakeSource::with_file("../../etc/passwd", "text/plain", b"x");
        let config = Config {
            key_policy: crate::utils::ObjectKeyPolicy::StripPath,
            ..config(Some("https://files.example.com"))
        };

        block_on(process_upload(
            &store,
            &mut source,
            &config,
            Authorization::AuthorizedByKey,
        ))
        .unwrap();

        let key = store.puts.borrow()[0].key.clone();
        assert!(!key.contains('/'));
        assert!(key.ends_with("-....etcpasswd"));
    }
}
