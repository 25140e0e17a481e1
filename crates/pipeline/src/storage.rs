//! Blob storage locator resolution and object fetching
//!
//! Accepted locator forms:
//! - `gs://bucket/path/to/object.pdf`
//! - `https://firebasestorage.googleapis.com/v0/b/{bucket}/o/{object}?...`
//!   (object percent-encoded)
//! - `https://storage.googleapis.com/{bucket}/{object}`
//! - any other HTTP(S) URL: last-resort convention
//!   `papers/{uploader_id}/{paper_id}.pdf` in the configured default bucket
//!
//! Anything else fails with `PipelineError::StorageResolution`, as does a
//! missing object at fetch time.

use crate::errors::PipelineError;
use async_trait::async_trait;
use regex_lite::Regex;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// A resolved bucket/object pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub object: String,
}

impl ObjectLocation {
    /// Parse a raw locator into a bucket/object pair.
    ///
    /// `uploader_id` and `paper_id` feed the last-resort naming convention
    /// used when an HTTP URL carries no recognizable path information.
    pub fn parse(
        raw: &str,
        uploader_id: &str,
        paper_id: &str,
        default_bucket: &str,
    ) -> Result<Self, PipelineError> {
        if let Some(rest) = raw.strip_prefix("gs://") {
            let (bucket, object) = rest.split_once('/').ok_or_else(|| {
                PipelineError::StorageResolution {
                    locator: raw.to_string(),
                    message: "gs:// locator has no object path".to_string(),
                }
            })?;
            if bucket.is_empty() || object.is_empty() {
                return Err(PipelineError::StorageResolution {
                    locator: raw.to_string(),
                    message: "gs:// locator has an empty bucket or object".to_string(),
                });
            }
            return Ok(Self {
                bucket: bucket.to_string(),
                object: object.to_string(),
            });
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            // Firebase download URL: object path is percent-encoded
            let firebase =
                Regex::new(r"^https://firebasestorage\.googleapis\.com/v0/b/([^/]+)/o/([^?]+)")
                    .expect("static regex");
            if let Some(caps) = firebase.captures(raw) {
                return Ok(Self {
                    bucket: caps[1].to_string(),
                    object: percent_decode(&caps[2]),
                });
            }

            // Path-style GCS URL
            if let Some(rest) = raw
                .strip_prefix("https://storage.googleapis.com/")
                .or_else(|| raw.strip_prefix("http://storage.googleapis.com/"))
            {
                let path = rest.split('?').next().unwrap_or(rest);
                if let Some((bucket, object)) = path.split_once('/') {
                    if !bucket.is_empty() && !object.is_empty() {
                        return Ok(Self {
                            bucket: bucket.to_string(),
                            object: percent_decode(object),
                        });
                    }
                }
            }

            // Signed or opaque URL: fall back to the upload naming convention
            debug!(locator = raw, "Locator carries no path info, using upload convention");
            return Ok(Self {
                bucket: default_bucket.to_string(),
                object: format!("papers/{}/{}.pdf", uploader_id, paper_id),
            });
        }

        Err(PipelineError::StorageResolution {
            locator: raw.to_string(),
            message: "unrecognized locator scheme".to_string(),
        })
    }
}

/// Decode %XX escapes (and nothing else); invalid escapes pass through
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if let (Some(hi), Some(lo)) = (
                bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16)),
                bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16)),
            ) {
                out.push((hi * 16 + lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Object fetching boundary
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the object's raw bytes; fails with `StorageResolution` if the
    /// object is absent or unreachable.
    async fn fetch(&self, location: &ObjectLocation) -> Result<Vec<u8>, PipelineError>;
}

/// Fetches objects over the GCS HTTP surface
pub struct HttpBlobStore {
    client: reqwest::Client,
}

impl HttpBlobStore {
    pub fn new(fetch_timeout: Duration) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .build()
            .map_err(|e| PipelineError::StorageResolution {
                locator: String::new(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Vec<u8>, PipelineError> {
        let url = format!(
            "https://storage.googleapis.com/{}/{}",
            location.bucket, location.object
        );
        let locator = format!("gs://{}/{}", location.bucket, location.object);

        let response = self.client.get(&url).send().await.map_err(|e| {
            PipelineError::StorageResolution {
                locator: locator.clone(),
                message: format!("fetch failed: {}", e),
            }
        })?;

        if !response.status().is_success() {
            return Err(PipelineError::StorageResolution {
                locator,
                message: format!("object fetch returned {}", response.status()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::StorageResolution {
                locator,
                message: format!("failed to read object body: {}", e),
            })?;

        Ok(bytes.to_vec())
    }
}

/// In-memory store for tests and local development
#[derive(Default)]
pub struct MemoryBlobStore {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: &str, object: &str, bytes: Vec<u8>) {
        self.objects
            .insert((bucket.to_string(), object.to_string()), bytes);
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn fetch(&self, location: &ObjectLocation) -> Result<Vec<u8>, PipelineError> {
        self.objects
            .get(&(location.bucket.clone(), location.object.clone()))
            .cloned()
            .ok_or_else(|| PipelineError::StorageResolution {
                locator: format!("gs://{}/{}", location.bucket, location.object),
                message: "object not found".to_string(),
            })
    }
}
