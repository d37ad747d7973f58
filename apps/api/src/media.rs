//! Blob storage collaborator. Takes bytes plus a logical folder and returns
//! the publicly resolvable URL the row stores. Upload auth and URL signing
//! live outside this service.

#![allow(dead_code)]

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// The three image-bearing fields each get their own key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFolder {
    Profile,
    Certificates,
    GarageSale,
}

impl MediaFolder {
    pub fn prefix(self) -> &'static str {
        match self {
            MediaFolder::Profile => "profile",
            MediaFolder::Certificates => "certificates",
            MediaFolder::GarageSale => "garage_sale",
        }
    }
}

#[derive(Clone)]
pub struct MediaStore {
    s3: S3Client,
    bucket: String,
    public_base: String,
}

impl MediaStore {
    pub fn new(s3: S3Client, bucket: impl Into<String>, public_base: &str) -> Self {
        MediaStore {
            s3,
            bucket: bucket.into(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }

    /// Stores the bytes under a fresh key and returns the public URL.
    pub async fn store(
        &self,
        folder: MediaFolder,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let key = object_key(folder, filename);
        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("upload of {key} failed: {e}")))?;

        info!("Stored media object s3://{}/{}", self.bucket, key);
        Ok(self.public_url(&key))
    }

    pub async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.s3
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("delete of {key} failed: {e}")))?;

        info!("Deleted media object s3://{}/{}", self.bucket, key);
        Ok(())
    }

    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }
}

/// Keys are `<folder>/<uuid>-<original filename>`; the uuid keeps repeated
/// uploads of the same filename from clobbering each other.
fn object_key(folder: MediaFolder, filename: &str) -> String {
    format!("{}/{}-{}", folder.prefix(), Uuid::new_v4(), filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_prefixes() {
        assert_eq!(MediaFolder::Profile.prefix(), "profile");
        assert_eq!(MediaFolder::Certificates.prefix(), "certificates");
        assert_eq!(MediaFolder::GarageSale.prefix(), "garage_sale");
    }

    #[test]
    fn object_key_is_prefixed_and_keeps_filename() {
        let key = object_key(MediaFolder::GarageSale, "bike.jpg");
        assert!(key.starts_with("garage_sale/"));
        assert!(key.ends_with("-bike.jpg"));
    }

    #[test]
    fn object_keys_are_unique_per_upload() {
        let a = object_key(MediaFolder::Profile, "photo.png");
        let b = object_key(MediaFolder::Profile, "photo.png");
        assert_ne!(a, b);
    }
}
