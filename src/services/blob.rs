use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

/// The blob-store side of remote mode. The portal only needs three
/// primitives: upload-bytes-get-url, delete-by-name, and an existence probe
/// for health reporting.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload raw bytes under `key` and return the retrieval URL stored on
    /// the media record.
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<String>;

    /// Delete by key. A missing object is not an error; payload cleanup is
    /// best effort and the record-level delete proceeds regardless.
    async fn delete(&self, key: &str) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool>;
}

pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3BlobStore {
    pub fn new(client: Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base,
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await?;

        Ok(format!(
            "{}/{}/{}",
            self.public_base.trim_end_matches('/'),
            self.bucket,
            key
        ))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // S3 DeleteObject is a no-op for missing keys, which is exactly the
        // tolerance the media delete path wants
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let res = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(anyhow::anyhow!(service_error))
                }
            }
        }
    }
}
