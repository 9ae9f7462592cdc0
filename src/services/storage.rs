use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Part size for streaming uploads. S3 requires every part except the last to
/// be at least 5 MB.
const CHUNK_SIZE: usize = 10 * 1024 * 1024;

pub struct UploadResult {
    pub size: i64,
    pub s3_key: String,
}

/// Seam between the HTTP handlers and the object store, so tests can swap in
/// a recording fake without a live bucket.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Write `reader` to the bucket under `key`, streaming rather than
    /// buffering the whole body. An existing object under the same key is
    /// silently overwritten.
    async fn upload_stream<'a>(
        &self,
        key: &str,
        content_type: &str,
        reader: Box<dyn AsyncRead + Unpin + Send + 'a>,
    ) -> Result<UploadResult>;

    /// Pre-signed GET URL for `key`, valid for `expires_in`. No existence
    /// check is performed.
    async fn presign_download(&self, key: &str, expires_in: Duration) -> Result<String>;

    /// Deterministic public URL for `key`. Not signed, and not guaranteed to
    /// resolve if the bucket is private.
    fn public_url(&self, key: &str) -> String;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
    region: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String, region: String) -> Self {
        Self {
            client,
            bucket,
            region,
        }
    }
}

/// Read until `buffer` is full or the stream ends; returns bytes read.
async fn fill_buffer<R>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut n = 0;
    while n < buffer.len() {
        let read = reader.read(&mut buffer[n..]).await?;
        if read == 0 {
            break;
        }
        n += read;
    }
    Ok(n)
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload_stream<'a>(
        &self,
        key: &str,
        content_type: &str,
        mut reader: Box<dyn AsyncRead + Unpin + Send + 'a>,
    ) -> Result<UploadResult> {
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let n = fill_buffer(&mut reader, &mut buffer).await?;

        // Bodies that fit in a single part go through a plain PutObject.
        if n < CHUNK_SIZE {
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(key)
                .content_type(content_type)
                .body(ByteStream::from(buffer[..n].to_vec()))
                .send()
                .await?;

            return Ok(UploadResult {
                size: n as i64,
                s3_key: key.to_string(),
            });
        }

        // Larger bodies use the multipart protocol, one buffered chunk at a
        // time, so memory use stays bounded by CHUNK_SIZE.
        let multipart_upload_res = self
            .client
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .send()
            .await?;

        let upload_id = multipart_upload_res
            .upload_id()
            .ok_or_else(|| anyhow::anyhow!("No upload ID"))?;
        let mut part_number = 1;
        let mut completed_parts = Vec::new();
        let mut total_size = n as i64;
        let mut part_len = n;

        loop {
            let body = ByteStream::from(buffer[..part_len].to_vec());
            let upload_part_res = self
                .client
                .upload_part()
                .bucket(&self.bucket)
                .key(key)
                .upload_id(upload_id)
                .body(body)
                .part_number(part_number)
                .send()
                .await?;

            completed_parts.push(
                CompletedPart::builder()
                    .e_tag(upload_part_res.e_tag().unwrap_or_default())
                    .part_number(part_number)
                    .build(),
            );

            part_number += 1;
            part_len = fill_buffer(&mut reader, &mut buffer).await?;
            if part_len == 0 {
                break;
            }
            total_size += part_len as i64;
        }

        let completed_multipart_upload = CompletedMultipartUpload::builder()
            .set_parts(Some(completed_parts))
            .build();

        self.client
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key)
            .upload_id(upload_id)
            .multipart_upload(completed_multipart_upload)
            .send()
            .await?;

        Ok(UploadResult {
            size: total_size,
            s3_key: key.to_string(),
        })
    }

    async fn presign_download(&self, key: &str, expires_in: Duration) -> Result<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(expires_in)?)
            .await?;

        Ok(presigned.uri().to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}
