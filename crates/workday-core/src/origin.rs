//! Where the raw content of an externally-derived source comes from.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::error::SourceError;
use crate::http_client::{HttpClient, HttpRequest};

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, SourceError>> + Send + 'a>>;

/// Fetch capability: produce the full raw content, or fail.
pub trait ContentOrigin: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;

    fn describe(&self) -> String;
}

/// Content supplied once, as a literal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrigin {
    content: String,
}

impl LiteralOrigin {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl ContentOrigin for LiteralOrigin {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move { Ok(self.content.clone()) })
    }

    fn describe(&self) -> String {
        String::from("literal content")
    }
}

/// Whole-file content read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOrigin {
    path: PathBuf,
}

impl FileOrigin {
    /// Fails when the path is blank or does not name an existing file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
            return Err(SourceError::invalid_configuration(
                "a file source requires a non-empty file path",
            ));
        }
        if !path.is_file() {
            return Err(SourceError::invalid_configuration(format!(
                "the file '{}' does not exist",
                path.display()
            )));
        }
        let path = path.canonicalize().map_err(|error| {
            SourceError::invalid_configuration(format!(
                "cannot resolve '{}': {error}",
                path.display()
            ))
        })?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentOrigin for FileOrigin {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            tokio::fs::read_to_string(&self.path).await.map_err(|error| {
                SourceError::unavailable(format!(
                    "failed to read '{}': {error}",
                    self.path.display()
                ))
            })
        })
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Response body of an HTTP request, re-issued on every fetch.
#[derive(Clone)]
pub struct HttpOrigin {
    client: Arc<dyn HttpClient>,
    request: HttpRequest,
}

impl HttpOrigin {
    pub fn new(client: Arc<dyn HttpClient>, request: HttpRequest) -> Result<Self, SourceError> {
        if request.url.trim().is_empty() {
            return Err(SourceError::invalid_configuration(
                "an HTTP source requires a request URL",
            ));
        }
        Ok(Self { client, request })
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

impl ContentOrigin for HttpOrigin {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .execute(self.request.clone())
                .await
                .map_err(|error| {
                    SourceError::unavailable(format!(
                        "request to {} failed: {error}",
                        self.request.url
                    ))
                })?;

            if !response.is_success() {
                return Err(SourceError::unavailable(format!(
                    "request to {} returned status {}",
                    self.request.url, response.status
                )));
            }

            Ok(response.body)
        })
    }

    fn describe(&self) -> String {
        format!("http {}", self.request.url)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::SourceErrorKind;

    #[tokio::test]
    async fn literal_origin_returns_its_content() {
        let origin = LiteralOrigin::new("2018-05-14");
        assert_eq!(origin.fetch().await.unwrap(), "2018-05-14");
    }

    #[test]
    fn file_origin_rejects_blank_and_missing_paths() {
        let blank = FileOrigin::new("  ").expect_err("blank path");
        assert_eq!(blank.kind(), SourceErrorKind::InvalidConfiguration);

        let missing = FileOrigin::new("/definitely/not/here.txt").expect_err("missing path");
        assert_eq!(missing.kind(), SourceErrorKind::InvalidConfiguration);
        assert!(missing.message().contains("does not exist"));
    }

    #[tokio::test]
    async fn file_origin_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "2018-05-14\n2018-05-15\n").expect("write");

        let origin = FileOrigin::new(file.path()).expect("existing file");
        assert_eq!(origin.fetch().await.unwrap(), "2018-05-14\n2018-05-15\n");
    }
}
