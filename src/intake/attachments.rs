//! Mockup attachments
//!
//! Customers attach mockup images to an order. Files are read asynchronously
//! and embedded as base64 data URLs, the same form the model images use.
//! Multiple reads run concurrently; all of them must resolve before an order
//! can be submitted, and the results keep the upload order regardless of
//! completion order.

use std::path::Path;

use base64::Engine;

use crate::core::AppResult;

/// A read attachment: original file name plus its data-URL payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mockup {
    pub name: String,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
}

/// Read one file into a data-URL mockup
pub async fn read_mockup(path: impl AsRef<Path>) -> AppResult<Mockup> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let payload = base64::engine::general_purpose::STANDARD.encode(&bytes);

    Ok(Mockup {
        name: path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string(),
        data: format!("data:{};base64,{payload}", mime.essence_str()),
    })
}

/// Read all pending attachments concurrently, preserving input order
pub async fn read_mockups(paths: &[impl AsRef<Path>]) -> AppResult<Vec<Mockup>> {
    futures::future::try_join_all(paths.iter().map(read_mockup)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_mockup_builds_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("front.png");
        tokio::fs::write(&path, b"pngbytes").await.unwrap();

        let mockup = read_mockup(&path).await.unwrap();
        assert_eq!(mockup.name, "front.png");
        assert!(mockup.data.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_read_mockups_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        tokio::fs::write(&a, b"aa").await.unwrap();
        tokio::fs::write(&b, b"bb").await.unwrap();

        let mockups = read_mockups(&[&a, &b]).await.unwrap();
        assert_eq!(mockups[0].name, "a.jpg");
        assert_eq!(mockups[1].name, "b.jpg");
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");
        assert!(read_mockup(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_extension_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.mockup");
        tokio::fs::write(&path, b"x").await.unwrap();

        let mockup = read_mockup(&path).await.unwrap();
        assert!(mockup.data.starts_with("data:application/octet-stream;base64,"));
    }
}
