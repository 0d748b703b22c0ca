use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// An avatar image to analyze, with a stable identity used as cache key.
#[derive(Clone)]
pub enum ImageSource {
    /// Image file on disk; identity is the path string
    Path(PathBuf),
    /// Encoded image bytes already in memory
    Bytes { id: String, bytes: Arc<[u8]> },
}

impl ImageSource {
    /// Source for a file path.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        ImageSource::Path(path.into())
    }

    /// In-memory source identified by the SHA256 of its content.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        let id = content_id(&bytes);
        ImageSource::Bytes { id, bytes }
    }

    /// In-memory source with a caller-chosen identity.
    pub fn with_id(id: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        ImageSource::Bytes {
            id: id.into(),
            bytes: bytes.into(),
        }
    }

    /// Stable identity of this image.
    pub fn identity(&self) -> String {
        match self {
            ImageSource::Path(path) => path.to_string_lossy().into_owned(),
            ImageSource::Bytes { id, .. } => id.clone(),
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            ImageSource::Bytes { id, bytes } => f
                .debug_struct("Bytes")
                .field("id", id)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Content identity for in-memory images.
///
/// First 16 bytes of the SHA256, as 32 hex characters.
pub fn content_id(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(&digest[..16])
}
