//! Encrypted-container boundary
//!
//! Packaged assets are recognized by filename suffix and handed to an
//! external [`Decryptor`] that produces backend-loadable bytes. The
//! container format itself is the provider's business, not ours.

use std::path::Path;
use std::sync::Arc;

/// Filename extension marking an encrypted container.
pub const CONTAINER_EXT: &str = "dat";

/// Check whether a path names an encrypted container.
#[must_use]
pub fn is_container(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CONTAINER_EXT))
}

/// External provider that decodes an encrypted container into raw
/// audio-file bytes.
pub trait Decryptor {
    /// Decode the container at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be read or decoded.
    fn decrypt(&self, path: &Path) -> Result<Vec<u8>, AssetError>;
}

/// Read an asset file, routing encrypted containers through the decryptor.
///
/// Ordinary files are read directly. Containers without a provider fail,
/// which callers degrade to a null resource.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decrypted.
pub fn read_asset(
    path: impl AsRef<Path>,
    decryptor: Option<&dyn Decryptor>,
) -> Result<Arc<[u8]>, AssetError> {
    let path = path.as_ref();
    if is_container(path) {
        match decryptor {
            Some(provider) => provider.decrypt(path).map(Arc::from),
            None => Err(AssetError::MissingDecryptor),
        }
    } else {
        std::fs::read(path)
            .map(Arc::from)
            .map_err(|e| AssetError::IoError(e.to_string()))
    }
}

/// Errors that can occur while reading an asset file
#[derive(Debug, Clone)]
pub enum AssetError {
    /// IO error reading the file
    IoError(String),
    /// The container could not be decoded
    DecryptError(String),
    /// The file is an encrypted container but no decryptor is installed
    MissingDecryptor,
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecryptError(e) => write!(f, "Decrypt error: {e}"),
            Self::MissingDecryptor => write!(f, "No decryptor installed for encrypted container"),
        }
    }
}

impl std::error::Error for AssetError {}

#[cfg(test)]
mod tests {
    use super::*;

    struct XorDecryptor(u8);

    impl Decryptor for XorDecryptor {
        fn decrypt(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
            let raw = std::fs::read(path).map_err(|e| AssetError::IoError(e.to_string()))?;
            Ok(raw.iter().map(|b| b ^ self.0).collect())
        }
    }

    #[test]
    fn test_container_detection() {
        assert!(is_container("bgm/intro.dat"));
        assert!(is_container("BGM/INTRO.DAT"));
        assert!(!is_container("bgm/intro.ogg"));
        assert!(!is_container("dat"));
        assert!(!is_container("archive.dat.bak"));
    }

    #[test]
    fn test_read_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hit.wav");
        std::fs::write(&path, b"plain bytes").unwrap();

        let bytes = read_asset(&path, None).unwrap();
        assert_eq!(&bytes[..], b"plain bytes");
    }

    #[test]
    fn test_container_requires_decryptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice.dat");
        std::fs::write(&path, b"ciphertext").unwrap();

        let err = read_asset(&path, None).unwrap_err();
        assert!(matches!(err, AssetError::MissingDecryptor));
    }

    #[test]
    fn test_container_decrypted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voice.dat");
        let cipher: Vec<u8> = b"secret".iter().map(|b| b ^ 0xAB).collect();
        std::fs::write(&path, &cipher).unwrap();

        let decryptor = XorDecryptor(0xAB);
        let bytes = read_asset(&path, Some(&decryptor)).unwrap();
        assert_eq!(&bytes[..], b"secret");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_asset(dir.path().join("nope.wav"), None).unwrap_err();
        assert!(matches!(err, AssetError::IoError(_)));
    }
}
