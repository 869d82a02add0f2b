//! Streaming sha-256 of file contents.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, SnapError};

const BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest {
    /// Lowercase hex sha-256.
    pub hash: String,
    /// Bytes fed through the hasher.
    pub size: u64,
}

/// Hash the file at `path`. The handle is closed before returning on every
/// path, including read errors.
pub fn hash_file(path: &Path) -> Result<ContentDigest> {
    let file = File::open(path).map_err(|e| SnapError::io(path, e))?;
    hash_reader(file).map_err(|e| SnapError::io(path, e))
}

pub fn hash_reader<R: Read>(mut reader: R) -> io::Result<ContentDigest> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut size = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
        size += read as u64;
    }

    Ok(ContentDigest {
        hash: format!("{:x}", hasher.finalize()),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn known_digests() {
        let empty = hash_reader(Cursor::new(b"")).unwrap();
        assert_eq!(
            empty.hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(empty.size, 0);

        let hello = hash_reader(Cursor::new(b"hello")).unwrap();
        assert_eq!(
            hello.hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(hello.size, 5);
    }

    #[test]
    fn contents_larger_than_buffer() {
        let data = vec![7u8; BUFFER_SIZE * 3 + 17];
        let streamed = hash_reader(Cursor::new(&data)).unwrap();

        let mut hasher = Sha256::new();
        hasher.update(&data);
        assert_eq!(streamed.hash, format!("{:x}", hasher.finalize()));
        assert_eq!(streamed.size, data.len() as u64);
    }

    #[test]
    fn case_change_changes_digest() {
        let lower = hash_reader(Cursor::new(b"world")).unwrap();
        let upper = hash_reader(Cursor::new(b"WORLD")).unwrap();
        assert_ne!(lower.hash, upper.hash);
        assert_eq!(lower.size, upper.size);
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn read_error_propagates() {
        let err = hash_reader(FailingReader).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn missing_file_error_names_path() {
        let err = hash_file(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
