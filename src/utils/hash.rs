//! Content fingerprinting for cache-busting filenames.
//!
//! Uses blake3 so fingerprints are deterministic across builds, platforms
//! and crate versions. The short hex form is what lands in output filenames
//! (e.g. `logo.4ba9f21.png`).

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Length of a filename fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 7;

/// Compute the short content fingerprint of a byte slice.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let hash = blake3::hash(data.as_ref());
    let mut hex = hex::encode(&hash.as_bytes()[..4]);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Compute the short content fingerprint of a file (streaming).
pub fn fingerprint_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    let mut hex = hex::encode(&hasher.finalize().as_bytes()[..4]);
    hex.truncate(FINGERPRINT_LEN);
    Ok(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fingerprint_length() {
        assert_eq!(fingerprint("body { color: red; }").len(), FINGERPRINT_LEN);
        assert_eq!(fingerprint(b"" as &[u8]).len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = fingerprint("console.log(1)");
        let b = fingerprint("console.log(1)");
        assert_eq!(a, b);

        let c = fingerprint("console.log(2)");
        assert_ne!(a, c);
    }

    #[test]
    fn test_fingerprint_file_matches_slice() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.js");
        fs::write(&path, "const x = 42;").unwrap();

        let from_file = fingerprint_file(&path).unwrap();
        let from_slice = fingerprint("const x = 42;");
        assert_eq!(from_file, from_slice);
    }

    #[test]
    fn test_fingerprint_file_missing() {
        assert!(fingerprint_file(Path::new("/nonexistent/file.png")).is_err());
    }
}
