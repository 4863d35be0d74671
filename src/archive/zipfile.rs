//! ZIP archive password tester

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use super::{CandidateTester, TestOutcome};
use crate::error::{Result, ZipForceError};

/// Tests candidates against the encrypted entries of a ZIP archive.
///
/// The archive is opened once; every candidate is checked against all
/// encrypted file entries and must decrypt each of them completely.
pub struct ZipPasswordTester {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    encrypted: Vec<usize>,
    buffer: Vec<u8>,
}

impl ZipPasswordTester {
    /// Open an archive for testing
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let shown = path.display().to_string();

        if !path.exists() {
            return Err(ZipForceError::config(format!(
                "ZIP file '{}' not found",
                shown
            )));
        }

        let file = File::open(&path).map_err(|e| ZipForceError::io(e.to_string(), Some(shown.clone())))?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| match e {
            ZipError::Io(io) => ZipForceError::io(io.to_string(), Some(shown.clone())),
            other => ZipForceError::config(format!(
                "'{}' is not a readable ZIP archive: {}",
                shown, other
            )),
        })?;

        let mut encrypted = Vec::new();
        for index in 0..archive.len() {
            let entry = archive
                .by_index_raw(index)
                .map_err(|e| ZipForceError::archive(shown.clone(), e.to_string()))?;
            if entry.encrypted() && !entry.is_dir() {
                encrypted.push(index);
            }
        }

        if encrypted.is_empty() {
            return Err(ZipForceError::config(format!(
                "'{}' has no password-protected entries",
                shown
            )));
        }

        tracing::debug!(
            archive = %shown,
            entries = archive.len(),
            encrypted = encrypted.len(),
            "Opened archive"
        );

        Ok(Self {
            path,
            archive,
            encrypted,
            buffer: Vec::new(),
        })
    }

    /// Number of encrypted file entries a candidate has to open
    pub fn encrypted_entries(&self) -> usize {
        self.encrypted.len()
    }

    /// Extract every entry with a known password into `dir`.
    ///
    /// Returns the number of files written.
    pub fn extract_to(&mut self, password: &str, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let shown = self.path.display().to_string();
        std::fs::create_dir_all(dir)
            .map_err(|e| ZipForceError::io(e.to_string(), Some(dir.display().to_string())))?;

        let mut written = 0;
        for index in 0..self.archive.len() {
            let opened = if self.encrypted.contains(&index) {
                self.archive.by_index_decrypt(index, password.as_bytes())
            } else {
                self.archive.by_index(index)
            };
            let mut entry =
                opened.map_err(|e| ZipForceError::archive(shown.clone(), e.to_string()))?;

            let relative = entry.enclosed_name().ok_or_else(|| {
                ZipForceError::archive(
                    shown.clone(),
                    format!("entry '{}' escapes the extraction directory", entry.name()),
                )
            })?;
            let target = dir.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&target).map_err(|e| {
                    ZipForceError::io(e.to_string(), Some(target.display().to_string()))
                })?;
                continue;
            }

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ZipForceError::io(e.to_string(), Some(parent.display().to_string()))
                })?;
            }
            let mut out = File::create(&target)
                .map_err(|e| ZipForceError::io(e.to_string(), Some(target.display().to_string())))?;
            std::io::copy(&mut entry, &mut out)
                .map_err(|e| ZipForceError::archive(shown.clone(), e.to_string()))?;
            written += 1;
        }

        tracing::info!(archive = %shown, dir = %dir.display(), files = written, "Extracted archive");
        Ok(written)
    }
}

/// Whether a read error comes from content that did not decode, as opposed
/// to the archive being unreadable. Checksum and AES authentication failures
/// are `InvalidData`; a corrupt deflate stream is `InvalidInput`.
fn is_decrypt_failure(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof
    )
}

impl CandidateTester for ZipPasswordTester {
    fn test(&mut self, candidate: &str) -> Result<TestOutcome> {
        for &index in &self.encrypted {
            let mut entry = match self.archive.by_index_decrypt(index, candidate.as_bytes()) {
                Ok(entry) => entry,
                Err(ZipError::InvalidPassword) => return Ok(TestOutcome::NoMatch),
                Err(e) => {
                    return Err(ZipForceError::archive(
                        self.path.display().to_string(),
                        e.to_string(),
                    ))
                }
            };

            // The password check only covers a header byte or two, so a wrong
            // password can pass it and then fail while reading the content.
            self.buffer.clear();
            if let Err(e) = entry.read_to_end(&mut self.buffer) {
                if !is_decrypt_failure(&e) {
                    return Err(ZipForceError::archive(
                        self.path.display().to_string(),
                        e.to_string(),
                    ));
                }
                tracing::trace!(candidate, entry = index, error = %e, "Password passed header check but failed to decrypt");
                return Ok(TestOutcome::NoMatch);
            }
        }

        Ok(TestOutcome::Match)
    }

    fn target(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{Alphabet, CandidateGenerator};
    use crate::types::CharsetSpec;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::unstable::write::FileOptionsExt;
    use zip::write::SimpleFileOptions;
    use zip::{AesMode, CompressionMethod, ZipWriter};

    fn write_archive(path: &Path, entries: &[(&str, &[u8])], options: SimpleFileOptions) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, data) in entries {
            writer.start_file(*name, options.clone()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    fn aes(password: &'static str) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .with_aes_encryption(AesMode::Aes256, password)
    }

    #[test]
    fn test_missing_archive_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = ZipPasswordTester::open(dir.path().join("nope.zip")).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_garbage_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.zip");
        std::fs::write(&path, [b'x'; 512]).unwrap();
        let err = ZipPasswordTester::open(&path).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_unencrypted_archive_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.zip");
        write_archive(&path, &[("a.txt", b"hello")], SimpleFileOptions::default());
        let err = ZipPasswordTester::open(&path).err().unwrap();
        assert!(err.to_string().contains("no password-protected entries"));
    }

    #[test]
    fn test_aes_password() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aes.zip");
        write_archive(&path, &[("secret.txt", b"top secret contents")], aes("4242"));

        let mut tester = ZipPasswordTester::open(&path).unwrap();
        assert_eq!(tester.encrypted_entries(), 1);
        assert_eq!(tester.test("0000").unwrap(), TestOutcome::NoMatch);
        assert_eq!(tester.test("4242").unwrap(), TestOutcome::Match);
        assert_eq!(tester.test("4243").unwrap(), TestOutcome::NoMatch);
    }

    #[test]
    fn test_zipcrypto_password() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.zip");
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .with_deprecated_encryption(b"ab");
        write_archive(&path, &[("one.txt", b"first"), ("two.txt", b"second")], options);

        let mut tester = ZipPasswordTester::open(&path).unwrap();
        assert_eq!(tester.encrypted_entries(), 2);
        assert!(tester.test("ab").unwrap().is_match());
        assert!(!tester.test("ba").unwrap().is_match());
    }

    #[test]
    fn test_extract_after_match() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aes.zip");
        write_archive(
            &path,
            &[("notes/a.txt", b"alpha"), ("b.txt", b"beta")],
            aes("pw"),
        );

        let out = dir.path().join("out");
        let mut tester = ZipPasswordTester::open(&path).unwrap();
        assert_eq!(tester.extract_to("pw", &out).unwrap(), 2);
        assert_eq!(std::fs::read(out.join("notes/a.txt")).unwrap(), b"alpha");
        assert_eq!(std::fs::read(out.join("b.txt")).unwrap(), b"beta");
    }

    #[test]
    fn test_zipcrypto_collisions_are_not_matches() {
        let alphabet = Alphabet::from_spec(&CharsetSpec::new(true, true, true, false)).unwrap();
        let content = b"lab notes: the quick brown fox jumps over the lazy dog\n".repeat(8);

        for method in [CompressionMethod::Stored, CompressionMethod::Deflated] {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("legacy.zip");
            let options = SimpleFileOptions::default()
                .compression_method(method)
                .with_deprecated_encryption(b"qz");
            write_archive(&path, &[("notes.txt", content.as_slice())], options);

            let mut tester = ZipPasswordTester::open(&path).unwrap();
            let mut matches = Vec::new();
            let mut candidates = 0;
            for candidate in CandidateGenerator::new(&alphabet, 2, None) {
                candidates += 1;
                if tester.test(&candidate).unwrap().is_match() {
                    matches.push(candidate);
                }
            }

            assert_eq!(candidates, 3844);
            assert_eq!(matches, vec!["qz".to_string()], "{:?}", method);
        }
    }

    #[test]
    fn test_only_decode_errors_count_as_wrong_password() {
        let checksum = io::Error::new(io::ErrorKind::InvalidData, "Invalid checksum");
        let deflate = io::Error::new(io::ErrorKind::InvalidInput, "corrupt deflate stream");
        let disk = io::Error::new(io::ErrorKind::Other, "device not ready");
        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");

        assert!(is_decrypt_failure(&checksum));
        assert!(is_decrypt_failure(&deflate));
        assert!(!is_decrypt_failure(&disk));
        assert!(!is_decrypt_failure(&denied));
    }
}
