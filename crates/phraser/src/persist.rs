// Binary phrase model files.
//
// Layout: 4-byte magic "PHRS", u32 little-endian format version, then the
// bincode encoding of the frozen model.

use std::fs;
use std::io::Write;
use std::path::Path;

use phraser_colloc::Phraser;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::PhraseError;

/// Magic number at the start of every model file.
pub const MAGIC: [u8; 4] = *b"PHRS";

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the magic number plus version.
pub const HEADER_SIZE: usize = 8;

/// Encode a model with its header.
pub fn to_bytes(phraser: &Phraser) -> Result<Vec<u8>, PhraseError> {
    let payload = bincode::serialize(phraser).map_err(PhraseError::Encode)?;
    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a model, checking magic and version first.
pub fn from_bytes(data: &[u8]) -> Result<Phraser, PhraseError> {
    if data.len() < HEADER_SIZE || data[..4] != MAGIC {
        return Err(PhraseError::InvalidMagic);
    }
    let version = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    if version != FORMAT_VERSION {
        return Err(PhraseError::UnsupportedVersion {
            found: version,
            expected: FORMAT_VERSION,
        });
    }
    bincode::deserialize(&data[HEADER_SIZE..]).map_err(PhraseError::Decode)
}

/// Write a model to `path`.
///
/// The file is written to a temporary sibling and renamed into place, so a
/// reader never sees a partially written model.
pub fn save_phraser(phraser: &Phraser, path: &Path) -> Result<(), PhraseError> {
    let bytes = to_bytes(phraser)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        phrasegrams = phraser.len(),
        "saved phrase model"
    );
    Ok(())
}

/// Read a model written by [`save_phraser`].
pub fn load_phraser(path: &Path) -> Result<Phraser, PhraseError> {
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read phrase model file");
    let phraser = from_bytes(&data)?;
    info!(
        path = %path.display(),
        phrasegrams = phraser.len(),
        "loaded phrase model"
    );
    Ok(phraser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phraser_colloc::{CollocationParams, Collocations, Phrases};
    use phraser_core::terms::CommonTerms;

    fn model() -> Phraser {
        let mut corpus = Vec::new();
        for _ in 0..10 {
            corpus.push(vec!["service", "client", "ferme"]);
            corpus.push(vec!["appeler", "le", "service", "client"]);
        }
        let params = CollocationParams::default()
            .with_min_count(2)
            .with_threshold(0.1)
            .with_connector_words(CommonTerms::from_words(["le"]));
        Phrases::train(params, corpus).unwrap().freeze()
    }

    // -- byte format tests --

    #[test]
    fn bytes_round_trip() {
        let phraser = model();
        assert!(phraser.score("service_client").is_some());
        let bytes = to_bytes(&phraser).unwrap();
        assert_eq!(&bytes[..4], b"PHRS");
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        let decoded = from_bytes(&bytes).unwrap();
        assert_eq!(decoded, phraser);
        assert_eq!(
            decoded.phrase(&["le", "service", "client"]),
            vec!["le", "service_client"]
        );
    }

    #[test]
    fn rejects_bad_magic() {
        assert!(matches!(from_bytes(b""), Err(PhraseError::InvalidMagic)));
        assert!(matches!(from_bytes(b"PHR"), Err(PhraseError::InvalidMagic)));
        assert!(matches!(
            from_bytes(b"GIF89a\x00\x00\x00\x00"),
            Err(PhraseError::InvalidMagic)
        ));
    }

    #[test]
    fn rejects_future_version() {
        let mut bytes = to_bytes(&model()).unwrap();
        bytes[4..8].copy_from_slice(&7u32.to_le_bytes());
        assert!(matches!(
            from_bytes(&bytes),
            Err(PhraseError::UnsupportedVersion { found: 7, expected: 1 })
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let bytes = to_bytes(&model()).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(from_bytes(truncated), Err(PhraseError::Decode(_))));
    }

    // -- file tests --

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phraser.bin");
        let phraser = model();
        save_phraser(&phraser, &path).unwrap();
        assert_eq!(load_phraser(&path).unwrap(), phraser);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("phraser.bin");
        fs::write(&path, b"old contents").unwrap();
        save_phraser(&model(), &path).unwrap();
        assert!(load_phraser(&path).is_ok());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("phraser.bin");
        assert!(matches!(
            save_phraser(&model(), &path),
            Err(PhraseError::Io(_))
        ));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_phraser(&dir.path().join("nope.bin")),
            Err(PhraseError::Io(_))
        ));
    }

    #[test]
    fn load_foreign_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "just some text").unwrap();
        assert!(matches!(load_phraser(&path), Err(PhraseError::InvalidMagic)));
    }
}
