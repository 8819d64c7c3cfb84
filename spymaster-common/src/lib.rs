use std::{
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{ensure, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub const MANIFEST_VERSION: u32 = 1;
pub const DEFAULT_PROGRAM_NAME: &str = "process-messages";
pub const PROGRAM_VERSION: u32 = 1;

/// On-disk form of an attestation key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyManifest {
    pub manifest_version: u32,
    pub program: String,
    pub created_at_unix: u64,
    /// Hex-encoded key bytes.
    pub key: String,
    /// BLAKE3 of the decoded key bytes.
    pub key_blake3: String,
}

impl KeyManifest {
    pub fn new(program: impl Into<String>, key: &[u8]) -> Self {
        Self {
            manifest_version: MANIFEST_VERSION,
            program: program.into(),
            created_at_unix: unix_now(),
            key: hex::encode(key),
            key_blake3: hash_bytes_hex(key),
        }
    }

    /// Decode the key, checking the manifest version and integrity hash.
    pub fn key_bytes(&self) -> Result<Vec<u8>> {
        ensure!(
            self.manifest_version == MANIFEST_VERSION,
            "unsupported key manifest version {}",
            self.manifest_version
        );
        let bytes = hex::decode(&self.key).context("key is not valid hex")?;
        ensure!(
            hash_bytes_hex(&bytes) == self.key_blake3,
            "key hash mismatch: manifest may be corrupted"
        );
        Ok(bytes)
    }
}

pub fn write_key_manifest(path: impl AsRef<Path>, manifest: &KeyManifest) -> Result<()> {
    write_json(path, manifest).context("failed to write key manifest")
}

pub fn read_key_manifest(path: impl AsRef<Path>) -> Result<KeyManifest> {
    read_json(path).context("failed to read key manifest")
}

/// Pretty-print `value` as JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_vec_pretty(value).context("failed to serialize json")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn hash_bytes_hex(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// BLAKE3 over a domain tag followed by each part.
pub fn domain_hash(domain: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(domain);
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Serde helpers for `[u8; 32]` as hex strings.
pub mod serde_hex32 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let s = String::deserialize(d)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        bytes
            .try_into()
            .map_err(|v: Vec<u8>| D::Error::custom(format!("expected 32 bytes, got {}", v.len())))
    }
}

/// Serde helpers for `Vec<u8>` as hex strings.
pub mod serde_hex_vec {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hex::decode(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapped {
        #[serde(with = "serde_hex32")]
        digest: [u8; 32],
        #[serde(with = "serde_hex_vec")]
        proof: Vec<u8>,
    }

    #[test]
    fn test_key_manifest_integrity() {
        let manifest = KeyManifest::new(DEFAULT_PROGRAM_NAME, &[7u8; 32]);
        assert_eq!(manifest.key_bytes().unwrap(), vec![7u8; 32]);

        let mut tampered = manifest.clone();
        tampered.key = hex::encode([8u8; 32]);
        assert!(tampered.key_bytes().is_err());
    }

    #[test]
    fn test_json_file_helpers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("key.json");
        let manifest = KeyManifest::new("demo", &[1, 2, 3]);
        write_key_manifest(&path, &manifest).unwrap();

        let loaded = read_key_manifest(&path).unwrap();
        assert_eq!(loaded.key_bytes().unwrap(), vec![1, 2, 3]);
        assert_eq!(loaded.program, "demo");
    }

    #[test]
    fn test_hex_serde_rejects_wrong_length() {
        let json = r#"{"digest":"abcd","proof":"00ff"}"#;
        assert!(serde_json::from_str::<Wrapped>(json).is_err());

        let value = Wrapped {
            digest: [0xab; 32],
            proof: vec![0x00, 0xff],
        };
        let encoded = serde_json::to_string(&value).unwrap();
        assert!(encoded.contains(r#""proof":"00ff""#));
    }

    #[test]
    fn test_domain_hash_separates_domains() {
        assert_ne!(domain_hash(b"a", &[b"x"]), domain_hash(b"b", &[b"x"]));
    }
}
