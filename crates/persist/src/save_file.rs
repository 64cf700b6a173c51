//! Single-file city saves.
//!
//! Layout:
//! ```text
//! magic           4 bytes   "LCNG"
//! schema version  4 bytes   u32 little-endian
//! payload hash   32 bytes   SHA-256 of the payload
//! payload         rest      zstd-compressed CBOR of the World
//! ```

use crate::gateway::WorldPersistence;
use lincity_kernel::{ConstructionRegistry, World, WorldError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::Path;

pub const MAGIC: [u8; 4] = *b"LCNG";
/// Current save schema version.
pub const SCHEMA_VERSION: u32 = 1;

const HASH_LEN: usize = 32;
const HEADER_LEN: usize = MAGIC.len() + 4 + HASH_LEN;

/// Errors from reading or writing a save file.
#[derive(Debug, thiserror::Error)]
pub enum SaveFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CBOR serialization error: {0}")]
    CborEncode(String),
    #[error("CBOR deserialization error: {0}")]
    CborDecode(String),
    #[error("not a city save file")]
    BadMagic,
    #[error("save file is truncated ({0} bytes)")]
    Truncated(usize),
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },
    #[error("invalid world: {0}")]
    InvalidWorld(#[from] WorldError),
}

/// The on-disk save format. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveFile;

impl WorldPersistence for SaveFile {
    type Error = SaveFileError;

    fn save(&self, world: &World, path: &Path) -> Result<(), SaveFileError> {
        write_world(world, path)
    }

    fn load(&self, path: &Path, registry: &ConstructionRegistry) -> Result<World, SaveFileError> {
        read_world(path, registry)
    }
}

/// Serialize `world` and write it to `path`, replacing any existing file.
pub fn write_world(world: &World, path: &Path) -> Result<(), SaveFileError> {
    std::fs::write(path, encode(world)?)?;
    Ok(())
}

/// Read a world from `path` and check it against `registry`.
pub fn read_world(path: &Path, registry: &ConstructionRegistry) -> Result<World, SaveFileError> {
    let bytes = std::fs::read(path)?;
    let world = decode(&bytes)?;
    world.validate(registry)?;
    Ok(world)
}

/// Encode a world into the full file image.
pub fn encode(world: &World) -> Result<Vec<u8>, SaveFileError> {
    let payload = zstd_compress(&cbor_serialize(world)?)?;
    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    out.extend_from_slice(&sha256(&payload));
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Decode a file image. Does not consult the registry.
pub fn decode(bytes: &[u8]) -> Result<World, SaveFileError> {
    if bytes.len() < MAGIC.len() {
        return Err(SaveFileError::Truncated(bytes.len()));
    }
    let (magic, rest) = bytes.split_at(MAGIC.len());
    if magic != MAGIC {
        return Err(SaveFileError::BadMagic);
    }
    if bytes.len() < HEADER_LEN {
        return Err(SaveFileError::Truncated(bytes.len()));
    }
    let (version, rest) = rest.split_at(4);
    let (expected_hash, payload) = rest.split_at(HASH_LEN);

    let mut version_bytes = [0u8; 4];
    version_bytes.copy_from_slice(version);
    let file_version = u32::from_le_bytes(version_bytes);
    if file_version != SCHEMA_VERSION {
        return Err(SaveFileError::SchemaMismatch {
            file_version,
            expected_version: SCHEMA_VERSION,
        });
    }

    let actual_hash = sha256(payload);
    if actual_hash.as_slice() != expected_hash {
        return Err(SaveFileError::IntegrityMismatch {
            expected: hex(expected_hash),
            actual: hex(&actual_hash),
        });
    }

    cbor_deserialize(&zstd_decompress(payload)?)
}

fn cbor_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, SaveFileError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| SaveFileError::CborEncode(e.to_string()))?;
    Ok(buf)
}

fn cbor_deserialize<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, SaveFileError> {
    ciborium::from_reader(data).map_err(|e| SaveFileError::CborDecode(e.to_string()))
}

fn zstd_compress(data: &[u8]) -> Result<Vec<u8>, SaveFileError> {
    let mut encoder = zstd::Encoder::new(Vec::new(), 3)?;
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn zstd_decompress(data: &[u8]) -> Result<Vec<u8>, SaveFileError> {
    let mut decoder = zstd::Decoder::new(data)?;
    let mut buf = Vec::new();
    decoder.read_to_end(&mut buf)?;
    Ok(buf)
}

fn sha256(data: &[u8]) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
