//! Bundle directory persistence: write and read a [`RunBundleV1`] on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   bundle_manifest.json   canonical JSON, full artifact listing
//!   bundle_digest.txt      ASCII digest string ("sha256:...")
//!   fixture.json           artifact (normative)
//!   search_trace.json      artifact (normative)
//!   report.txt             artifact (observational)
//! ```
//!
//! The directory path is never part of any hash surface. Reading is
//! fail-closed: missing declared artifacts, undeclared extra files, and any
//! hash or digest disagreement are errors.

use std::collections::BTreeSet;
use std::path::Path;

use octile_kernel::proof::canon::CanonError;
use octile_kernel::proof::hash::ContentHash;

use crate::bundle::{build_bundle, verify_bundle, BundleVerifyError, RunBundleV1, MANIFEST_SCHEMA_VERSION};

const MANIFEST_FILENAME: &str = "bundle_manifest.json";
const DIGEST_FILENAME: &str = "bundle_digest.txt";

/// Error writing or reading a bundle directory.
#[derive(Debug)]
pub enum BundleDirError {
    /// I/O failure on `path`.
    Io { path: String, source: std::io::Error },
    /// An artifact name would escape the bundle directory.
    UnsafeName { name: String },
    /// `bundle_manifest.json` is not a recognized manifest.
    ManifestInvalid { detail: String },
    /// `bundle_digest.txt` is not a bare `algorithm:hex` digest string.
    DigestInvalid { detail: String },
    /// A declared artifact file is missing.
    MissingArtifact { name: String },
    /// A file exists that the manifest does not declare.
    ExtraFile { name: String },
    /// Stored manifest bytes differ from the manifest rebuilt from disk contents.
    ManifestMismatch,
    /// `bundle_digest.txt` differs from the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
    /// Canonical JSON error while rebuilding.
    Canon(CanonError),
    /// The rebuilt bundle failed integrity verification.
    Verify(BundleVerifyError),
}

impl std::fmt::Display for BundleDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {path}: {source}"),
            Self::UnsafeName { name } => write!(f, "artifact name {name:?} is not a plain filename"),
            Self::ManifestInvalid { detail } => write!(f, "invalid bundle manifest: {detail}"),
            Self::DigestInvalid { detail } => write!(f, "invalid bundle digest file: {detail}"),
            Self::MissingArtifact { name } => write!(f, "missing artifact: {name}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ManifestMismatch => f.write_str("manifest does not match artifact files"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(f, "digest mismatch: stored={stored}, recomputed={recomputed}")
            }
            Self::Canon(e) => write!(f, "{e}"),
            Self::Verify(e) => write!(f, "bundle verification failed: {e}"),
        }
    }
}

impl std::error::Error for BundleDirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Canon(e) => Some(e),
            Self::Verify(e) => Some(e),
            _ => None,
        }
    }
}

/// Write every artifact plus the manifest and digest files into `dir`.
///
/// Creates the directory if it does not exist.
///
/// # Errors
///
/// Returns [`BundleDirError::Io`] on write failure, or
/// [`BundleDirError::UnsafeName`] for an artifact name containing a path
/// separator.
pub fn write_bundle_dir(bundle: &RunBundleV1, dir: &Path) -> Result<(), BundleDirError> {
    std::fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

    for artifact in bundle.artifacts.values() {
        check_name(&artifact.name)?;
        write_file(&dir.join(&artifact.name), &artifact.content)?;
    }
    write_file(&dir.join(MANIFEST_FILENAME), &bundle.manifest)?;
    write_file(&dir.join(DIGEST_FILENAME), bundle.digest.as_str().as_bytes())?;
    Ok(())
}

/// Read a bundle directory back into memory and verify it.
///
/// # Errors
///
/// Returns [`BundleDirError`] on any I/O, layout, hash, or digest failure.
pub fn read_bundle_dir(dir: &Path) -> Result<RunBundleV1, BundleDirError> {
    let manifest = read_file(&dir.join(MANIFEST_FILENAME))?;
    let stored_digest = parse_digest(&read_file(&dir.join(DIGEST_FILENAME))?)?;

    let declared = parse_manifest(&manifest)?;

    let mut inputs = Vec::with_capacity(declared.len());
    let mut names = BTreeSet::new();
    for (name, normative) in declared {
        check_name(&name)?;
        let path = dir.join(&name);
        if !path.is_file() {
            return Err(BundleDirError::MissingArtifact { name });
        }
        let content = read_file(&path)?;
        names.insert(name.clone());
        inputs.push((name, content, normative));
    }

    for entry in std::fs::read_dir(dir).map_err(|source| io_error(dir, source))? {
        let entry = entry.map_err(|source| io_error(dir, source))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name != MANIFEST_FILENAME && file_name != DIGEST_FILENAME && !names.contains(&file_name) {
            return Err(BundleDirError::ExtraFile { name: file_name });
        }
    }

    let bundle = build_bundle(inputs).map_err(BundleDirError::Canon)?;
    if bundle.manifest != manifest {
        return Err(BundleDirError::ManifestMismatch);
    }
    if stored_digest != bundle.digest {
        return Err(BundleDirError::DigestMismatch {
            stored: stored_digest.as_str().to_string(),
            recomputed: bundle.digest.as_str().to_string(),
        });
    }
    verify_bundle(&bundle).map_err(BundleDirError::Verify)?;
    Ok(bundle)
}

/// The digest file holds exactly the digest string, no surrounding whitespace.
fn parse_digest(bytes: &[u8]) -> Result<ContentHash, BundleDirError> {
    let text = std::str::from_utf8(bytes).map_err(|e| BundleDirError::DigestInvalid {
        detail: e.to_string(),
    })?;
    ContentHash::parse(text).ok_or_else(|| BundleDirError::DigestInvalid {
        detail: format!("{text:?} is not an algorithm:hex digest"),
    })
}

/// `(name, normative)` for each manifest entry.
fn parse_manifest(bytes: &[u8]) -> Result<Vec<(String, bool)>, BundleDirError> {
    let invalid = |detail: &str| BundleDirError::ManifestInvalid {
        detail: detail.to_string(),
    };
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| invalid(&e.to_string()))?;

    if value["schema_version"].as_str() != Some(MANIFEST_SCHEMA_VERSION) {
        return Err(invalid("unrecognized schema_version"));
    }
    let entries = value["artifacts"]
        .as_array()
        .ok_or_else(|| invalid("\"artifacts\" is not an array"))?;

    entries
        .iter()
        .map(|entry| {
            let name = entry["name"]
                .as_str()
                .ok_or_else(|| invalid("entry without \"name\""))?;
            let normative = entry["normative"]
                .as_bool()
                .ok_or_else(|| invalid("entry without \"normative\""))?;
            Ok((name.to_string(), normative))
        })
        .collect()
}

fn check_name(name: &str) -> Result<(), BundleDirError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && name != MANIFEST_FILENAME
        && name != DIGEST_FILENAME;
    if plain {
        Ok(())
    } else {
        Err(BundleDirError::UnsafeName {
            name: name.to_string(),
        })
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), BundleDirError> {
    std::fs::write(path, content).map_err(|source| io_error(path, source))
}

fn read_file(path: &Path) -> Result<Vec<u8>, BundleDirError> {
    std::fs::read(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> BundleDirError {
    BundleDirError::Io {
        path: path.display().to_string(),
        source,
    }
}
