//! In-memory artifact bundle: the output of a fixture run.
//!
//! No file I/O in this module (see [`crate::bundle_dir`] for persistence).
//!
//! # Normative vs observational artifacts
//!
//! Each artifact is tagged `normative` (participates in the bundle digest)
//! or observational (listed in the manifest but excluded from the digest).
//! `report.txt` is observational: it is a rendering of the trace, and the
//! trace itself is normative.
//!
//! The bundle digest is computed over the **digest basis**: a canonical
//! JSON projection of normative artifact hashes only.

use std::collections::BTreeMap;
use std::path::Path;

use octile_kernel::proof::canon::{canonical_json_bytes, CanonError};
use octile_kernel::proof::hash::{
    canonical_hash, ContentHash, DOMAIN_BUNDLE_ARTIFACT, DOMAIN_BUNDLE_DIGEST,
};

/// Manifest schema tag.
pub const MANIFEST_SCHEMA_VERSION: &str = "octile_bundle.v1";

/// Digest basis schema tag.
pub const DIGEST_BASIS_SCHEMA_VERSION: &str = "octile_bundle_digest_basis.v1";

/// A single artifact in the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    /// Logical filename (e.g., `"fixture.json"`).
    pub name: String,
    /// Raw bytes of the artifact.
    pub content: Vec<u8>,
    /// `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
    pub content_hash: ContentHash,
    /// Whether this artifact participates in the bundle digest.
    pub normative: bool,
}

/// The complete artifact bundle from a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunBundleV1 {
    /// Artifacts indexed by logical name, in sorted order.
    pub artifacts: BTreeMap<String, BundleArtifact>,
    /// Canonical JSON listing all artifacts with normative flags.
    pub manifest: Vec<u8>,
    /// Canonical JSON listing normative artifact hashes only.
    pub digest_basis: Vec<u8>,
    /// `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
    pub digest: ContentHash,
}

impl RunBundleV1 {
    /// Look up an artifact by name.
    #[must_use]
    pub fn artifact(&self, name: &str) -> Option<&BundleArtifact> {
        self.artifacts.get(name)
    }
}

/// Build a bundle from `(name, content, normative)` triples.
///
/// Later entries with a repeated name replace earlier ones.
///
/// # Errors
///
/// Returns [`CanonError`] if the manifest or digest basis cannot be
/// serialized.
pub fn build_bundle(artifacts: Vec<(String, Vec<u8>, bool)>) -> Result<RunBundleV1, CanonError> {
    let artifacts: BTreeMap<String, BundleArtifact> = artifacts
        .into_iter()
        .map(|(name, content, normative)| {
            let content_hash = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &content);
            (
                name.clone(),
                BundleArtifact {
                    name,
                    content,
                    content_hash,
                    normative,
                },
            )
        })
        .collect();

    let manifest = manifest_bytes(&artifacts)?;
    let digest_basis = digest_basis_bytes(&artifacts)?;
    let digest = canonical_hash(DOMAIN_BUNDLE_DIGEST, &digest_basis);

    Ok(RunBundleV1 {
        artifacts,
        manifest,
        digest_basis,
        digest,
    })
}

/// Error from bundle integrity verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleVerifyError {
    /// An artifact's stored `content_hash` does not match the recomputed hash.
    ContentHashMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
    /// An artifact is stored under a key different from its own name.
    NameMismatch { key: String, name: String },
    /// Stored `manifest` bytes do not match the manifest recomputed from artifacts.
    ManifestMismatch,
    /// Stored `digest_basis` bytes do not match the recomputed normative projection.
    DigestBasisMismatch,
    /// Stored `digest` does not match the recomputed hash of `digest_basis`.
    DigestMismatch { expected: String, actual: String },
    /// A normative JSON artifact is not in canonical JSON form.
    ArtifactNotCanonical { artifact: String },
    /// Canonical JSON error during verification.
    Canon(CanonError),
}

impl std::fmt::Display for BundleVerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentHashMismatch {
                artifact,
                expected,
                actual,
            } => write!(
                f,
                "content hash mismatch for {artifact}: stored {expected}, recomputed {actual}"
            ),
            Self::NameMismatch { key, name } => {
                write!(f, "artifact stored under {key} is named {name}")
            }
            Self::ManifestMismatch => f.write_str("manifest does not match artifacts"),
            Self::DigestBasisMismatch => f.write_str("digest basis does not match artifacts"),
            Self::DigestMismatch { expected, actual } => {
                write!(f, "bundle digest mismatch: stored {expected}, recomputed {actual}")
            }
            Self::ArtifactNotCanonical { artifact } => {
                write!(f, "normative artifact {artifact} is not canonical JSON")
            }
            Self::Canon(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BundleVerifyError {}

impl From<CanonError> for BundleVerifyError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Verify the internal consistency of a bundle.
///
/// Proves:
///
/// 1. Each artifact's `content_hash` matches `canonical_hash(DOMAIN_BUNDLE_ARTIFACT, content)`.
/// 2. `manifest` bytes match the projection recomputed from all artifacts.
/// 3. `digest_basis` bytes match the projection recomputed from normative artifacts.
/// 4. `digest` matches `canonical_hash(DOMAIN_BUNDLE_DIGEST, digest_basis)`.
/// 5. Normative `.json` artifacts are in canonical form.
///
/// It does not re-run the search.
///
/// # Errors
///
/// Returns the first [`BundleVerifyError`] encountered.
pub fn verify_bundle(bundle: &RunBundleV1) -> Result<(), BundleVerifyError> {
    for (key, artifact) in &bundle.artifacts {
        if *key != artifact.name {
            return Err(BundleVerifyError::NameMismatch {
                key: key.clone(),
                name: artifact.name.clone(),
            });
        }
        let recomputed = canonical_hash(DOMAIN_BUNDLE_ARTIFACT, &artifact.content);
        if recomputed != artifact.content_hash {
            return Err(BundleVerifyError::ContentHashMismatch {
                artifact: artifact.name.clone(),
                expected: artifact.content_hash.as_str().to_string(),
                actual: recomputed.as_str().to_string(),
            });
        }
    }

    if manifest_bytes(&bundle.artifacts)? != bundle.manifest {
        return Err(BundleVerifyError::ManifestMismatch);
    }
    if digest_basis_bytes(&bundle.artifacts)? != bundle.digest_basis {
        return Err(BundleVerifyError::DigestBasisMismatch);
    }

    let recomputed = canonical_hash(DOMAIN_BUNDLE_DIGEST, &bundle.digest_basis);
    if recomputed != bundle.digest {
        return Err(BundleVerifyError::DigestMismatch {
            expected: bundle.digest.as_str().to_string(),
            actual: recomputed.as_str().to_string(),
        });
    }

    for artifact in bundle.artifacts.values() {
        if artifact.normative
            && Path::new(&artifact.name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            && !is_canonical_json(&artifact.content)
        {
            return Err(BundleVerifyError::ArtifactNotCanonical {
                artifact: artifact.name.clone(),
            });
        }
    }

    Ok(())
}

fn manifest_bytes(
    artifacts: &BTreeMap<String, BundleArtifact>,
) -> Result<Vec<u8>, CanonError> {
    let entries: Vec<serde_json::Value> = artifacts
        .values()
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
                "normative": a.normative,
            })
        })
        .collect();

    canonical_json_bytes(&serde_json::json!({
        "artifacts": entries,
        "schema_version": MANIFEST_SCHEMA_VERSION,
    }))
}

fn digest_basis_bytes(artifacts: &BTreeMap<String, BundleArtifact>) -> Result<Vec<u8>, CanonError> {
    let entries: Vec<serde_json::Value> = artifacts
        .values()
        .filter(|a| a.normative)
        .map(|a| {
            serde_json::json!({
                "content_hash": a.content_hash.as_str(),
                "name": a.name,
            })
        })
        .collect();

    canonical_json_bytes(&serde_json::json!({
        "artifacts": entries,
        "schema_version": DIGEST_BASIS_SCHEMA_VERSION,
    }))
}

/// Parse, re-canonicalize and compare.
fn is_canonical_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .ok()
        .and_then(|v| canonical_json_bytes(&v).ok())
        .is_some_and(|canon| canon == bytes)
}
