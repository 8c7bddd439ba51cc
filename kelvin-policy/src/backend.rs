//! Artifact formats and loading backends.
use crate::error::PolicyError;
use crate::policy::{LinearPolicy, PolicySpec, SampleMode};
use crate::runtime::BackendRuntime;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// File a checkpoint directory must contain.
pub const CHECKPOINT_POLICY_FILE: &str = "policy.yaml";

/// The two supported artifact shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// Single-file archive.
    Archive,

    /// Directory-shaped checkpoint.
    Checkpoint,
}

impl ModelFormat {
    /// Classifies an artifact path by its shape.
    ///
    /// A regular file is an archive, a directory is a checkpoint; anything
    /// else (including a path that does not exist) is
    /// [`PolicyError::UnsupportedModelFormat`]. Content is not inspected
    /// here; a misshapen artifact of the right shape fails later, in its
    /// backend.
    pub fn from_path(path: &Path) -> Result<Self, PolicyError> {
        let meta = std::fs::metadata(path)
            .map_err(|_| PolicyError::UnsupportedModelFormat(path.to_path_buf()))?;
        if meta.is_file() {
            Ok(ModelFormat::Archive)
        } else if meta.is_dir() {
            Ok(ModelFormat::Checkpoint)
        } else {
            Err(PolicyError::UnsupportedModelFormat(path.to_path_buf()))
        }
    }

    /// Backend family name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Archive => "archive",
            ModelFormat::Checkpoint => "checkpoint",
        }
    }
}

/// Reads a policy artifact of one format into a [`PolicySpec`].
pub trait ModelBackend {
    /// The format this backend reads.
    fn format(&self) -> ModelFormat;

    /// Decodes the artifact at `path`.
    fn load_spec(&self, path: &Path) -> Result<PolicySpec, PolicyError>;
}

/// Backend for single-file archives: one bincode-encoded [`PolicySpec`].
pub struct ArchiveBackend;

impl ModelBackend for ArchiveBackend {
    fn format(&self) -> ModelFormat {
        ModelFormat::Archive
    }

    fn load_spec(&self, path: &Path) -> Result<PolicySpec, PolicyError> {
        let file = File::open(path).map_err(|e| PolicyError::MalformedArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        bincode::deserialize_from(BufReader::new(file)).map_err(|e| {
            PolicyError::MalformedArtifact {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }
}

/// Backend for directory checkpoints: a directory holding
/// [`CHECKPOINT_POLICY_FILE`] with a YAML-encoded [`PolicySpec`].
pub struct CheckpointBackend;

impl ModelBackend for CheckpointBackend {
    fn format(&self) -> ModelFormat {
        ModelFormat::Checkpoint
    }

    fn load_spec(&self, path: &Path) -> Result<PolicySpec, PolicyError> {
        let file_path = path.join(CHECKPOINT_POLICY_FILE);
        let file = File::open(&file_path).map_err(|e| PolicyError::MalformedArtifact {
            path: path.to_path_buf(),
            reason: format!("{}: {}", CHECKPOINT_POLICY_FILE, e),
        })?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| {
            PolicyError::MalformedArtifact {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }
}

/// The backend for a classified format.
pub fn backend_for(format: ModelFormat) -> Box<dyn ModelBackend> {
    match format {
        ModelFormat::Archive => Box::new(ArchiveBackend),
        ModelFormat::Checkpoint => Box::new(CheckpointBackend),
    }
}

/// Loads a trained policy from an artifact path.
///
/// Classifies the path, initializes the process-wide [`BackendRuntime`] for
/// the matching backend family (idempotent within a process), decodes the
/// artifact, and fixes the sampling mode for the run. Returns the policy
/// together with the runtime handle; the caller shuts the runtime down once
/// the run is over.
pub fn load_policy<E>(
    path: &Path,
    mode: SampleMode,
) -> Result<(LinearPolicy<E>, BackendRuntime), PolicyError> {
    let format = ModelFormat::from_path(path)?;
    let runtime = BackendRuntime::init(format);
    let backend = backend_for(format);
    let spec = backend.load_spec(path)?;
    let policy = LinearPolicy::from_spec(spec, mode)?;
    info!(
        "loaded {} policy from {:?} ({:?} mode)",
        format.name(),
        path,
        mode
    );
    Ok((policy, runtime))
}
