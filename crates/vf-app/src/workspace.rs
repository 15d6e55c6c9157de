//! Per-request scratch directories for solver input.
//!
//! Layout is `<root>/<identity>/req-XXXXXX/circuit.cir`. Each request gets
//! its own temporary directory, so two requests from the same identity never
//! touch the same file. A [`Workspace`] removes its directory when closed or
//! dropped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// File name of the netlist inside a workspace.
pub const NETLIST_FILE: &str = "circuit.cir";

const ANONYMOUS: &str = "anonymous";
const REQUEST_PREFIX: &str = "req-";
const OPEN_ATTEMPTS: usize = 3;

/// Directory under which all workspaces are created.
#[derive(Debug, Clone)]
pub struct WorkspaceRoot {
    root: PathBuf,
}

impl WorkspaceRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory holding all workspaces of `identity`.
    pub fn identity_dir(&self, identity: &str) -> PathBuf {
        self.root.join(sanitize_identity(identity))
    }

    /// Create a fresh workspace for one request.
    pub fn open(&self, identity: &str) -> AppResult<Workspace> {
        let request_id = Uuid::new_v4();
        let identity_dir = self.identity_dir(identity);

        // A concurrent close may remove the identity directory between the
        // mkdir and the temp dir creation; retry in that case.
        let mut attempt = 1;
        let dir = loop {
            let created = fs::create_dir_all(&identity_dir).and_then(|()| {
                tempfile::Builder::new()
                    .prefix(REQUEST_PREFIX)
                    .tempdir_in(&identity_dir)
            });
            match created {
                Ok(dir) => break dir,
                Err(e) if e.kind() == ErrorKind::NotFound && attempt < OPEN_ATTEMPTS => {
                    attempt += 1;
                }
                Err(source) => {
                    return Err(AppError::Workspace {
                        path: identity_dir,
                        source,
                    });
                }
            }
        };

        tracing::debug!(path = %dir.path().display(), %request_id, "workspace opened");
        Ok(Workspace {
            identity_dir,
            dir,
            request_id,
        })
    }
}

/// One request's scratch directory, removed by [`close`] or on drop.
///
/// [`close`]: Workspace::close
#[derive(Debug)]
pub struct Workspace {
    identity_dir: PathBuf,
    dir: TempDir,
    request_id: Uuid,
}

impl Workspace {
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn netlist_path(&self) -> PathBuf {
        self.dir.path().join(NETLIST_FILE)
    }

    /// Write the netlist, replacing any earlier one. Returns its path.
    pub fn write(&self, netlist: &str) -> AppResult<PathBuf> {
        let path = self.netlist_path();
        fs::write(&path, netlist).map_err(|source| AppError::Workspace {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Remove the workspace, then the identity directory if nothing else
    /// uses it. Errors are logged, never returned.
    pub fn close(self) {
        let Workspace {
            identity_dir, dir, ..
        } = self;
        let path = dir.path().to_path_buf();

        match dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "workspace removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove workspace");
            }
        }

        // Fails while other requests of the same identity are in flight.
        let _ = fs::remove_dir(&identity_dir);
    }
}

/// Map an identity onto one safe path segment.
pub fn sanitize_identity(identity: &str) -> String {
    let cleaned: String = identity
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        ANONYMOUS.to_string()
    } else {
        cleaned
    }
}
