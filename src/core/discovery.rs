//! # Environment Discovery
//!
//! Decides which virtual environment a target specifier refers to. The
//! procedure is a read-only scan of the filesystem: it never creates,
//! modifies or deletes anything.
//!
//! Resolution order:
//!
//! 1. **No target**: the preferred names (`.venv`, `venv`, `env`, `.env`) are
//!    tried in the start directory, then in each parent up to the root.
//! 2. **Existing path**: the path itself if it is an environment, otherwise
//!    the environments directly inside it (no upward walk).
//! 3. **Bare name**: `<workon_home>/<name>`.
use crate::{
    constants::{ACTIVATION_MARKERS, MARKER_FILE, PREFERRED_NAMES},
    models::{ResolveOptions, ResolvedEnv},
};
use std::{
    collections::HashSet,
    fmt, fs, io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;

/// Where a search looked before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// The start directory and all of its parents.
    Upward(PathBuf),
    /// A single directory given as the target.
    Directory(PathBuf),
    /// A name looked up inside the workon-home directory.
    WorkonHome {
        /// The workon-home directory.
        home: PathBuf,
        /// The name that was looked up.
        name: String,
    },
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upward(start) => write!(
                f,
                "No virtual environment found in '{}' or any parent directory. Create one (e.g., '.venv') or pass a path.",
                start.display()
            ),
            Self::Directory(dir) => write!(
                f,
                "Path does not appear to contain a virtual environment: {}",
                dir.display()
            ),
            Self::WorkonHome { home, name } => write!(
                f,
                "No virtual environment named '{}' in WORKON_HOME ({}).",
                name,
                home.display()
            ),
        }
    }
}

/// Why a target could not be resolved to exactly one environment.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Nothing passed the marker check.
    #[error("{scope}")]
    NotFound {
        /// Where the search looked.
        scope: SearchScope,
    },
    /// More than one environment matched and none was chosen.
    #[error(
        "Multiple virtual environments found in {}. Choose one by passing a path or name:\n{}",
        .context.display(),
        numbered_list(.candidates)
    )]
    AmbiguousCandidates {
        /// The directory the candidates were found in.
        context: PathBuf,
        /// The matches, in priority order.
        candidates: Vec<PathBuf>,
    },
    /// The target is neither an existing path nor a name in workon-home.
    #[error("Cannot resolve virtual environment from argument: {0}")]
    InvalidTarget(String),
    /// A directory could not be listed.
    #[error("Filesystem Error while scanning '{path}': {source}")]
    Io {
        /// The directory being scanned.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Renders candidates as `  1) /path` lines, as shown in ambiguity reports.
pub fn numbered_list(candidates: &[PathBuf]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, p)| format!("  {}) {}", i + 1, p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Returns `true` if `path` is a directory that looks like a Python virtual environment.
///
/// `pyvenv.cfg` is checked first; trees without it (some older virtualenv
/// layouts) are accepted if any known activation script exists. Symlinks are
/// followed for both the directory and the marker files.
pub fn is_venv_dir(path: &Path) -> bool {
    if path.as_os_str().is_empty() || !path.is_dir() {
        return false;
    }
    if path.join(MARKER_FILE).exists() {
        return true;
    }
    ACTIVATION_MARKERS
        .iter()
        .any(|script| path.join(script).exists())
}

/// Returns the valid environments among the preferred names directly under `dir`,
/// in priority order. Names that resolve to the same directory count once.
pub fn named_candidates(dir: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for name in PREFERRED_NAMES {
        let candidate = dir.join(name);
        log::trace!("Trying candidate: {}", candidate.display());
        if is_venv_dir(&candidate) && seen.insert(identity_of(&candidate)) {
            found.push(candidate);
        }
    }
    found
}

/// Returns every environment directly under `root`: the preferred names first,
/// then any other subdirectory that passes the marker check, alphabetically.
///
/// A missing `root` yields an empty list; other I/O errors are reported.
pub fn list_venvs_in_dir(root: &Path) -> DiscoveryResult<Vec<PathBuf>> {
    let mut found = named_candidates(root);
    let mut seen: HashSet<PathBuf> = found.iter().map(|p| identity_of(p)).collect();

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(found),
        Err(source) => {
            return Err(DiscoveryError::Io {
                path: root.to_path_buf(),
                source,
            });
        }
    };

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            children.push(path);
        }
    }
    children.sort();

    for child in children {
        if is_venv_dir(&child) && seen.insert(identity_of(&child)) {
            found.push(child);
        }
    }
    Ok(found)
}

/// Walks from `start` up to the filesystem root, returning the candidates of the
/// first directory that has any.
///
/// The walk is bounded by `Path::ancestors`, which ends at the root component.
pub fn find_nearest_venvs(start: &Path) -> Option<(PathBuf, Vec<PathBuf>)> {
    for dir in start.ancestors() {
        let found = named_candidates(dir);
        if !found.is_empty() {
            log::debug!(
                "Found {} candidate(s) in '{}'",
                found.len(),
                dir.display()
            );
            return Some((dir.to_path_buf(), found));
        }
    }
    None
}

/// Resolves a target specifier to a single virtual environment.
///
/// Ambiguity is always returned as `DiscoveryError::AmbiguousCandidates`;
/// choosing among the candidates is left to the caller.
pub fn resolve(target: Option<&str>, options: &ResolveOptions) -> DiscoveryResult<ResolvedEnv> {
    let start = absolute_start(&options.start_dir)?;
    // Only a blank target means "search"; anything else is taken as typed.
    let target = target.filter(|t| !t.trim().is_empty());

    let Some(target) = target else {
        log::debug!("No target given, searching from '{}'", start.display());
        return match find_nearest_venvs(&start) {
            Some((dir, candidates)) => pick_single(dir, candidates),
            None => Err(DiscoveryError::NotFound {
                scope: SearchScope::Upward(start),
            }),
        };
    };

    let as_path = without_cur_dir(&start.join(target));
    if as_path.exists() {
        log::debug!("Target '{}' is an existing path", target);
        // Keep absolute targets byte-for-byte as given.
        let target_path = if Path::new(target).is_absolute() {
            PathBuf::from(target)
        } else {
            as_path
        };
        if is_venv_dir(&target_path) {
            return Ok(ResolvedEnv::new(target_path));
        }
        let candidates = if target_path.is_dir() {
            list_venvs_in_dir(&target_path)?
        } else {
            Vec::new()
        };
        if candidates.is_empty() {
            return Err(DiscoveryError::NotFound {
                scope: SearchScope::Directory(target_path),
            });
        }
        return pick_single(target_path, candidates);
    }

    if is_bare_name(target) {
        if let Some(home) = &options.workon_home {
            let candidate = home.join(target);
            log::debug!("Looking up '{}' in WORKON_HOME: {}", target, candidate.display());
            if is_venv_dir(&candidate) {
                return Ok(ResolvedEnv::new(candidate));
            }
            return Err(DiscoveryError::NotFound {
                scope: SearchScope::WorkonHome {
                    home: home.clone(),
                    name: target.to_string(),
                },
            });
        }
        log::debug!("'{}' looks like a name, but no WORKON_HOME is configured", target);
    }

    Err(DiscoveryError::InvalidTarget(target.to_string()))
}

fn pick_single(context: PathBuf, mut candidates: Vec<PathBuf>) -> DiscoveryResult<ResolvedEnv> {
    if candidates.len() == 1 {
        let only = candidates.remove(0);
        return Ok(ResolvedEnv::new(only));
    }
    Err(DiscoveryError::AmbiguousCandidates {
        context,
        candidates,
    })
}

/// A bare name has no path separators and is not a relative path component.
fn is_bare_name(target: &str) -> bool {
    !target.contains('/') && !target.contains('\\') && target != "." && target != ".."
}

/// Drops `.` components, so `./envs/.` and `envs` name the same path.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

fn absolute_start(start: &Path) -> DiscoveryResult<PathBuf> {
    std::path::absolute(start).map_err(|source| DiscoveryError::Io {
        path: start.to_path_buf(),
        source,
    })
}

/// The canonical location of a directory, used to avoid counting a
/// symlinked name twice. Falls back to the path itself if it cannot be resolved.
fn identity_of(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
