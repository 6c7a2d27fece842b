//! Collision-free output file names.
//!
//! A requested name that is already taken gets a numeric counter:
//! `data.set` → `data_1.set` → `data_2.set`. An existing counter is replaced
//! rather than extended, so `data_1.set` moves on to `data_2.set`, never
//! `data_1_1.set`.
//!
//! Resolution only queries the filesystem. Two processes resolving the same
//! name concurrently can both get the same answer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{DatasetError, DatasetResult};

/// Default bound on counter attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Resolves free file names and remembers the ones it has handed out.
#[derive(Debug, Clone)]
pub struct FilenameResolver {
    extension: String,
    max_attempts: usize,
    claimed: HashSet<PathBuf>,
}

impl FilenameResolver {
    /// Resolver for files with `extension` (leading dot optional).
    pub fn new(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            claimed: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Resolve a free path for `requested`, falling back to `default` when the
    /// request is absent or empty.
    ///
    /// A path returned earlier by this resolver is treated as taken even if
    /// nothing has been written to it yet.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ExhaustedNameSpace`] if no free name is found
    /// within the attempt bound.
    pub fn resolve(&mut self, requested: Option<&Path>, default: &Path) -> DatasetResult<PathBuf> {
        let claimed = &self.claimed;
        let path = find_free(
            requested,
            default,
            &self.extension,
            self.max_attempts,
            |p| !p.exists() && !claimed.contains(p),
        )?;
        self.claimed.insert(path.clone());
        Ok(path)
    }
}

/// Stateless one-off resolution; see [`FilenameResolver::resolve`].
///
/// # Errors
///
/// Returns [`DatasetError::ExhaustedNameSpace`] after [`DEFAULT_MAX_ATTEMPTS`] taken names.
pub fn resolve_path(
    requested: Option<&Path>,
    default: &Path,
    extension: &str,
) -> DatasetResult<PathBuf> {
    find_free(
        requested,
        default,
        extension.trim_start_matches('.'),
        DEFAULT_MAX_ATTEMPTS,
        |p| !p.exists(),
    )
}

fn find_free(
    requested: Option<&Path>,
    default: &Path,
    extension: &str,
    max_attempts: usize,
    is_free: impl Fn(&Path) -> bool,
) -> DatasetResult<PathBuf> {
    let base = match requested {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => default,
    };
    let candidate = with_extension(base, extension);
    if is_free(&candidate) {
        return Ok(candidate);
    }

    let name = file_name(&candidate);
    let (stem, ext) = split_extension(&name, extension).unwrap_or((name.as_str(), extension));
    let root = strip_counter(stem);
    for counter in 1..=max_attempts {
        let next = candidate.with_file_name(format!("{root}_{counter}.{ext}"));
        if is_free(&next) {
            debug!(requested = %candidate.display(), resolved = %next.display(), "name taken, using counter");
            return Ok(next);
        }
    }

    Err(DatasetError::ExhaustedNameSpace {
        path: candidate,
        attempts: max_attempts,
    })
}

/// Append `.extension` unless the path already carries it, in any case.
fn with_extension(path: &Path, extension: &str) -> PathBuf {
    if split_extension(&file_name(path), extension).is_some() {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split `name` into stem and extension when its last extension matches
/// `extension` ignoring ASCII case. A leading-dot name such as `.set` has an
/// empty stem.
fn split_extension<'a>(name: &'a str, extension: &str) -> Option<(&'a str, &'a str)> {
    name.rsplit_once('.')
        .filter(|(_, ext)| ext.eq_ignore_ascii_case(extension))
}

/// Remove one trailing `_<digits>` counter from a file stem.
fn strip_counter(stem: &str) -> &str {
    match stem.rsplit_once('_') {
        Some((root, counter))
            if !root.is_empty()
                && !counter.is_empty()
                && counter.bytes().all(|b| b.is_ascii_digit()) =>
        {
            root
        }
        _ => stem,
    }
}
