//! Backing file storage for chkconfig flags.
//!
//! Each flag is stored as a file named after the flag directly inside a
//! flag directory. The file holds `on` or `off` followed by a newline; an
//! empty file reads as `off`.
//!
//! This module works on one directory at a time. Precedence between the
//! state and default directories is handled by [`crate::context`], using
//! [`union`] for listings.

pub mod union;

pub use union::{union_by_flag, union_count};

use crate::models::{FlagStateTuple, Origin, state_from_bytes, state_to_str};
use crate::{Error, Result};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Capacity, in bytes including a terminator, of a backing file path.
pub const MAX_PATH_LEN: usize = 4096;

/// Mode for newly created backing files, before the umask is applied.
#[cfg(unix)]
pub const FLAG_FILE_MODE: u32 = 0o666;

/// Build the backing file path `<directory>/<flag>`.
///
/// Fails if either component is empty, if `capacity` is zero, or if the
/// path and its terminator would not fit in `capacity` bytes.
pub fn flag_path(directory: &Path, flag: &str, capacity: usize) -> Result<PathBuf> {
    if directory.as_os_str().is_empty() {
        return Err(Error::InvalidArgument(
            "flag directory must not be empty".to_string(),
        ));
    }
    if flag.is_empty() {
        return Err(Error::InvalidArgument(
            "flag name must not be empty".to_string(),
        ));
    }
    if capacity == 0 {
        return Err(Error::InvalidArgument(
            "path capacity must be non-zero".to_string(),
        ));
    }

    let length = directory.as_os_str().len() + 1 + flag.len();
    if length >= capacity {
        return Err(Error::Overflow(format!(
            "path for flag '{}' in {} is {} bytes, limit is {}",
            flag,
            directory.display(),
            length,
            capacity - 1
        )));
    }

    let mut path = OsString::with_capacity(length);
    path.push(directory.as_os_str());
    path.push("/");
    path.push(flag);

    Ok(PathBuf::from(path))
}

/// Read the state of a single backing file.
///
/// A missing file reads as `(false, Origin::None)`. When
/// `nonexistent_is_error` is set the absence is reported as
/// [`Error::NoSuchEntry`] instead, so a caller with a fallback directory
/// can try there next. An empty file reads as `false` with `origin`.
pub fn read_state(
    path: &Path,
    origin: Origin,
    nonexistent_is_error: bool,
) -> Result<(bool, Origin)> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no backing file");
            if nonexistent_is_error {
                return Err(Error::NoSuchEntry(path.to_path_buf()));
            }
            return Ok((false, Origin::None));
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let metadata = file.metadata().map_err(|e| Error::io(path, e))?;
    // Some filesystems report directories as zero-length.
    if metadata.is_dir() {
        return Err(Error::io(
            path,
            io::Error::from(io::ErrorKind::IsADirectory),
        ));
    }
    if metadata.len() == 0 {
        tracing::debug!(path = %path.display(), %origin, "empty backing file");
        return Ok((false, origin));
    }

    let mut data = Vec::with_capacity(metadata.len() as usize);
    file.read_to_end(&mut data)
        .map_err(|e| Error::io(path, e))?;

    let state = state_from_bytes(&data)?;
    tracing::debug!(path = %path.display(), state = state_to_str(state), %origin, "read flag");

    Ok((state, origin))
}

/// Write the state of a single backing file in `directory`.
///
/// The file is truncated and rewritten. It is only created when `create`
/// is set; otherwise a missing file fails with [`Error::NoSuchEntry`].
pub fn write_state(directory: &Path, flag: &str, state: bool, create: bool) -> Result<()> {
    let path = flag_path(directory, flag, MAX_PATH_LEN)?;

    let mut options = OpenOptions::new();
    options.write(true).truncate(true).create(create);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FLAG_FILE_MODE);
    }

    let mut file = match options.open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NoSuchEntry(path));
        }
        Err(e) => return Err(Error::io(&path, e)),
    };

    let content = format!("{}\n", state_to_str(state));
    file.write_all(content.as_bytes()).map_err(|e| {
        Error::Overflow(format!(
            "failed to write state to {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), state = state_to_str(state), "wrote flag");

    Ok(())
}

/// List every flag backed by a regular file in `directory`.
///
/// Entries that are not regular files are skipped. Any failure to inspect
/// or read an entry aborts the listing. The result is in directory order.
pub fn list_directory(directory: &Path, origin: Origin) -> Result<Vec<FlagStateTuple>> {
    let mut tuples = Vec::new();

    for (flag, path) in regular_files(directory)? {
        let (state, origin) = read_state(&path, origin, false)?;
        tuples.push(FlagStateTuple::new(flag, state, origin));
    }

    tracing::debug!(
        directory = %directory.display(),
        count = tuples.len(),
        "listed flags"
    );

    Ok(tuples)
}

/// Count the flags backed by a regular file in `directory`.
pub fn count_directory(directory: &Path) -> Result<usize> {
    Ok(regular_files(directory)?.len())
}

/// Collect `(flag, path)` for every regular file in `directory`.
fn regular_files(directory: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(directory).map_err(|e| Error::io(directory, e))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(directory, e))?;

        let flag = match entry.file_name().into_string() {
            Ok(flag) => flag,
            Err(name) => {
                tracing::warn!(
                    directory = %directory.display(),
                    name = %name.to_string_lossy(),
                    "skipping backing file with a non UTF-8 name"
                );
                continue;
            }
        };

        let path = flag_path(directory, &flag, MAX_PATH_LEN)?;

        // Follows symlinks, so a link to a regular file counts as a flag.
        let metadata = fs::metadata(&path).map_err(|e| Error::io(&path, e))?;
        if !metadata.is_file() {
            tracing::debug!(path = %path.display(), "skipping non-regular entry");
            continue;
        }

        files.push((flag, path));
    }

    Ok(files)
}
