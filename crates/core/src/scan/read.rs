use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Reads a UTF-8 text file, refusing files over `max_file_size` and files containing NUL
/// bytes. `display_path` is what errors report.
pub(crate) fn read_text_file(
    abs_path: &Path,
    display_path: &str,
    max_file_size: Option<u64>,
) -> Result<String> {
    let metadata = fs::symlink_metadata(abs_path).map_err(|err| not_found_or_io(display_path, err))?;
    if !metadata.is_file() {
        return Err(Error::FileNotFound {
            path: display_path.to_string(),
        });
    }
    if let Some(limit) = max_file_size
        && metadata.len() > limit
    {
        return Err(Error::FileTooLarge {
            path: display_path.to_string(),
            limit,
        });
    }

    let mut file = fs::File::open(abs_path).map_err(|err| not_found_or_io(display_path, err))?;

    // The file can grow after the metadata check; never read more than the cap allows.
    let mut bytes: Vec<u8> = Vec::with_capacity(metadata.len().min(1024 * 1024) as usize);
    let mut buf = [0u8; 16 * 1024];
    loop {
        let mut limit = buf.len() as u64;
        if let Some(max_file_size) = max_file_size {
            let remaining = max_file_size
                .saturating_add(1)
                .saturating_sub(bytes.len() as u64);
            limit = limit.min(remaining);
        }
        if limit == 0 {
            return Err(Error::FileTooLarge {
                path: display_path.to_string(),
                limit: max_file_size.unwrap_or_default(),
            });
        }

        let n = match file.read(&mut buf[..limit as usize]) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::io(display_path, err)),
        };
        if n == 0 {
            break;
        }
        if buf[..n].contains(&0) {
            return Err(Error::BinaryFile {
                path: display_path.to_string(),
            });
        }
        bytes.extend_from_slice(&buf[..n]);
    }

    if let Some(max_file_size) = max_file_size
        && bytes.len() as u64 > max_file_size
    {
        return Err(Error::FileTooLarge {
            path: display_path.to_string(),
            limit: max_file_size,
        });
    }

    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: display_path.to_string(),
    })
}

fn not_found_or_io(display_path: &str, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::FileNotFound {
            path: display_path.to_string(),
        }
    } else {
        Error::io(display_path, err)
    }
}
