use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads the template from `path`, or from stdin when no path is given.
pub fn read_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|source| Error::ReadError { path: path.to_path_buf(), source }),
        None => {
            log::debug!("Reading template from stdin");
            read_from(std::io::stdin()).map_err(Error::StdinReadError)
        }
    }
}

pub fn read_from(mut reader: impl std::io::Read) -> std::io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

/// Writes `content` to `dest_path` in one call, creating or truncating the file.
///
/// The file ends up with `OUTPUT_FILE_MODE` permissions on unix, even if it existed before.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    let write_error = |source| Error::WriteError { path: dest_path.to_path_buf(), source };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(crate::constants::OUTPUT_FILE_MODE);
    }

    let mut file = options.open(dest_path).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(crate::constants::OUTPUT_FILE_MODE);
        file.set_permissions(permissions).map_err(write_error)?;
    }
    file.write_all(content.as_bytes()).map_err(write_error)
}

pub fn write_to(mut writer: impl Write, content: &str) -> Result<()> {
    writer
        .write_all(content.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(Error::StdoutWriteError)
}
