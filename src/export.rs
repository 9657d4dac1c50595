//! CSV serialization of report rows.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::report::ReportRow;

/// Quote a field if it contains a delimiter, quote or line break.
pub fn escape_csv(s: &str) -> Cow<'_, str> {
    if s.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

/// Render a header line plus one line per row, each terminated by `\n`.
/// Columns follow `header`; labels missing from a row are written empty.
pub fn render_csv(header: &[&str], rows: &[ReportRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, header.iter().copied());
    for row in rows {
        push_line(&mut out, header.iter().map(|label| row.get(label).unwrap_or("")));
    }
    out
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    let line = fields.map(escape_csv).collect::<Vec<_>>().join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Create the parent directory of `path` if it does not exist yet.
/// Returns the directory when it had to be created.
pub fn ensure_parent_dir(path: &Path) -> Result<Option<PathBuf>, ReportError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir).map_err(|source| ReportError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            Ok(Some(dir.to_path_buf()))
        }
        _ => Ok(None),
    }
}

/// Write the report to `path` via a temp file + rename, so the destination
/// only ever holds a complete report.
pub fn write_csv(path: &Path, header: &[&str], rows: &[ReportRow]) -> Result<(), ReportError> {
    let wrap = |source: io::Error| ReportError::WriteReport {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| wrap(io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let data = render_csv(header, rows);
    let written = File::create(&tmp).and_then(|mut f| {
        f.write_all(data.as_bytes())?;
        f.flush()
    });
    if let Err(e) = written.and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(wrap(e));
    }
    Ok(())
}
