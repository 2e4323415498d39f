#![forbid(unsafe_code)]

//! CSV export for collected comments.
//!
//! Writes UTF-8 with RFC-4180 quoting: fields containing the delimiter,
//! quotes, or line breaks are wrapped in double quotes with embedded quotes
//! doubled. Nothing else is escaped, so non-ASCII authors and comment text
//! pass through untouched.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::comments::CommentRecord;

const HEADER: [&str; 4] = ["Number", "Timestamp", "Author", "Comment"];

/// Writes `comments` to `<data_dir>/<file_name>`, creating the directory if
/// needed, and returns the resolved path. Rows are numbered from 1 in arrival
/// order; the file is flushed before the handle is dropped so write errors
/// surface here instead of at close time.
pub fn write_comments_csv(
    comments: &[CommentRecord],
    data_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;

    let path = data_dir.join(file_name);
    let file =
        File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    write_row(&mut writer, &HEADER)
        .with_context(|| format!("writing header to {}", path.display()))?;
    for (index, comment) in comments.iter().enumerate() {
        let number = (index + 1).to_string();
        write_row(
            &mut writer,
            &[&number, &comment.timestamp, &comment.author, &comment.text],
        )
        .with_context(|| format!("writing row {} to {}", index + 1, path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    Ok(path)
}

fn write_row<W: Write>(writer: &mut W, fields: &[&str]) -> io::Result<()> {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            writer.write_all(b",")?;
        }
        writer.write_all(quote_field(field).as_bytes())?;
    }
    writer.write_all(b"\r\n")
}

fn quote_field(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
