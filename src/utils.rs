use std::{
    fs,
    io::{BufReader, Bytes, Read},
    path::Path,
};

use crate::error::{err, ErrorKind, Result};

/// Strips the angle brackets around a content id: `<logo@example>` becomes `logo@example`.
pub fn extract_cid(cid: Option<&str>) -> Option<String> {
    cid.map(|cid| cid.replace(|c: char| c == '<' || c == '>', ""))
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: Option<&str>) -> Option<String> {
    text.map(|text| text.replace("\r\n", "\n").replace('\r', "\n"))
}

pub fn default_to<T>(value: Option<T>, default: Option<T>) -> Option<T> {
    value.or(default)
}

pub fn read_file_content<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();

    if !path.exists() {
        err!(
            ErrorKind::InvalidArgument,
            "File not found: {}",
            path.display()
        );
    }

    Ok(fs::read_to_string(path)?)
}

/// Compares two readers byte by byte until either runs out.
pub fn streams_equal<A: Read, B: Read>(left: A, right: B) -> Result<bool> {
    let mut left = BufReader::new(left).bytes();
    let mut right = BufReader::new(right).bytes();

    loop {
        match (next_byte(&mut left)?, next_byte(&mut right)?) {
            (None, None) => return Ok(true),
            (Some(l), Some(r)) if l == r => continue,
            _ => return Ok(false),
        }
    }
}

fn next_byte<R: Read>(bytes: &mut Bytes<BufReader<R>>) -> Result<Option<u8>> {
    Ok(bytes.next().transpose()?)
}
