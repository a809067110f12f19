//! Object framing: `"<kind> <len>\0" + payload`.
//!
//! The framed bytes are what gets hashed and what gets compressed to disk,
//! so the header is part of the identity of every object.

use vcs_types::ObjectKind;

use crate::object::Object;

/// Header parsing failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("no header terminator found")]
    MissingTerminator,

    #[error("bad header: {0}")]
    BadHeader(String),

    #[error("header declares {declared} payload bytes but {actual} follow")]
    LengthMismatch { declared: u64, actual: u64 },
}

/// Frame a payload. Total over its input: any payload, including empty.
pub fn frame(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let header = kind.header(payload.len() as u64);
    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(&header);
    framed.extend_from_slice(payload);
    framed
}

/// Split framed bytes back into an object, checking the declared length
/// against the bytes that actually follow the terminator.
pub fn unframe(mut framed: Vec<u8>) -> Result<Object, FrameError> {
    let nul = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or(FrameError::MissingTerminator)?;
    let (kind, declared) = parse_header(&framed[..nul])?;

    let data = framed.split_off(nul + 1);
    let actual = data.len() as u64;
    if actual != declared {
        return Err(FrameError::LengthMismatch { declared, actual });
    }
    Ok(Object::new(kind, data))
}

fn parse_header(header: &[u8]) -> Result<(ObjectKind, u64), FrameError> {
    let header = std::str::from_utf8(header)
        .map_err(|_| FrameError::BadHeader("header is not valid UTF-8".into()))?;
    let (tag, len) = header
        .split_once(' ')
        .ok_or_else(|| FrameError::BadHeader(format!("missing length field in {header:?}")))?;

    let kind = tag
        .parse::<ObjectKind>()
        .map_err(|e| FrameError::BadHeader(e.to_string()))?;

    // Canonical decimal only: no sign, no padding, no leading zeros.
    let canonical = !len.is_empty()
        && len.bytes().all(|b| b.is_ascii_digit())
        && (len == "0" || !len.starts_with('0'));
    if !canonical {
        return Err(FrameError::BadHeader(format!("invalid length field {len:?}")));
    }
    let declared = len
        .parse::<u64>()
        .map_err(|e| FrameError::BadHeader(format!("invalid length field {len:?}: {e}")))?;

    Ok((kind, declared))
}
