//! Serialization helpers for [`Trace`]s.
//!
//! JSON and CBOR read/write utilities with extension-based auto-detection.
//! Unknown/missing extensions are rejected for reads and default to JSON
//! for writes. `.jsonl` / `.ndjson` route to [`crate::io_jsonl`], whose
//! functions are re-exported here.
//!
//! Extras:
//! - In-memory CBOR helpers: [`to_cbor`] / [`from_cbor`]; CBOR output is
//!   deterministic, which is how determinism of whole traces is checked.

use crate::Trace;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

pub use crate::io_jsonl::{read_trace_jsonl, stream_frames_jsonl, write_trace_jsonl};

/// Ensure the parent directory for a file exists (no-op if none).
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", display(path)))?;
        }
    }
    Ok(())
}

/* ---------------- JSON ---------------- */

/// Read a trace from **JSON**.
pub fn read_trace_json<K, S, P>(path: P) -> Result<Trace<K, S>>
where
    K: DeserializeOwned,
    S: DeserializeOwned,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let rdr = BufReader::new(f);
    let v = serde_json::from_reader(rdr).with_context(|| "deserialize JSON trace")?;
    Ok(v)
}

/// Write a trace to **JSON** (pretty).
pub fn write_trace_json<K, S, P>(path: P, v: &Trace<K, S>) -> Result<()>
where
    K: Serialize,
    S: Serialize,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, v).with_context(|| "serialize JSON trace")?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

/* ---------------- CBOR ---------------- */

/// Read a trace from **CBOR**.
pub fn read_trace_cbor<K, S, P>(path: P) -> Result<Trace<K, S>>
where
    K: DeserializeOwned,
    S: DeserializeOwned,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let mut rdr = BufReader::new(f);
    let v = ciborium::de::from_reader(&mut rdr).with_context(|| "deserialize CBOR trace")?;
    Ok(v)
}

/// Write a trace to **CBOR**.
pub fn write_trace_cbor<K, S, P>(path: P, v: &Trace<K, S>) -> Result<()>
where
    K: Serialize,
    S: Serialize,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(v, &mut w).with_context(|| "serialize CBOR trace")?;
    w.flush().with_context(|| "flush CBOR writer")?;
    Ok(())
}

/* --------------- Auto-detect by extension --------------- */

/// Auto-detect **read** by extension (`.json` / `.cbor` / `.jsonl` / `.ndjson`).
pub fn read_trace_auto<K, S, P>(path: P) -> Result<Trace<K, S>>
where
    K: DeserializeOwned,
    S: DeserializeOwned,
    P: AsRef<Path>,
{
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_trace_json(path),
        Some("cbor") => read_trace_cbor(path),
        Some("jsonl" | "ndjson") => read_trace_jsonl(path),
        Some(other) => Err(anyhow!(
            "unsupported trace extension: {} (supported: .json, .cbor, .jsonl, .ndjson)",
            other
        )),
        None => Err(anyhow!(
            "path has no extension (expected .json, .cbor, .jsonl, or .ndjson)"
        )),
    }
}

/// Auto-detect **write** (defaults to JSON if unknown/missing).
pub fn write_trace_auto<K, S, P>(path: P, v: &Trace<K, S>) -> Result<()>
where
    K: Serialize,
    S: Serialize,
    P: AsRef<Path>,
{
    match ext_lower(path.as_ref()).as_deref() {
        Some("cbor") => write_trace_cbor(path, v),
        Some("jsonl" | "ndjson") => write_trace_jsonl(path, v),
        _ => write_trace_json(path, v),
    }
}

/* ---------------- In-memory CBOR ---------------- */

/// Serialize any value to CBOR bytes.
pub fn to_cbor<T: Serialize>(v: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(v, &mut buf).with_context(|| "serialize CBOR")?;
    Ok(buf)
}

/// Deserialize a value from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    ciborium::de::from_reader(Cursor::new(bytes)).with_context(|| "deserialize CBOR")
}

/* ---------------- Small helpers ---------------- */

#[inline]
pub(crate) fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

#[inline]
pub(crate) fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
