//! JSON Lines (NDJSON) helpers: one [`Frame`] per line.
//!
//! Handy for piping a trace into line-oriented tools, or for a consumer that
//! only wants to scan frames without materializing the whole trace.
//!
//! - **Reader**: [`stream_frames_jsonl`] returns an iterator that *owns* its
//!   underlying reader, yielding `Result<Frame<K, S>>` so callers can surface
//!   per-line errors with line numbers.
//! - **Writer**: uses `serde_json::to_writer` to avoid intermediate strings.

use crate::io::{display, ensure_parent_dir};
use crate::{Frame, Trace};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

/// Owning JSONL iterator over frames.
pub struct JsonlFrameIter<K, S> {
    rdr: BufReader<File>,
    buf: String,
    line_no: usize,
    _frame: PhantomData<fn() -> Frame<K, S>>,
}

impl<K, S> JsonlFrameIter<K, S> {
    fn new(file: File) -> Self {
        Self {
            rdr: BufReader::new(file),
            buf: String::with_capacity(4 << 10),
            line_no: 0,
            _frame: PhantomData,
        }
    }
}

impl<K: DeserializeOwned, S: DeserializeOwned> Iterator for JsonlFrameIter<K, S> {
    type Item = Result<Frame<K, S>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.rdr.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                let line = self.buf.trim_end_matches(['\n', '\r']);
                if line.is_empty() {
                    return Some(Err(anyhow!(
                        "parse jsonl line {}: empty line",
                        self.line_no
                    )));
                }
                Some(
                    serde_json::from_str(line)
                        .with_context(|| format!("parse jsonl line {}", self.line_no)),
                )
            }
            Err(e) => Some(Err(e).with_context(|| format!("read line {}", self.line_no + 1))),
        }
    }
}

/// Stream frames from a JSONL file, one per line.
pub fn stream_frames_jsonl<K, S, P: AsRef<Path>>(path: P) -> Result<JsonlFrameIter<K, S>> {
    let f = File::open(path.as_ref())
        .with_context(|| format!("open {}", display(path.as_ref())))?;
    Ok(JsonlFrameIter::new(f))
}

/// Read a whole trace from JSONL.
pub fn read_trace_jsonl<K, S, P>(path: P) -> Result<Trace<K, S>>
where
    K: DeserializeOwned,
    S: DeserializeOwned,
    P: AsRef<Path>,
{
    let frames = stream_frames_jsonl(path.as_ref())?.collect::<Result<Vec<_>>>()?;
    Trace::from_frames(frames)
        .ok_or_else(|| anyhow!("{} holds no frames", display(path.as_ref())))
}

/// Write a trace as JSON Lines (one frame per line).
pub fn write_trace_jsonl<K, S, P>(path: P, trace: &Trace<K, S>) -> Result<()>
where
    K: Serialize,
    S: Serialize,
    P: AsRef<Path>,
{
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    for (i, frame) in trace.iter().enumerate() {
        serde_json::to_writer(&mut w, frame)
            .with_context(|| format!("serialize frame {i} to JSON line"))?;
        w.write_all(b"\n")?;
    }
    w.flush().with_context(|| "flush JSONL writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StepKind, TraceBuilder};
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    enum K {
        Init,
        Step,
    }

    impl StepKind for K {
        fn label(&self) -> &'static str {
            match self {
                Self::Init => "init",
                Self::Step => "step",
            }
        }
    }

    #[test]
    fn one_frame_per_line() {
        let mut b = TraceBuilder::new(K::Init, "a", 0u8);
        b.push(K::Step, "b", 1);
        b.push(K::Step, "c", 2);
        let t = b.finish();

        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("t.jsonl");
        write_trace_jsonl(&p, &t).unwrap();
        let text = std::fs::read_to_string(&p).unwrap();
        assert_eq!(text.lines().count(), 3);

        let notes: Vec<String> = stream_frames_jsonl::<K, u8, _>(&p)
            .unwrap()
            .map(|f| f.unwrap().note)
            .collect();
        assert_eq!(notes, vec!["a", "b", "c"]);
    }

    #[test]
    fn reports_bad_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bad.jsonl");
        std::fs::write(
            &p,
            "{\"kind\":\"Init\",\"note\":\"a\",\"state\":0}\nnot json\n",
        )
        .unwrap();
        let err = read_trace_jsonl::<K, u8, _>(&p).unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn empty_file_is_not_a_trace() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("empty.jsonl");
        std::fs::write(&p, "").unwrap();
        assert!(read_trace_jsonl::<K, u8, _>(&p).is_err());
    }
}
