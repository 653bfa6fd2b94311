#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pdf_shrink::engine::{Event, Reporter};
use pdf_shrink::error::ToolError;
use pdf_shrink::model::{CompressionMethod, CompressionOutcome, CompressionRequest};
use pdf_shrink::tools::{Compressor, Toolbox};

/// What a scripted compressor does when called
#[derive(Clone, Debug)]
pub enum Script {
    /// Write an output of exactly this many bytes
    Size(u64),
    /// Fail as if the tool was not installed
    Missing,
    /// Fail as if the tool exited non-zero
    Reject,
}

pub struct ScriptedCompressor {
    method: CompressionMethod,
    script: Script,
    calls: Mutex<Vec<PathBuf>>,
}

impl Compressor for ScriptedCompressor {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome {
        self.calls
            .lock()
            .unwrap()
            .push(request.output_path.clone());
        match self.script {
            Script::Size(size) => {
                fs::write(&request.output_path, vec![b'x'; size as usize]).unwrap();
                CompressionOutcome::succeeded(self.method, size)
            }
            Script::Missing => CompressionOutcome::failed(
                self.method,
                ToolError::Missing {
                    tool: self.method.name().to_string(),
                    hint: "the fake tool",
                },
            ),
            Script::Reject => CompressionOutcome::failed(
                self.method,
                ToolError::RejectedInput {
                    tool: self.method.name().to_string(),
                    code: "1".to_string(),
                    stderr: "scripted rejection".to_string(),
                },
            ),
        }
    }
}

/// Toolbox whose compressors follow a per-method script.
/// Methods without a script behave as missing tools.
pub struct FakeToolbox {
    compressors: HashMap<CompressionMethod, ScriptedCompressor>,
}

impl FakeToolbox {
    pub fn new(scripts: &[(CompressionMethod, Script)]) -> Self {
        let mut compressors = HashMap::new();
        for method in CompressionMethod::ALL {
            let script = scripts
                .iter()
                .find(|(m, _)| *m == method)
                .map(|(_, s)| s.clone())
                .unwrap_or(Script::Missing);
            compressors.insert(
                method,
                ScriptedCompressor {
                    method,
                    script,
                    calls: Mutex::new(Vec::new()),
                },
            );
        }
        Self { compressors }
    }

    /// Same script for every method
    pub fn uniform(script: Script) -> Self {
        let scripts: Vec<_> = CompressionMethod::ALL
            .iter()
            .map(|m| (*m, script.clone()))
            .collect();
        Self::new(&scripts)
    }

    pub fn calls(&self, method: CompressionMethod) -> Vec<PathBuf> {
        self.compressors[&method].calls.lock().unwrap().clone()
    }
}

impl Toolbox for FakeToolbox {
    fn compressor(&self, method: CompressionMethod) -> &dyn Compressor {
        &self.compressors[&method]
    }
}

/// Collects a short text line per event
#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &Event<'_>) {
        let line = match event {
            Event::MethodSucceeded {
                method,
                output_size,
            } => format!("ok {} {}", method, output_size),
            Event::MethodFailed { method, .. } => format!("failed {}", method),
            Event::FallingBack { from, to } => format!("fallback {} -> {}", from, to),
            Event::RaceWinner { method, .. } => format!("winner {}", method),
            Event::NoInputs { .. } => "no inputs".to_string(),
            Event::Unreadable { .. } => "unreadable".to_string(),
            Event::BatchFinished { report } => format!("finished {}", report.total),
            other => format!("{:?}", other),
        };
        self.lines.lock().unwrap().push(line);
    }
}

/// Write a fake "PDF" of exactly `size` bytes
pub fn write_sized(path: &Path, size: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(size, b'0');
    fs::write(path, bytes).unwrap();
}

/// Names of all entries directly inside `dir`, sorted
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
