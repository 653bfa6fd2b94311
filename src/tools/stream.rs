//! In-process stream optimizer
//!
//! Uses lopdf to drop unreferenced objects and compress every stream, without
//! any external program.

use std::fs::File;
use std::io::{BufWriter, Write};

use lopdf::Document;

use crate::error::ToolError;
use crate::model::{CompressionOutcome, CompressionRequest};

use super::{run_adapter, Compressor};

const TOOL_NAME: &str = "lopdf";

#[derive(Debug, Clone, Copy, Default)]
pub struct StreamOptimizer;

impl Compressor for StreamOptimizer {
    fn compress(&self, request: &CompressionRequest<'_>) -> CompressionOutcome {
        run_adapter(request, TOOL_NAME, |req| {
            let mut doc = Document::load(req.input_path).map_err(|e| ToolError::RejectedInput {
                tool: TOOL_NAME.to_string(),
                code: "parse".to_string(),
                stderr: e.to_string(),
            })?;

            let pruned = doc.prune_objects();
            let empty = doc.delete_zero_length_streams();
            log::debug!(
                "Pruned {} unreferenced objects and {} empty streams",
                pruned.len(),
                empty.len()
            );
            doc.renumber_objects();
            doc.compress();

            let mut writer = BufWriter::new(File::create(&req.output_path)?);
            doc.save_to(&mut writer)
                .map_err(|e| ToolError::Io(std::io::Error::other(e.to_string())))?;
            writer.flush()?;
            Ok(())
        })
    }
}
