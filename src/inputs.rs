use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::Args;

/// One piece of content to analyze and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub source: String,
    pub content: String,
}

/// Gathers every input named on the command line, reading stdin when none are given.
pub fn collect_inputs(args: &Args) -> Result<Vec<Input>> {
    let start_time = Instant::now();
    info!(action = "start", component = "input_loading", "Loading inputs");

    let mut inputs = Vec::with_capacity(args.inputs.len() + args.urls.len());
    for path in &args.inputs {
        inputs.push(read_input(path)?);
    }
    for url in &args.urls {
        inputs.push(Input {
            source: format!("url:{}", url),
            content: url.clone(),
        });
    }
    if inputs.is_empty() {
        inputs.push(read_stdin()?);
    }

    info!(
        action = "complete",
        component = "input_loading",
        input_count = inputs.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Inputs loaded"
    );
    Ok(inputs)
}

pub fn read_input(path: &Path) -> Result<Input> {
    if path == Path::new("-") {
        return read_stdin();
    }
    if !path.exists() {
        anyhow::bail!("Input file not found: {:?}", path);
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    info!(action = "read", component = "input_file", file_path = ?path, bytes = bytes.len(), "Read input file");
    Ok(Input {
        source: path.display().to_string(),
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

fn read_stdin() -> Result<Input> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;
    Ok(Input {
        source: "-".to_string(),
        content,
    })
}
