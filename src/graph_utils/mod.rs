mod dot_format;
mod relation_graph;

use log::debug;
use std::io::prelude::*;
use std::path::Path;
use std::process::{Command, Stdio};
use std::{fs::File, io};

pub use dot_format::DotFormat;
pub use relation_graph::{conflicting_pairs, relation_graph, RelationGraph};

use crate::error::Result;

/// Writes dot formatted graph into svg file.
///
/// Requires the `dot` executable of Graphviz.
pub fn save_as_svg<P: AsRef<Path>>(path: P, dot: &str) -> Result<()> {
    let mut process = Command::new("dot")
        .arg("-Tsvg")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    process
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "couldn't open dot stdin"))?
        .write_all(dot.as_bytes())?;

    let output = process.wait_with_output()?;
    if !output.status.success() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            format!("dot exited with {}", output.status),
        )
        .into());
    }

    let mut file = File::create(path.as_ref())?;
    file.write_all(&output.stdout)?;
    debug!("Wrote svg to {}", path.as_ref().display());

    Ok(())
}
