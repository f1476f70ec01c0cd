//! `pangan normalize`: Min-Max scale a table the way the normalized
//! template was built.

use super::{validate_path, Context};
use crate::error::Result;
use crate::output;
use pangan::data::load_table;
use pangan::preprocessing::normalize_frame;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub(crate) fn run(file: &Path, dest: &Path, transpose: bool, ctx: &Context) -> Result<()> {
    validate_path(file)?;
    let frame = load_table(file)?;
    let normalized = normalize_frame(&frame, transpose)?;

    let writer = BufWriter::new(File::create(dest)?);
    normalized.to_csv(writer)?;

    let (rows, cols) = normalized.shape();
    if ctx.json {
        return output::json(&serde_json::json!({
            "source": file.display().to_string(),
            "dest": dest.display().to_string(),
            "rows": rows,
            "cols": cols,
            "transpose": transpose,
        }));
    }
    output::success(&format!(
        "Normalized {rows}x{cols} table written to {}",
        dest.display()
    ));
    Ok(())
}
