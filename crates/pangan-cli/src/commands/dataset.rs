//! `pangan dataset`: list, show and export the bundled example datasets.

use super::Context;
use crate::error::{CliError, Result};
use crate::output;
use pangan::reference::{find_template, Template};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct TemplateEntry<'a> {
    name: &'a str,
    title: &'a str,
    description: &'a str,
    path: String,
    available: bool,
}

pub(crate) fn list(ctx: &Context) -> Result<()> {
    let data_dir = &ctx.config.data_dir;
    let entries: Vec<TemplateEntry<'_>> = ctx
        .config
        .templates
        .iter()
        .map(|t| {
            let path = t.path_in(data_dir);
            TemplateEntry {
                name: &t.name,
                title: &t.title,
                description: &t.description,
                available: path.is_file(),
                path: path.display().to_string(),
            }
        })
        .collect();

    if ctx.json {
        return output::json(&entries);
    }

    output::section("Dataset");
    for entry in &entries {
        println!();
        output::kv("Name", entry.name);
        output::kv("Title", entry.title);
        output::kv("About", entry.description);
        output::kv(
            "File",
            if entry.available {
                entry.path.clone()
            } else {
                format!("{} (missing)", entry.path)
            },
        );
    }
    Ok(())
}

/// Resolve a template by name and check that its file is present.
fn available_template<'a>(name: &str, ctx: &'a Context) -> Result<(&'a Template, PathBuf)> {
    let template = find_template(&ctx.config.templates, name).map_err(|_| CliError::Unknown {
        kind: "template",
        name: name.to_string(),
    })?;

    let source = template.path_in(&ctx.config.data_dir);
    if !source.is_file() {
        return Err(CliError::FileNotFound(source));
    }
    Ok((template, source))
}

/// Decimal places shown per price cell.
const SHOW_PRECISION: usize = 2;

pub(crate) fn show(name: &str, ctx: &Context) -> Result<()> {
    let (template, source) = available_template(name, ctx)?;
    let frame = template.load(&ctx.config.data_dir)?;
    let (rows, cols) = frame.shape();
    tracing::debug!(template = %template.name, rows, cols, "template loaded");

    if ctx.json {
        let columns: serde_json::Map<String, serde_json::Value> = frame
            .iter_columns()
            .map(|(name, values)| (name.to_string(), serde_json::json!(values)))
            .collect();
        return output::json(&serde_json::json!({
            "template": template.name,
            "source": source.display().to_string(),
            "index": frame.index(),
            "columns": columns,
        }));
    }

    output::section(&template.title);
    output::kv("Shape", format!("{rows} x {cols}"));
    println!();

    let mut headers = vec![String::new()];
    headers.extend(frame.column_names().into_iter().map(str::to_string));
    let mut body = Vec::with_capacity(rows);
    for (i, label) in frame.index().iter().enumerate() {
        let mut line = vec![label.clone()];
        line.extend(
            frame
                .row(i)?
                .iter()
                .map(|v| format!("{v:.prec$}", prec = SHOW_PRECISION)),
        );
        body.push(line);
    }
    output::grid(&headers, &body);
    Ok(())
}

pub(crate) fn export(name: &str, dest: &Path, ctx: &Context) -> Result<()> {
    let (template, source) = available_template(name, ctx)?;
    let bytes = template.export(&ctx.config.data_dir, dest)?;

    if ctx.json {
        return output::json(&serde_json::json!({
            "template": template.name,
            "source": source.display().to_string(),
            "dest": dest.display().to_string(),
            "bytes": bytes,
        }));
    }
    output::success(&format!(
        "Exported {} ({bytes} bytes) to {}",
        template.title,
        dest.display()
    ));
    Ok(())
}
