//! Downloadable example datasets.

use crate::data::{load_table, DataFrame};
use crate::error::{PanganError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One bundled dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Short name used on the command line.
    pub name: String,
    /// Heading shown next to the dataset.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// File name, relative to the data directory.
    pub file: PathBuf,
}

impl Template {
    fn new(name: &str, title: &str, description: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            file: PathBuf::from(file),
        }
    }

    /// Full path of the template inside `data_dir`.
    #[must_use]
    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.file)
    }

    /// Loads the template as a table.
    ///
    /// # Errors
    ///
    /// Propagates I/O and parse errors.
    pub fn load(&self, data_dir: &Path) -> Result<DataFrame> {
        load_table(self.path_in(data_dir))
    }

    /// Copies the template to `dest` byte for byte, returning the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the source is missing or `dest` is not writable.
    pub fn export(&self, data_dir: &Path, dest: &Path) -> Result<u64> {
        let source = self.path_in(data_dir);
        let bytes = std::fs::copy(&source, dest)?;
        tracing::debug!(
            template = %self.name,
            source = %source.display(),
            dest = %dest.display(),
            bytes,
            "template exported"
        );
        Ok(bytes)
    }
}

/// The two bundled datasets: Min-Max normalized and raw prices.
#[must_use]
pub fn default_templates() -> Vec<Template> {
    vec![
        Template::new(
            "normalisasi",
            "Dataset Normalisasi",
            "Aggregated commodity prices per city, Min-Max scaled into [0, 1].",
            "TemplateNormalisasi.csv",
        ),
        Template::new(
            "biasa",
            "Dataset Biasa",
            "Aggregated commodity prices per city before normalization.",
            "TemplateBiasa.csv",
        ),
    ]
}

/// Finds a template by name (case-insensitive) or by file name.
///
/// # Errors
///
/// Returns `InvalidParameter` listing the known names.
pub fn find_template<'a>(templates: &'a [Template], name: &str) -> Result<&'a Template> {
    let wanted = name.trim().to_lowercase();
    templates
        .iter()
        .find(|t| {
            t.name.to_lowercase() == wanted
                || t.file
                    .to_str()
                    .is_some_and(|f| f.to_lowercase() == wanted)
        })
        .ok_or_else(|| {
            let known: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
            PanganError::invalid_parameter("template", name, format!("one of {}", known.join(", ")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_templates() {
        let templates = default_templates();
        assert_eq!(templates.len(), 2);
        assert_eq!(find_template(&templates, "Biasa").expect("known").file, PathBuf::from("TemplateBiasa.csv"));
        assert_eq!(
            find_template(&templates, "templatenormalisasi.csv").expect("by file").name,
            "normalisasi"
        );
        assert!(find_template(&templates, "lainnya").unwrap_err().is_parameter_error());
    }

    #[test]
    fn test_export_is_byte_identical() {
        let data_dir = tempfile::tempdir().expect("temp dir");
        let out_dir = tempfile::tempdir().expect("temp dir");
        let content = b",Bogor,Depok\r\nBeras,11500,11800\r\n";
        fs::write(data_dir.path().join("TemplateBiasa.csv"), content).expect("write fixture");

        let templates = default_templates();
        let template = find_template(&templates, "biasa").expect("known");
        let dest = out_dir.path().join("copy.csv");
        let bytes = template.export(data_dir.path(), &dest).expect("export");

        assert_eq!(bytes, content.len() as u64);
        assert_eq!(fs::read(&dest).expect("read back"), content);
    }

    #[test]
    fn test_export_missing_source_is_io_error() {
        let data_dir = tempfile::tempdir().expect("temp dir");
        let templates = default_templates();
        let err = templates[0]
            .export(data_dir.path(), &data_dir.path().join("out.csv"))
            .unwrap_err();
        assert!(matches!(err, PanganError::Io(_)));
    }

    #[test]
    fn test_load_template() {
        let data_dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            data_dir.path().join("TemplateNormalisasi.csv"),
            ",Bogor,Depok\nBeras,0,1\n",
        )
        .expect("write fixture");
        let frame = default_templates()[0].load(data_dir.path()).expect("load");
        assert_eq!(frame.shape(), (1, 2));
    }
}
