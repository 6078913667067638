//! Reference renderings of a [`BatchResult`].
//!
//! The external reporter owns final styling; these encodings pin down the
//! field set every rendering must surface: summary counts, the insight block
//! (most-complex, most-dependencies, pattern census, issues), the optional
//! directory block, and the per-file itemization with status.

use std::io::Write;

use serde_json::Value;

use crate::core::{Error, Result};
use crate::report::{BatchResult, BatchStatus};

/// Output format enum.
#[derive(Clone, Copy, Debug, Default)]
pub enum Format {
    /// Machine-parseable tree.
    #[default]
    Json,
    /// Richly-structured document with emoji-labeled sections.
    Document,
    /// Indented human-readable tree.
    Tree,
    /// Flat-line text.
    Text,
}

impl Format {
    pub fn write<W: Write>(&self, result: &BatchResult, writer: &mut W) -> Result<()> {
        match self {
            Format::Json => write_json(result, writer),
            Format::Document => write_document(result, writer),
            Format::Tree => write_tree(result, writer),
            Format::Text => write_text(result, writer),
        }
    }

    /// Render to an owned string.
    pub fn render(&self, result: &BatchResult) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(result, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::analysis(e.to_string()))
    }
}

fn write_json<W: Write>(result: &BatchResult, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}

fn write_document<W: Write>(result: &BatchResult, writer: &mut W) -> Result<()> {
    let summary = &result.summary;
    writeln!(writer, "# 📊 Project Structure Report\n")?;

    writeln!(writer, "## 📄 Summary\n")?;
    if summary.status == BatchStatus::NoInput {
        writeln!(writer, "No scripts found.\n")?;
        return Ok(());
    }
    if summary.status == BatchStatus::Partial {
        writeln!(writer, "_Run was cancelled; results are partial._\n")?;
    }
    writeln!(writer, "- Scripts: {}", summary.total)?;
    writeln!(
        writer,
        "- Analyzed: {} ({} failed)",
        summary.successful, summary.failed
    )?;
    writeln!(writer, "- Methods: {}", summary.total_methods)?;
    writeln!(writer, "- Properties: {}", summary.total_properties)?;
    writeln!(writer, "- Signals: {}", summary.total_signals)?;
    writeln!(writer, "- Constants: {}", summary.total_constants)?;
    writeln!(
        writer,
        "- Cross-file calls: {}\n",
        summary.total_cross_file_calls
    )?;

    let insights = &result.insights;
    writeln!(writer, "## 💡 Insights\n")?;
    if let Some(path) = &insights.most_complex {
        writeln!(writer, "- Most complex: `{path}`")?;
    }
    if let Some(path) = &insights.most_dependencies {
        writeln!(writer, "- Most dependencies: `{path}`")?;
    }
    if !insights.pattern_census.is_empty() {
        writeln!(writer, "\n### 🧩 Pattern census\n")?;
        for entry in &insights.pattern_census {
            writeln!(
                writer,
                "- {}: {} ({:.1}%)",
                entry.name, entry.count, entry.percentage
            )?;
        }
    }
    if !insights.issues.is_empty() {
        writeln!(writer, "\n### ⚠️ Issues\n")?;
        for issue in &insights.issues {
            writeln!(
                writer,
                "- [{:?}] {:?}: {}",
                issue.severity, issue.kind, issue.message
            )?;
        }
    }
    if !insights.dependency_cycles.is_empty() {
        writeln!(writer, "\n### 🔁 Dependency cycles\n")?;
        for cycle in &insights.dependency_cycles {
            writeln!(writer, "- {}", cycle.join(" <-> "))?;
        }
    }

    if !result.cross_references.is_empty() {
        writeln!(writer, "\n## 🔗 Cross-references\n")?;
        for (path, entry) in result.cross_references.iter() {
            writeln!(
                writer,
                "- `{path}` -> {} reference(s), referenced by {}",
                entry.references_to.len(),
                entry.referenced_by.len()
            )?;
        }
    }

    if let Some(stats) = &result.directory_stats {
        writeln!(writer, "\n## 📁 Directories\n")?;
        writeln!(writer, "- Max depth: {}", stats.max_depth)?;
        writeln!(
            writer,
            "- Sizes: total {} bytes, avg {}, median {}",
            stats.sizes.total, stats.sizes.average, stats.sizes.median
        )?;
        writeln!(
            writer,
            "- Naming: {} snake / {} camel / {} pascal / {} mixed",
            stats.naming.snake, stats.naming.camel, stats.naming.pascal, stats.naming.mixed
        )?;
        for (dir, count) in &stats.files_per_directory {
            writeln!(writer, "- `{dir}`: {count} file(s)")?;
        }
    }

    writeln!(writer, "\n## 📜 Scripts\n")?;
    for record in &result.records {
        match &record.error {
            None => writeln!(writer, "- ✅ `{}`", record.path)?,
            Some(message) => writeln!(writer, "- ❌ `{}` — {message}", record.path)?,
        }
    }
    Ok(())
}

fn write_tree<W: Write>(result: &BatchResult, writer: &mut W) -> Result<()> {
    let value = serde_json::to_value(result)?;
    write_value_tree(&value, writer, 0)
}

fn write_value_tree<W: Write>(value: &Value, writer: &mut W, indent: usize) -> Result<()> {
    let prefix = "  ".repeat(indent);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                match val {
                    Value::Object(_) | Value::Array(_) => {
                        writeln!(writer, "{prefix}{key}:")?;
                        write_value_tree(val, writer, indent + 1)?;
                    }
                    _ => writeln!(writer, "{prefix}{key}: {}", scalar(val))?,
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(_) | Value::Array(_) => {
                        writeln!(writer, "{prefix}[{i}]")?;
                        write_value_tree(item, writer, indent + 1)?;
                    }
                    _ => writeln!(writer, "{prefix}[{i}] {}", scalar(item))?,
                }
            }
        }
        _ => writeln!(writer, "{prefix}{}", scalar(value))?,
    }
    Ok(())
}

fn write_text<W: Write>(result: &BatchResult, writer: &mut W) -> Result<()> {
    let value = serde_json::to_value(result)?;
    write_value_flat(&value, writer, "")
}

fn write_value_flat<W: Write>(value: &Value, writer: &mut W, path: &str) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                write_value_flat(val, writer, &child)?;
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                write_value_flat(item, writer, &format!("{path}[{i}]"))?;
            }
        }
        _ => writeln!(writer, "{path} = {}", scalar(value))?,
    }
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
