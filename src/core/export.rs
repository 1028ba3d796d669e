// LogLens - core/export.rs
//
// CSV and JSON export of (filtered) entries.
// Core layer: writes to any Write trait object.

use crate::core::model::Entry;
use crate::util::constants::MAX_EXPORT_ENTRIES;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output format, chosen from the export path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.csv` or `.json` (case-insensitive); anything else is unsupported.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Export entries in the given format. Returns the number written.
pub fn export<W: Write>(
    entries: &[Entry],
    format: ExportFormat,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    if entries.len() > MAX_EXPORT_ENTRIES {
        return Err(ExportError::TooManyEntries {
            count: entries.len(),
            max: MAX_EXPORT_ENTRIES,
        });
    }
    match format {
        ExportFormat::Csv => export_csv(entries, writer, export_path),
        ExportFormat::Json => export_json(entries, writer, export_path),
    }
}

/// Export entries to CSV format.
///
/// Writes: line, type, content
pub fn export_csv<W: Write>(
    entries: &[Entry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: PathBuf::from(export_path),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["line", "type", "content"])
        .map_err(csv_err)?;

    let mut count = 0;
    for entry in entries {
        csv_writer
            .write_record([
                entry.line_number.to_string().as_str(),
                entry.category.as_str(),
                entry.content.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export entries to JSON format (array of objects, same shape as the API).
pub fn export_json<W: Write>(
    entries: &[Entry],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, entries).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(line: u64, category: &str, content: &str) -> Entry {
        Entry {
            category: category.to_string(),
            content: content.to_string(),
            line_number: line,
        }
    }

    #[test]
    fn test_csv_export() {
        let entries = vec![
            make_entry(1, "LogTemp", "Player spawned"),
            make_entry(4, "LogNet", "Browse: 127.0.0.1:7777, retrying"),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&entries, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "line,type,content");
        assert_eq!(lines[1], "1,LogTemp,Player spawned");
        // Embedded comma forces quoting.
        assert_eq!(lines[2], "4,LogNet,\"Browse: 127.0.0.1:7777, retrying\"");
    }

    #[test]
    fn test_json_export() {
        let entries = vec![make_entry(2, "LogTemp", "Test message")];
        let mut buf = Vec::new();
        let count = export_json(&entries, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["type"], "LogTemp");
        assert_eq!(value[0]["content"], "Test message");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("x/out.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.json")).unwrap(),
            ExportFormat::Json
        );
        assert!(matches!(
            ExportFormat::from_path(Path::new("out.txt")),
            Err(ExportError::UnsupportedFormat { .. })
        ));
    }
}
