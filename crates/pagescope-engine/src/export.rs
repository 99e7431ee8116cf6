//! # Export Naming and Document Bodies
//!
//! Serialization to an external sink (file download, clipboard) is entirely
//! the caller's concern; the engine only guarantees a stable file-name
//! pattern and JSON bodies that are exactly the accessor structures, with no
//! additional wrapping.

use chrono::{DateTime, Local};

use pagescope_core::Result;

use crate::collector::Collector;

/// The exportable snapshot categories, one per accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCategory {
    Buffers,
    Environment,
    Audits,
    Stores,
}

impl ExportCategory {
    pub const ALL: [ExportCategory; 4] = [
        ExportCategory::Buffers,
        ExportCategory::Environment,
        ExportCategory::Audits,
        ExportCategory::Stores,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportCategory::Buffers => "buffers",
            ExportCategory::Environment => "environment",
            ExportCategory::Audits => "audits",
            ExportCategory::Stores => "stores",
        }
    }
}

impl std::fmt::Display for ExportCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File name for an export taken at `timestamp`:
/// `<category>-<epoch-millis>.json`.
pub fn export_file_name(category: ExportCategory, timestamp: DateTime<Local>) -> String {
    format!("{}-{}.json", category.as_str(), timestamp.timestamp_millis())
}

/// JSON document body for one category: exactly the structure the
/// corresponding accessor returns.
///
/// # Errors
///
/// Returns [`pagescope_core::Error::Json`] if serialization fails.
pub fn export_document(collector: &Collector, category: ExportCategory) -> Result<String> {
    let body = match category {
        ExportCategory::Buffers => serde_json::to_string_pretty(&collector.buffers())?,
        ExportCategory::Environment => serde_json::to_string_pretty(&collector.environment())?,
        ExportCategory::Audits => serde_json::to_string_pretty(&collector.audits())?,
        ExportCategory::Stores => serde_json::to_string_pretty(&collector.stores())?,
    };
    Ok(body)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::config::BufferCapacities;

    #[test]
    fn test_file_name_pattern() {
        let timestamp = Local.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(
            export_file_name(ExportCategory::Buffers, timestamp),
            "buffers-1700000000000.json"
        );
        assert_eq!(
            export_file_name(ExportCategory::Stores, timestamp),
            "stores-1700000000000.json"
        );
    }

    #[test]
    fn test_document_matches_accessor_structure() {
        let collector = Collector::new(&BufferCapacities::default());

        let body = export_document(&collector, ExportCategory::Buffers).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        // The body is the accessor structure itself, not a wrapper around it.
        assert!(parsed.get("log").is_some());
        assert!(parsed.get("network").is_some());
        assert!(parsed.get("failures").is_some());
        assert!(parsed.get("memory").is_some());
        assert!(parsed.get("category").is_none());
        assert!(parsed.get("exported_at").is_none());
    }

    #[test]
    fn test_unpopulated_stores_export_as_null() {
        let collector = Collector::new(&BufferCapacities::default());
        let body = export_document(&collector, ExportCategory::Stores).unwrap();
        assert_eq!(body, "null");
    }

    #[test]
    fn test_all_lists_every_category() {
        let names: Vec<&str> = ExportCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["buffers", "environment", "audits", "stores"]);
    }
}
