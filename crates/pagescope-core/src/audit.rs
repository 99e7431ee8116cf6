//! # Document Audit Domain Types
//!
//! Reports derived from the rendered document tree: the design audit
//! (palette, typography, listener inventory), the SEO structural report, and
//! the simulated [`ScoreEstimate`].
//!
//! These are pure values: recomputing them on an unchanged document yields
//! identical reports, so they carry no timestamps and compare with `==`.

use serde::Serialize;

/// Maximum number of distinct colors retained in a palette, in encounter
/// order.
pub const MAX_PALETTE_COLORS: usize = 20;

/// Maximum number of distinct font names retained, in encounter order.
pub const MAX_FONT_NAMES: usize = 15;

/// Maximum sample tag names captured per listener event type.
pub const MAX_SAMPLE_TAGS: usize = 5;

/// Placeholder when the document has no title.
pub const NO_TITLE: &str = "No title found";

/// Placeholder when the document has no description meta field.
pub const NO_DESCRIPTION: &str = "No description found";

/// Placeholder when the document has no keywords meta field.
pub const NO_KEYWORDS: &str = "No keywords found";

// ── ListenerSummary ───────────────────────────────────────────────────────────

/// Inline listener bindings for one interaction event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListenerSummary {
    /// Event name, e.g. "click".
    pub event_type: String,
    /// Number of elements with an inline binding for this event.
    pub element_count: u32,
    /// Up to [`MAX_SAMPLE_TAGS`] tag names of bound elements, in document
    /// order.
    pub sample_tags: Vec<String>,
}

// ── DesignAudit ───────────────────────────────────────────────────────────────

/// Color, typography, and listener summary of the rendered document.
/// Recomputed from scratch on every sampler tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignAudit {
    /// Distinct resolved color values in encounter order, at most
    /// [`MAX_PALETTE_COLORS`]. Transparent and unset values are excluded.
    pub color_palette: Vec<String>,
    /// Distinct font names in encounter order, at most [`MAX_FONT_NAMES`].
    pub font_inventory: Vec<String>,
    /// Per-event inline listener counts; event types with zero matches are
    /// omitted.
    pub event_listeners: Vec<ListenerSummary>,
}

// ── SeoReport ─────────────────────────────────────────────────────────────────

/// Structural SEO facts about the rendered document.
/// Recomputed from scratch on every sampler tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoReport {
    /// Document title, or [`NO_TITLE`].
    pub title: String,
    /// Description meta content, or [`NO_DESCRIPTION`].
    pub description: String,
    /// Keywords meta content, or [`NO_KEYWORDS`].
    pub keywords: String,
    /// Heading element counts, index 0 = h1 through index 5 = h6.
    pub heading_counts: [u32; 6],
    pub image_count: u32,
    /// Images whose alt text is absent or blank.
    pub images_missing_alt: u32,
    pub link_count: u32,
    /// Anchors whose target host differs from the document host.
    pub external_link_count: u32,
}

impl SeoReport {
    /// Total heading elements across all levels.
    pub fn total_headings(&self) -> u32 {
        self.heading_counts.iter().sum()
    }

    /// Count for one heading level (1–6). Out-of-range levels return 0.
    pub fn headings_at_level(&self, level: u8) -> u32 {
        match level {
            1..=6 => self.heading_counts[(level - 1) as usize],
            _ => 0,
        }
    }
}

// ── ScoreEstimate ─────────────────────────────────────────────────────────────

/// Simulated audit scores (0–100 per category).
///
/// These are **randomized placeholder values with no underlying
/// measurement**; the panel shows them as indicative gauges only. They live
/// apart from the measured snapshots so nothing downstream mistakes them for
/// real audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreEstimate {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
    pub pwa: u8,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
