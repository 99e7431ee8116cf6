//! # Document Analyzer
//!
//! Derives the design audit and SEO report from the rendered document tree.
//! Everything here is a pure function over the injected [`DocumentQuery`]
//! interface: no environment-specific traversal, no stored state, and
//! identical output for an unchanged tree.
//!
//! Cost is O(document size) per invocation. The sampler already throttles
//! to its tick period; other callers should do the same.

use url::Url;

use pagescope_core::audit::{
    DesignAudit, ListenerSummary, SeoReport, MAX_FONT_NAMES, MAX_PALETTE_COLORS, MAX_SAMPLE_TAGS,
    NO_DESCRIPTION, NO_KEYWORDS, NO_TITLE,
};

use crate::host::{DocumentQuery, NodeRef};

/// Interaction events inventoried by the design audit, matched against
/// inline `on<event>` attribute bindings.
pub const INTERACTION_EVENTS: [&str; 6] =
    ["click", "scroll", "resize", "load", "mouseenter", "mouseleave"];

/// Stateless analysis entry points.
pub struct DocumentAnalyzer;

impl DocumentAnalyzer {
    /// Color palette, font inventory, and inline-listener summary, from one
    /// traversal of the visible nodes.
    pub fn design_audit(document: &dyn DocumentQuery) -> DesignAudit {
        let nodes = document.query_all_nodes();

        let mut color_palette: Vec<String> = Vec::new();
        let mut font_inventory: Vec<String> = Vec::new();

        for node in &nodes {
            let Some(style) = document.resolved_style_of(node) else {
                continue;
            };

            for color in [
                &style.text_color,
                &style.background_color,
                &style.border_color,
            ]
            .into_iter()
            .flatten()
            {
                let color = color.trim();
                if is_visible_color(color) {
                    push_distinct(&mut color_palette, color, MAX_PALETTE_COLORS);
                }
            }

            if let Some(family) = &style.font_family {
                for name in family.split(',') {
                    let name = name.trim().trim_matches(['"', '\'']).trim();
                    if !name.is_empty() {
                        push_distinct(&mut font_inventory, name, MAX_FONT_NAMES);
                    }
                }
            }
        }

        let event_listeners = INTERACTION_EVENTS
            .iter()
            .filter_map(|event| summarize_listeners(&nodes, event))
            .collect();

        DesignAudit {
            color_palette,
            font_inventory,
            event_listeners,
        }
    }

    /// Title/meta fields, heading/image/link counts, from one traversal.
    pub fn seo_report(document: &dyn DocumentQuery) -> SeoReport {
        let title = non_blank(document.title()).unwrap_or_else(|| NO_TITLE.to_string());
        let description =
            non_blank(document.meta("description")).unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let keywords =
            non_blank(document.meta("keywords")).unwrap_or_else(|| NO_KEYWORDS.to_string());

        let document_host = document.host_name();
        let mut heading_counts = [0u32; 6];
        let mut image_count = 0u32;
        let mut images_missing_alt = 0u32;
        let mut link_count = 0u32;
        let mut external_link_count = 0u32;

        for node in document.query_all_nodes() {
            match node.tag.as_str() {
                "h1" => heading_counts[0] += 1,
                "h2" => heading_counts[1] += 1,
                "h3" => heading_counts[2] += 1,
                "h4" => heading_counts[3] += 1,
                "h5" => heading_counts[4] += 1,
                "h6" => heading_counts[5] += 1,
                "img" => {
                    image_count += 1;
                    let missing = node
                        .attr("alt")
                        .map_or(true, |alt| alt.trim().is_empty());
                    if missing {
                        images_missing_alt += 1;
                    }
                }
                "a" => {
                    link_count += 1;
                    if let Some(href) = node.attr("href") {
                        if is_external_link(href, document_host.as_deref()) {
                            external_link_count += 1;
                        }
                    }
                }
                _ => {}
            }
        }

        SeoReport {
            title,
            description,
            keywords,
            heading_counts,
            image_count,
            images_missing_alt,
            link_count,
            external_link_count,
        }
    }
}

// ── Traversal helpers ─────────────────────────────────────────────────────────

fn summarize_listeners(nodes: &[NodeRef], event: &str) -> Option<ListenerSummary> {
    let attr_name = format!("on{}", event);
    let mut element_count = 0u32;
    let mut sample_tags = Vec::new();

    for node in nodes {
        if node.has_attr(&attr_name) {
            element_count += 1;
            if sample_tags.len() < MAX_SAMPLE_TAGS {
                sample_tags.push(node.tag.clone());
            }
        }
    }

    // Event types with zero matches are omitted from the audit.
    (element_count > 0).then(|| ListenerSummary {
        event_type: event.to_string(),
        element_count,
        sample_tags,
    })
}

/// Whether a resolved color value contributes to the palette.
/// Transparent and fully-unset values are discarded.
fn is_visible_color(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    let lowered = value.to_ascii_lowercase();
    let compact: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    !matches!(
        compact.as_str(),
        "transparent" | "none" | "rgba(0,0,0,0)" | "initial" | "inherit" | "unset"
    )
}

/// Append a value if it is not already present and the cap has room.
/// Encounter order is preserved; values past the cap are dropped.
fn push_distinct(values: &mut Vec<String>, value: &str, cap: usize) {
    if values.len() < cap && !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Whether an anchor target leaves the document host.
///
/// Relative and unparsable targets resolve within the document and are
/// internal; absolute targets without a host (mailto:, data:) are treated as
/// internal too. An absolute target with a host is external when that host
/// differs from the document's, or when the document host is unknown.
fn is_external_link(href: &str, document_host: Option<&str>) -> bool {
    match Url::parse(href) {
        Ok(url) => match url.host_str() {
            Some(host) => {
                document_host.map_or(true, |doc_host| !host.eq_ignore_ascii_case(doc_host))
            }
            None => false,
        },
        Err(_) => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ResolvedStyle;
    use crate::testing::FakeDocument;

    fn styled_node(index: usize, tag: &str) -> NodeRef {
        NodeRef::new(index, tag)
    }

    fn color_style(text: &str) -> ResolvedStyle {
        ResolvedStyle {
            text_color: Some(text.to_string()),
            ..ResolvedStyle::default()
        }
    }

    #[test]
    fn test_palette_is_distinct_and_ordered() {
        let mut document = FakeDocument::empty();
        document.push(styled_node(0, "div"), Some(color_style("rgb(10, 10, 10)")));
        document.push(styled_node(1, "p"), Some(color_style("rgb(20, 20, 20)")));
        document.push(styled_node(2, "span"), Some(color_style("rgb(10, 10, 10)")));

        let audit = DocumentAnalyzer::design_audit(&document);
        assert_eq!(
            audit.color_palette,
            vec!["rgb(10, 10, 10)", "rgb(20, 20, 20)"]
        );
    }

    #[test]
    fn test_palette_discards_transparent_and_unset() {
        let mut document = FakeDocument::empty();
        document.push(styled_node(0, "div"), Some(color_style("transparent")));
        document.push(styled_node(1, "div"), Some(color_style("rgba(0, 0, 0, 0)")));
        document.push(styled_node(2, "div"), Some(ResolvedStyle::default()));
        document.push(styled_node(3, "div"), None);
        document.push(styled_node(4, "div"), Some(color_style("rgb(1, 2, 3)")));

        let audit = DocumentAnalyzer::design_audit(&document);
        assert_eq!(audit.color_palette, vec!["rgb(1, 2, 3)"]);
    }

    #[test]
    fn test_palette_truncates_at_cap() {
        let mut document = FakeDocument::empty();
        for i in 0..30 {
            document.push(
                styled_node(i, "div"),
                Some(color_style(&format!("rgb({}, 0, 0)", i))),
            );
        }

        let audit = DocumentAnalyzer::design_audit(&document);
        assert_eq!(audit.color_palette.len(), MAX_PALETTE_COLORS);
        // The first 20 encountered survive; later values are dropped.
        assert_eq!(audit.color_palette[0], "rgb(0, 0, 0)");
        assert_eq!(audit.color_palette[19], "rgb(19, 0, 0)");
    }

    #[test]
    fn test_fonts_split_trim_and_dedupe() {
        let mut document = FakeDocument::empty();
        document.push(
            styled_node(0, "body"),
            Some(ResolvedStyle {
                font_family: Some("\"Inter\", 'Segoe UI', sans-serif".to_string()),
                ..ResolvedStyle::default()
            }),
        );
        document.push(
            styled_node(1, "code"),
            Some(ResolvedStyle {
                font_family: Some("Inter, monospace".to_string()),
                ..ResolvedStyle::default()
            }),
        );

        let audit = DocumentAnalyzer::design_audit(&document);
        assert_eq!(
            audit.font_inventory,
            vec!["Inter", "Segoe UI", "sans-serif", "monospace"]
        );
    }

    #[test]
    fn test_listener_inventory_counts_samples_and_omits_zero() {
        let mut document = FakeDocument::empty();
        for i in 0..8 {
            let mut node = styled_node(i, if i % 2 == 0 { "button" } else { "a" });
            node.attributes
                .push(("onclick".to_string(), "handle()".to_string()));
            document.push(node, None);
        }
        let mut scroller = styled_node(8, "main");
        scroller
            .attributes
            .push(("onscroll".to_string(), "track()".to_string()));
        document.push(scroller, None);

        let audit = DocumentAnalyzer::design_audit(&document);
        assert_eq!(audit.event_listeners.len(), 2);

        let click = &audit.event_listeners[0];
        assert_eq!(click.event_type, "click");
        assert_eq!(click.element_count, 8);
        assert_eq!(click.sample_tags.len(), MAX_SAMPLE_TAGS);
        assert_eq!(click.sample_tags[0], "button");

        let scroll = &audit.event_listeners[1];
        assert_eq!(scroll.event_type, "scroll");
        assert_eq!(scroll.element_count, 1);
        assert_eq!(scroll.sample_tags, vec!["main"]);
    }

    #[test]
    fn test_seo_counts() {
        let mut document = FakeDocument::empty();
        document.metas = vec![
            ("description".to_string(), "A test page".to_string()),
            ("keywords".to_string(), "test, page".to_string()),
        ];
        document.push(styled_node(0, "h1"), None);
        document.push(styled_node(1, "h2"), None);
        document.push(styled_node(2, "h2"), None);

        let mut with_alt = styled_node(3, "img");
        with_alt
            .attributes
            .push(("alt".to_string(), "Diagram".to_string()));
        document.push(with_alt, None);
        let mut blank_alt = styled_node(4, "img");
        blank_alt.attributes.push(("alt".to_string(), "  ".to_string()));
        document.push(blank_alt, None);
        document.push(styled_node(5, "img"), None);

        let mut internal = styled_node(6, "a");
        internal
            .attributes
            .push(("href".to_string(), "/about".to_string()));
        document.push(internal, None);
        let mut same_host = styled_node(7, "a");
        same_host.attributes.push((
            "href".to_string(),
            "https://example.com/docs".to_string(),
        ));
        document.push(same_host, None);
        let mut external = styled_node(8, "a");
        external.attributes.push((
            "href".to_string(),
            "https://other.example.net/".to_string(),
        ));
        document.push(external, None);
        let mut mailto = styled_node(9, "a");
        mailto
            .attributes
            .push(("href".to_string(), "mailto:dev@example.com".to_string()));
        document.push(mailto, None);

        let report = DocumentAnalyzer::seo_report(&document);
        assert_eq!(report.title, "Test Page");
        assert_eq!(report.description, "A test page");
        assert_eq!(report.keywords, "test, page");
        assert_eq!(report.heading_counts, [1, 2, 0, 0, 0, 0]);
        assert_eq!(report.image_count, 3);
        assert_eq!(report.images_missing_alt, 2);
        assert_eq!(report.link_count, 4);
        assert_eq!(report.external_link_count, 1);
    }

    #[test]
    fn test_seo_placeholders_for_absent_fields() {
        let mut document = FakeDocument::empty();
        document.title = None;
        document.metas.clear();

        let report = DocumentAnalyzer::seo_report(&document);
        assert_eq!(report.title, NO_TITLE);
        assert_eq!(report.description, NO_DESCRIPTION);
        assert_eq!(report.keywords, NO_KEYWORDS);
    }

    #[test]
    fn test_blank_title_falls_back_to_placeholder() {
        let mut document = FakeDocument::empty();
        document.title = Some("   ".to_string());
        let report = DocumentAnalyzer::seo_report(&document);
        assert_eq!(report.title, NO_TITLE);
    }

    #[test]
    fn test_analysis_is_idempotent_on_unchanged_tree() {
        let mut document = FakeDocument::empty();
        document.push(styled_node(0, "h1"), Some(color_style("rgb(3, 3, 3)")));
        let mut anchor = styled_node(1, "a");
        anchor.attributes.push((
            "href".to_string(),
            "https://elsewhere.org".to_string(),
        ));
        anchor
            .attributes
            .push(("onclick".to_string(), "go()".to_string()));
        document.push(anchor, None);

        assert_eq!(
            DocumentAnalyzer::design_audit(&document),
            DocumentAnalyzer::design_audit(&document)
        );
        assert_eq!(
            DocumentAnalyzer::seo_report(&document),
            DocumentAnalyzer::seo_report(&document)
        );
    }

    #[test]
    fn test_is_external_link() {
        let host = Some("example.com");
        assert!(is_external_link("https://other.net/x", host));
        assert!(!is_external_link("https://example.com/x", host));
        assert!(!is_external_link("https://EXAMPLE.com/x", host));
        assert!(!is_external_link("/relative/path", host));
        assert!(!is_external_link("mailto:dev@example.com", host));
        // Unknown document host: any absolute target counts as external.
        assert!(is_external_link("https://other.net/x", None));
    }

    #[test]
    fn test_is_visible_color() {
        assert!(is_visible_color("rgb(0, 0, 0)"));
        assert!(is_visible_color("#fff"));
        assert!(!is_visible_color(""));
        assert!(!is_visible_color("transparent"));
        assert!(!is_visible_color("TRANSPARENT"));
        assert!(!is_visible_color("rgba(0, 0, 0, 0)"));
        assert!(!is_visible_color("rgba(0,0,0,0)"));
    }
}
