//! Branded HTML description template.
//!
//! Every listing goes through the same wrapper and section order. Free text
//! (title, condition, branding) is escaped; section fragments from enrichment
//! are inserted as-is and are expected to be clean inner HTML.

use crate::core::ListingRecord;

const DEFAULT_TITLE: &str = "Item";

const DEFAULT_POSTAGE: &str = "<ul>\
<li>Same/next working day dispatch where possible.</li>\
<li>Tracked delivery on most items.</li>\
<li>Combined postage available, just ask.</li>\
</ul>";

const DEFAULT_RETURNS: &str = "<ul>\
<li>30-day returns accepted.</li>\
<li>Buyer pays return postage unless the item is faulty or not as described.</li>\
<li>Please keep the packaging until you are happy.</li>\
</ul>";

#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub store_name: String,
    pub tagline: String,
    pub closing_message: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            store_name: "BITZ'n'BOBZ".to_string(),
            tagline: "Quality Finds • Fast Post • UK Seller".to_string(),
            closing_message:
                "Thanks for choosing BITZ'n'BOBZ: great kit, fair prices, fast UK delivery."
                    .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DescriptionRenderer {
    branding: Branding,
}

impl DescriptionRenderer {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    pub fn render(&self, record: &ListingRecord) -> String {
        let title = if record.seo_title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            record.seo_title.as_str()
        };

        let mut html = String::with_capacity(4096);
        html.push_str(
            "<div style=\"font-family:Aptos,Arial,sans-serif;background:#000;color:#fff;padding:14px;border:3px solid #FFD400;border-radius:12px;\">\n",
        );
        html.push_str(&self.header());
        html.push_str(&title_block(
            title,
            &record.condition,
            &record.short_desc_html,
        ));

        for (heading, fragment) in [
            ("Key Features", &record.features_html),
            ("Specifications", &record.specs_html),
            ("What's in the Box", &record.whats_in_box_html),
        ] {
            if !is_blank(fragment) {
                html.push_str(&section(heading, fragment));
            }
        }

        html.push_str(&section("Postage", or_default(&record.postage_html, DEFAULT_POSTAGE)));
        html.push_str(&section("Returns", or_default(&record.returns_html, DEFAULT_RETURNS)));

        html.push_str(&format!(
            "<div style=\"margin-top:12px;background:#FFD400;color:#000;padding:10px;border-radius:8px;font-weight:800;font-size:13px;\">{}</div>\n",
            escape_html(&self.branding.closing_message)
        ));
        html.push_str("</div>");
        html
    }

    fn header(&self) -> String {
        format!(
            "<div style=\"display:flex;align-items:center;gap:12px;margin-bottom:12px;\">\n\
<div style=\"font-size:22px;font-weight:900;color:#FFD400;letter-spacing:0.5px;\">{}</div>\n\
<div style=\"font-size:14px;color:#fff;opacity:0.9;\">{}</div>\n\
</div>\n",
            escape_html(&self.branding.store_name),
            escape_html(&self.branding.tagline)
        )
    }
}

fn title_block(title: &str, condition: &str, short_desc_html: &str) -> String {
    let mut block = String::from(
        "<div style=\"background:#111;border:2px solid #FFD400;border-radius:10px;padding:12px;margin-bottom:12px;\">\n",
    );
    block.push_str(&format!(
        "<div style=\"font-size:20px;font-weight:900;color:#FFD400;margin-bottom:6px;\">{}</div>\n",
        escape_html(title)
    ));
    if !is_blank(condition) {
        block.push_str(&format!(
            "<div style=\"font-size:14px;margin-bottom:6px;\"><b>Condition:</b> {}</div>\n",
            escape_html(condition.trim())
        ));
    }
    if !is_blank(short_desc_html) {
        block.push_str(&format!(
            "<div style=\"font-size:14px;line-height:1.45;\">{}</div>\n",
            short_desc_html
        ));
    }
    block.push_str("</div>\n");
    block
}

fn section(heading: &str, inner_html: &str) -> String {
    format!(
        "<div style=\"background:#0b0b0b;border:1px solid #333;border-radius:10px;padding:12px;margin-bottom:10px;\">\n\
<div style=\"font-size:16px;font-weight:900;color:#FFD400;margin-bottom:6px;\">{}</div>\n\
<div style=\"font-size:14px;line-height:1.5;\">{}</div>\n\
</div>\n",
        escape_html(heading),
        inner_html
    )
}

fn or_default<'a>(fragment: &'a str, default: &'a str) -> &'a str {
    if is_blank(fragment) {
        default
    } else {
        fragment
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Escapes `&`, `<` and `>` for use as HTML text content.
pub fn escape_html(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ListingRecord {
        ListingRecord {
            seo_title: "Blue Widget – Durable UK Seller Item".to_string(),
            category: "Widgets".to_string(),
            category_code: "12345".to_string(),
            price: Some(11.5),
            specs_text: "Steel, blue".to_string(),
            condition: "New".to_string(),
            short_desc_html: "<p>A sturdy widget.</p>".to_string(),
            features_html: "<ul><li>Steel</li></ul>".to_string(),
            specs_html: "<ul><li>Colour: Blue</li></ul>".to_string(),
            whats_in_box_html: String::new(),
            postage_html: String::new(),
            returns_html: "<ul><li>14 days</li></ul>".to_string(),
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = DescriptionRenderer::default();
        let record = record();
        assert_eq!(renderer.render(&record), renderer.render(&record));
    }

    #[test]
    fn test_title_is_escaped() {
        let renderer = DescriptionRenderer::default();
        let record = ListingRecord {
            seo_title: "<script>x</script>".to_string(),
            ..record()
        };
        let html = renderer.render(&record);

        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_escape_html_leaves_quotes() {
        assert_eq!(
            escape_html(r#"BITZ'n'BOBZ "A" & <B>"#),
            r#"BITZ'n'BOBZ "A" &amp; &lt;B&gt;"#
        );
    }

    #[test]
    fn test_condition_is_escaped() {
        let renderer = DescriptionRenderer::default();
        let record = ListingRecord {
            condition: "Used & <b>worn</b>".to_string(),
            ..record()
        };
        let html = renderer.render(&record);
        assert!(html.contains("<b>Condition:</b> Used &amp; &lt;b&gt;worn&lt;/b&gt;"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let renderer = DescriptionRenderer::default();
        let html = renderer.render(&record());

        assert!(html.contains(">Key Features<"));
        assert!(html.contains(">Specifications<"));
        assert!(!html.contains("What's in the Box"));
    }

    #[test]
    fn test_postage_and_returns_defaults() {
        let renderer = DescriptionRenderer::default();
        let html = renderer.render(&record());

        assert!(html.contains(">Postage<"));
        assert!(html.contains("Tracked delivery on most items."));
        assert!(html.contains("<ul><li>14 days</li></ul>"));
        assert!(!html.contains("30-day returns accepted."));

        let html = renderer.render(&ListingRecord::default());
        assert!(html.contains("Tracked delivery on most items."));
        assert!(html.contains("30-day returns accepted."));
    }

    #[test]
    fn test_section_order() {
        let renderer = DescriptionRenderer::default();
        let record = ListingRecord {
            whats_in_box_html: "<ul><li>1 x widget</li></ul>".to_string(),
            ..record()
        };
        let html = renderer.render(&record);

        let positions: Vec<usize> = [
            "BITZ'n'BOBZ",
            "Condition:",
            ">Key Features<",
            ">Specifications<",
            ">What's in the Box<",
            ">Postage<",
            ">Returns<",
            "Thanks for choosing",
        ]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_missing_title_defaults() {
        let renderer = DescriptionRenderer::default();
        let html = renderer.render(&ListingRecord::default());
        assert!(html.contains(">Item</div>"));
        assert!(!html.contains("Condition:"));
    }

    #[test]
    fn test_custom_branding() {
        let renderer = DescriptionRenderer::new(Branding {
            store_name: "Tools & More".to_string(),
            tagline: "Trade prices".to_string(),
            closing_message: "Cheers!".to_string(),
        });
        let html = renderer.render(&record());

        assert!(html.contains("Tools &amp; More"));
        assert!(html.contains("Cheers!"));
        assert!(!html.contains("BITZ"));
    }
}
