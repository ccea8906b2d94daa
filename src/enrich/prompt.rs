use crate::core::RawSignals;

pub fn system_prompt(store_name: &str) -> String {
    format!(
        "You are an expert UK eBay listing assistant for the {store} store.\n\
Return ONLY one valid JSON object (no markdown, no commentary).\n\
Use UK spelling and a friendly, factual tone with no hype.\n\
If uncertain, say \"Unknown\" or leave the field blank; never invent model numbers.\n\
The SEO title must be 80 characters or fewer.\n\
The Buy It Now price must be a NUMBER in GBP with no currency symbol.\n\
HTML blocks must be clean inner HTML only (ul/li, p, table allowed) with no outer wrapper.",
        store = store_name
    )
}

pub fn user_prompt(url: &str, signals: &RawSignals, price: Option<f64>) -> String {
    let title = signals
        .title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or("Unknown");
    let price = price
        .map(|amount| amount.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let bullets = if signals.features.is_empty() {
        "None".to_string()
    } else {
        signals
            .features
            .iter()
            .map(|bullet| format!("- {}", bullet))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"INPUT URL: {url}

SCRAPED TITLE: {title}
SCRAPED PRICE GBP (if any): {price}
SCRAPED BULLETS:
{bullets}

TASK:
1) Produce a better SEO title for UK eBay (<=80 chars).
2) Pick the best eBay category name and category code (guess if needed).
3) Suggest a realistic Buy It Now price in GBP as a number.
   - If a scraped price exists, keep close to it unless it is clearly wrong.
4) Produce short, accurate item specs (one paragraph or a tight bullet list).
5) Produce inner HTML blocks for:
   - shortDescHtml (1-2 paragraphs)
   - featuresHtml (bullet list)
   - specsHtml (table or bullets)
   - whatsInBoxHtml (bullets)
   - condition (plain text)
   - postageHtml (bullets, UK couriers)
   - returnsHtml (bullets)

OUTPUT JSON SHAPE:
{{
  "seoTitle": "",
  "categoryName": "",
  "categoryCode": "",
  "buyItNowPriceGBP": 0,
  "itemSpecsText": "",
  "condition": "",
  "shortDescHtml": "",
  "featuresHtml": "",
  "specsHtml": "",
  "whatsInBoxHtml": "",
  "postageHtml": "",
  "returnsHtml": ""
}}"#
    )
}
