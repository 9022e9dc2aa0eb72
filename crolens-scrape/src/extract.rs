//! Structural extraction of CRO-relevant fields from raw HTML.
//!
//! The extractor is a pure function of the HTML string: parse once into
//! an immutable tree, then run independent selector passes over it.
//! Every selection is best-effort; a missing element yields a default or
//! empty value, never an error. Class-name matching for testimonials,
//! pricing, and trust signals is a case-sensitive substring heuristic.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

const MAX_PARAGRAPHS: usize = 10;
const MAX_LINKS: usize = 20;
const MAX_TESTIMONIALS: usize = 5;
const MAX_PRICING: usize = 10;
const MAX_TRUST_SIGNALS: usize = 10;

const DEFAULT_TITLE: &str = "No title found";
const DEFAULT_DESCRIPTION: &str = "No description found";

/// Typed snapshot of a landing page, built fresh per request and
/// discarded after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedPage {
    pub title: String,
    pub description: String,
    pub headings: Headings,
    pub paragraphs: Vec<String>,
    pub buttons: Vec<String>,
    pub links: Vec<Link>,
    pub forms: Vec<FormSummary>,
    pub testimonials: Vec<String>,
    pub pricing: Vec<String>,
    pub trust_signals: Vec<String>,
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub placeholder: String,
}

/// Extract all typed fields from `html` in one pass over a parsed tree.
///
/// Document order is preserved everywhere; caps and length bounds are
/// enforced here so the normalized output stays bounded.
pub fn extract_page(html: &str, source_url: &str) -> ScrapedPage {
    let doc = Html::parse_document(html);

    let page = ScrapedPage {
        title: extract_title(&doc),
        description: extract_description(&doc),
        headings: Headings {
            h1: heading_texts(&doc, "h1"),
            h2: heading_texts(&doc, "h2"),
            h3: heading_texts(&doc, "h3"),
        },
        paragraphs: element_texts(&doc, "p", 21, usize::MAX, MAX_PARAGRAPHS),
        buttons: element_texts(
            &doc,
            r#"button, input[type="submit"], .btn, .button, [role="button"]"#,
            1,
            50,
            usize::MAX,
        ),
        links: extract_links(&doc),
        forms: extract_forms(&doc),
        testimonials: element_texts(
            &doc,
            r#".testimonial, .review, [class*="testimonial"], [class*="review"]"#,
            20,
            500,
            MAX_TESTIMONIALS,
        ),
        pricing: element_texts(
            &doc,
            r#"[class*="price"], [class*="pricing"], [class*="cost"]"#,
            1,
            100,
            MAX_PRICING,
        ),
        trust_signals: element_texts(
            &doc,
            r#"[class*="trust"], [class*="secure"], [class*="certified"], [class*="guarantee"]"#,
            1,
            200,
            MAX_TRUST_SIGNALS,
        ),
        source_url: source_url.to_string(),
        fetched_at: Utc::now(),
    };

    tracing::debug!(
        target: "scrape.extract",
        h1 = page.headings.h1.len(),
        paragraphs = page.paragraphs.len(),
        buttons = page.buttons.len(),
        links = page.links.len(),
        forms = page.forms.len(),
        "extract.done"
    );

    page
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn extract_title(doc: &Html) -> String {
    let sel = Selector::parse("title").unwrap();
    doc.select(&sel)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}

// Ordered fallback: plain meta description, then the Open Graph variant.
fn extract_description(doc: &Html) -> String {
    const SOURCES: [&str; 2] = [
        r#"meta[name="description"]"#,
        r#"meta[property="og:description"]"#,
    ];

    SOURCES
        .iter()
        .find_map(|css| {
            let sel = Selector::parse(css).unwrap();
            doc.select(&sel)
                .next()
                .and_then(|el| el.value().attr("content"))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())
}

fn heading_texts(doc: &Html, level: &str) -> Vec<String> {
    let sel = Selector::parse(level).unwrap();
    doc.select(&sel)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Trimmed texts of elements matching `css` whose char count lies in
/// `min..max`, capped at `cap` in document order.
fn element_texts(doc: &Html, css: &str, min: usize, max: usize, cap: usize) -> Vec<String> {
    let sel = Selector::parse(css).unwrap();
    doc.select(&sel)
        .map(element_text)
        .filter(|t| {
            let len = t.chars().count();
            len >= min && len < max
        })
        .take(cap)
        .collect()
}

fn extract_links(doc: &Html) -> Vec<Link> {
    let sel = Selector::parse("a").unwrap();
    doc.select(&sel)
        .filter_map(|el| {
            let text = element_text(el);
            let len = text.chars().count();
            if len == 0 || len >= 100 {
                return None;
            }
            Some(Link {
                text,
                href: el.value().attr("href").map(|s| s.to_string()),
            })
        })
        .take(MAX_LINKS)
        .collect()
}

fn extract_forms(doc: &Html) -> Vec<FormSummary> {
    let form_sel = Selector::parse("form").unwrap();
    let input_sel = Selector::parse("input, textarea, select").unwrap();

    doc.select(&form_sel)
        .map(|form| {
            let inputs = form
                .select(&input_sel)
                .map(|input| FormInput {
                    input_type: input.value().attr("type").unwrap_or("text").to_string(),
                    name: input.value().attr("name").unwrap_or("").to_string(),
                    placeholder: input.value().attr("placeholder").unwrap_or("").to_string(),
                })
                .collect();

            FormSummary {
                action: form.value().attr("action").unwrap_or("").to_string(),
                method: form.value().attr("method").unwrap_or("GET").to_string(),
                inputs,
            }
        })
        .collect()
}
