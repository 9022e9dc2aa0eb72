//! Fixed instructional template and response cleanup.
//!
//! The template pins the exact three-key JSON contract the model must
//! return. Models still sometimes wrap their answer in Markdown code
//! fences, so [`strip_code_fences`] removes those wherever they occur.

/// Embed `content` verbatim in the CRO analysis template.
pub fn build_analysis_prompt(content: &str) -> String {
    format!(
        r#"You are a world-class Conversion Rate Optimization (CRO) specialist. Analyze the landing page content between the --- markers and respond with a single JSON object and nothing else: no commentary, no Markdown formatting.

The JSON object must contain exactly these three keys:

1. "conversionPerformance": a string scoring the page's likely conversion performance as "N/10", where N is an integer from 1 to 10.

2. "pageStrengths": an array of 2 to 3 strings, each naming one thing the page already does well for conversion.

3. "croHypotheses": an array of 4 to 5 objects, each describing one testable improvement hypothesis with these keys:
   - "title": a short name for the hypothesis
   - "projectedImpact": the expected effect on conversion rate (e.g. "High", "Medium", "Low" with a brief justification)
   - "category": the area of the page it targets (e.g. "Headline", "CTA", "Social Proof", "Pricing", "Forms")
   - "suggestions": an array of objects, each with:
     - "type": the kind of element being changed
     - "current": the element's current state on the page
     - "proposed": the concrete proposed replacement

Base every hypothesis on the actual page content. Do not invent elements that are not present.

---
{content}
---"#
    )
}

/// Remove Markdown code-fence markers (```json and ```) anywhere in the
/// model output and trim the result. Applying this twice yields the same
/// string as applying it once.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}
