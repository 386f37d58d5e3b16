// All LLM prompt constants for the Content Generator.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the value proposition slot.
pub const VALUE_PROPOSITION_SYSTEM: &str = "You are an expert business proposal writer. \
    Create compelling value propositions that focus on measurable benefits and ROI.";

/// Value proposition prompt. Replace `{customer_json}`, `{product_json}` and
/// `{grounding_instruction}` before sending.
pub const VALUE_PROPOSITION_PROMPT_TEMPLATE: &str = r#"Create a compelling value proposition for the following client and product.

Customer Information:
{customer_json}

Product Information:
{product_json}

{grounding_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "introduction": "A compelling introduction paragraph",
  "sections": [
    {
      "title": "Section Title",
      "points": ["Benefit point 1", "Benefit point 2"]
    }
  ],
  "conclusion": "A strong concluding paragraph"
}

Focus on specific, measurable benefits and ROI."#;

/// System prompt for the scope summary slot. Plain prose, no JSON.
pub const SCOPE_SUMMARY_SYSTEM: &str = "You are an expert business proposal writer. \
    Respond with a single plain-text paragraph. No headings, no bullet points, no markdown.";

/// Scope summary prompt. Replace `{customer_name}`, `{product_name}`,
/// `{setup_items}`, `{pricing_lines}` and `{grounding_instruction}`.
pub const SCOPE_SUMMARY_PROMPT_TEMPLATE: &str = r#"Write a short executive summary (3-5 sentences) of the work we will deliver to {customer_name} with {product_name}.

Setup work included:
{setup_items}

Pricing on offer:
{pricing_lines}

{grounding_instruction}"#;

/// System prompt for the contract terms slot.
pub const TERMS_SYSTEM: &str = "You are an expert contract writer. \
    Create professional, comprehensive contracts that protect both parties' interests.";

/// Contract sections every terms reply must cover, in order.
pub const CONTRACT_SECTIONS: &[&str] = &[
    "Scope of Services",
    "Pricing and Payment Terms",
    "Service Level Agreement",
    "Term and Termination",
    "Confidentiality",
    "Intellectual Property",
    "Limitation of Liability",
    "General Terms and Conditions",
];

/// Contract terms prompt. Replace `{brief_json}`, `{section_list}` and
/// `{grounding_instruction}`.
pub const TERMS_PROMPT_TEMPLATE: &str = r#"Create a professional contract for the following proposal.

Proposal Details:
{brief_json}

{grounding_instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "sections": [
    {
      "title": "Section Title",
      "content": "Main section content",
      "subsections": [
        {"title": "Subsection Title", "content": "Subsection content"}
      ]
    }
  ]
}

Include the following sections:
{section_list}"#;
