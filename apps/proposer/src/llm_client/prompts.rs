// Shared prompt fragments. Slot-specific prompts live in generation/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated figures anchored to the brief.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only use facts, prices and names that appear in the brief provided. \
    Do NOT invent customer names, prices, discounts or dates. \
    Where a metric would help but the brief does not give one, describe the benefit qualitatively.";
