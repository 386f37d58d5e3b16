//! Content Generator: builds one prompt per content slot and collects the replies.
//!
//! Flow: build_prompts(brief) → generate_content(prompts, generator).
//! Slots are generated sequentially; the first failure aborts the rest.

use tracing::info;

use crate::brief::Brief;
use crate::errors::ProposalError;
use crate::generation::content::{
    ContentSlot, ContractTerms, GeneratedContent, SlotContent, ValueProposition,
};
use crate::generation::prompts::{
    CONTRACT_SECTIONS, SCOPE_SUMMARY_PROMPT_TEMPLATE, SCOPE_SUMMARY_SYSTEM, TERMS_PROMPT_TEMPLATE,
    TERMS_SYSTEM, VALUE_PROPOSITION_PROMPT_TEMPLATE, VALUE_PROPOSITION_SYSTEM,
};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{parse_json_reply, GenerationOptions, TextGenerator};

const VALUE_PROPOSITION_MAX_TOKENS: u32 = 2000;
const SCOPE_SUMMARY_MAX_TOKENS: u32 = 1000;
const TERMS_MAX_TOKENS: u32 = 8096;

/// A fully rendered prompt for one slot.
#[derive(Debug, Clone)]
pub struct SlotPrompt {
    pub slot: ContentSlot,
    pub prompt: String,
    pub options: GenerationOptions,
}

/// Builds the prompts for every slot: value proposition, scope summary, terms.
pub fn build_prompts(brief: &Brief) -> Result<Vec<SlotPrompt>, ProposalError> {
    let customer_json = to_json(&brief.customer)?;
    let product_json = to_json(&brief.product)?;
    let brief_json = to_json(brief)?;

    let value_proposition = VALUE_PROPOSITION_PROMPT_TEMPLATE
        .replace("{customer_json}", &customer_json)
        .replace("{product_json}", &product_json)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION);

    let setup_items = if brief.setup_items.is_empty() {
        "- (none listed)".to_string()
    } else {
        bullet_list(brief.setup_items.iter().map(String::as_str))
    };
    let pricing_lines = bullet_list(brief.pricing.iter().map(|p| match &p.detail {
        Some(detail) => format!("{}: {} ({})", p.label, p.price, detail),
        None => format!("{}: {}", p.label, p.price),
    }));

    let scope_summary = SCOPE_SUMMARY_PROMPT_TEMPLATE
        .replace("{customer_name}", &brief.customer.name)
        .replace("{product_name}", &brief.product.name)
        .replace("{setup_items}", &setup_items)
        .replace("{pricing_lines}", &pricing_lines)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION);

    let section_list = CONTRACT_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, title)| format!("{}. {}", i + 1, title))
        .collect::<Vec<_>>()
        .join("\n");

    let terms = TERMS_PROMPT_TEMPLATE
        .replace("{brief_json}", &brief_json)
        .replace("{section_list}", &section_list)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION);

    Ok(vec![
        SlotPrompt {
            slot: ContentSlot::ValueProposition,
            prompt: value_proposition,
            options: GenerationOptions::new(
                format!("{VALUE_PROPOSITION_SYSTEM} {JSON_ONLY_SYSTEM}"),
                VALUE_PROPOSITION_MAX_TOKENS,
            ),
        },
        SlotPrompt {
            slot: ContentSlot::ScopeSummary,
            prompt: scope_summary,
            options: GenerationOptions::new(SCOPE_SUMMARY_SYSTEM, SCOPE_SUMMARY_MAX_TOKENS),
        },
        SlotPrompt {
            slot: ContentSlot::Terms,
            prompt: terms,
            options: GenerationOptions::new(
                format!("{TERMS_SYSTEM} {JSON_ONLY_SYSTEM}"),
                TERMS_MAX_TOKENS,
            ),
        },
    ])
}

/// Sends every prompt to `generator` and validates the replies.
pub async fn generate_content(
    prompts: &[SlotPrompt],
    generator: &dyn TextGenerator,
) -> Result<GeneratedContent, ProposalError> {
    let mut content = GeneratedContent::new();

    for prompt in prompts {
        let slot = prompt.slot;
        info!("Generating '{}'", slot);

        let reply = generator
            .generate(&prompt.prompt, &prompt.options)
            .await
            .map_err(|e| ProposalError::from_llm(slot.as_str(), e))?;

        let parsed = parse_slot(slot, &reply)?;
        content.insert(slot, parsed);
    }

    info!("Generated {} content slots", content.len());
    Ok(content)
}

fn parse_slot(slot: ContentSlot, reply: &str) -> Result<SlotContent, ProposalError> {
    let empty = || ProposalError::EmptyResponse(slot.as_str().to_string());

    match slot {
        ContentSlot::ValueProposition => {
            let vp: ValueProposition =
                parse_json_reply(reply).map_err(|e| ProposalError::from_llm(slot.as_str(), e))?;
            if vp.is_blank() {
                return Err(empty());
            }
            Ok(SlotContent::ValueProposition(vp))
        }
        ContentSlot::ScopeSummary => {
            let text = reply.trim();
            if text.is_empty() {
                return Err(empty());
            }
            Ok(SlotContent::Text(text.to_string()))
        }
        ContentSlot::Terms => {
            let terms: ContractTerms =
                parse_json_reply(reply).map_err(|e| ProposalError::from_llm(slot.as_str(), e))?;
            if terms.is_blank() {
                return Err(empty());
            }
            Ok(SlotContent::Terms(terms))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ProposalError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ProposalError::Generation(format!("Failed to serialize brief: {e}")))
}

fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::parser::parse_brief;
    use crate::llm_client::testing::{ScriptedGenerator, SCOPE_SUMMARY_REPLY, TERMS_REPLY};
    use crate::llm_client::LlmError;

    fn acme() -> Brief {
        parse_brief(
            "CUSTOMER: Acme Corp\nPRODUCT: Widget Pro\nSETUP FEE: $500\n- Onboarding workshop\nPAYMENT TERMS: Net 30\n",
        )
        .unwrap()
    }

    #[test]
    fn test_prompts_cover_every_slot_in_order() {
        let prompts = build_prompts(&acme()).unwrap();
        let slots: Vec<ContentSlot> = prompts.iter().map(|p| p.slot).collect();
        assert_eq!(slots, ContentSlot::ALL.to_vec());
    }

    #[test]
    fn test_prompts_have_no_unfilled_placeholders() {
        for prompt in build_prompts(&acme()).unwrap() {
            for placeholder in [
                "{customer_json}",
                "{product_json}",
                "{brief_json}",
                "{customer_name}",
                "{product_name}",
                "{setup_items}",
                "{pricing_lines}",
                "{section_list}",
                "{grounding_instruction}",
            ] {
                assert!(
                    !prompt.prompt.contains(placeholder),
                    "{} prompt still contains {placeholder}",
                    prompt.slot
                );
            }
        }
    }

    #[test]
    fn test_prompts_carry_brief_facts() {
        let prompts = build_prompts(&acme()).unwrap();
        assert!(prompts[0].prompt.contains("Acme Corp"));
        assert!(prompts[1].prompt.contains("Setup Fee: $500"));
        assert!(prompts[1].prompt.contains("- Onboarding workshop"));
        assert!(prompts[2].prompt.contains("8. General Terms and Conditions"));
        assert!(prompts[2].options.system.contains("valid JSON only"));
        assert_eq!(prompts[2].options.max_tokens, TERMS_MAX_TOKENS);
    }

    #[tokio::test]
    async fn test_generate_content_fills_all_slots() {
        let generator = ScriptedGenerator::happy();
        let prompts = build_prompts(&acme()).unwrap();

        let content = generate_content(&prompts, &generator).await.unwrap();

        assert_eq!(content.len(), 3);
        assert_eq!(generator.calls(), 3);
        assert!(generator.prompts()[1].contains("Widget Pro"));
        let vp = content.value_proposition().unwrap();
        assert_eq!(vp.sections.len(), 2);
        assert_eq!(content.scope_summary().unwrap(), SCOPE_SUMMARY_REPLY);
        assert_eq!(content.terms().unwrap().sections.len(), 2);
    }

    #[tokio::test]
    async fn test_authentication_failure_stops_remaining_slots() {
        let generator = ScriptedGenerator::new(vec![Err(LlmError::Unauthorized {
            status: 401,
            message: "invalid x-api-key".to_string(),
        })]);
        let prompts = build_prompts(&acme()).unwrap();

        let err = generate_content(&prompts, &generator).await.unwrap_err();

        assert!(matches!(err, ProposalError::Authentication(_)));
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_scope_summary_is_empty_response() {
        let generator = ScriptedGenerator::new(vec![
            Ok(crate::llm_client::testing::VALUE_PROPOSITION_REPLY.to_string()),
            Ok("   ".to_string()),
            Ok(TERMS_REPLY.to_string()),
        ]);
        let prompts = build_prompts(&acme()).unwrap();

        let err = generate_content(&prompts, &generator).await.unwrap_err();

        assert!(matches!(err, ProposalError::EmptyResponse(ref slot) if slot == "scope_summary"));
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_json_value_proposition_is_generation_failure() {
        let generator = ScriptedGenerator::new(vec![Ok("Here are some ideas...".to_string())]);
        let prompts = build_prompts(&acme()).unwrap();

        let err = generate_content(&prompts, &generator).await.unwrap_err();

        assert!(matches!(err, ProposalError::Generation(ref m) if m.contains("value_proposition")));
    }

    #[tokio::test]
    async fn test_empty_terms_sections_is_empty_response() {
        let generator = ScriptedGenerator::new(vec![
            Ok(crate::llm_client::testing::VALUE_PROPOSITION_REPLY.to_string()),
            Ok(SCOPE_SUMMARY_REPLY.to_string()),
            Ok(r#"{"sections": []}"#.to_string()),
        ]);
        let prompts = build_prompts(&acme()).unwrap();

        let err = generate_content(&prompts, &generator).await.unwrap_err();

        assert!(matches!(err, ProposalError::EmptyResponse(ref slot) if slot == "terms"));
    }
}
