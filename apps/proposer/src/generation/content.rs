//! Generated content model: what the Content Generator hands to the assembler.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ProposalError;

/// Named slots the assembler fills with generated prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSlot {
    ValueProposition,
    ScopeSummary,
    Terms,
}

impl ContentSlot {
    #[cfg(test)]
    pub const ALL: [ContentSlot; 3] = [
        ContentSlot::ValueProposition,
        ContentSlot::ScopeSummary,
        ContentSlot::Terms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSlot::ValueProposition => "value_proposition",
            ContentSlot::ScopeSummary => "scope_summary",
            ContentSlot::Terms => "terms",
        }
    }
}

impl fmt::Display for ContentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePropositionSection {
    pub title: String,
    #[serde(default)]
    pub points: Vec<String>,
}

/// Structured value proposition reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueProposition {
    pub introduction: String,
    #[serde(default)]
    pub sections: Vec<ValuePropositionSection>,
    pub conclusion: String,
}

impl ValueProposition {
    /// True when the model returned the schema but no actual prose.
    pub fn is_blank(&self) -> bool {
        self.introduction.trim().is_empty()
            && self.conclusion.trim().is_empty()
            && self
                .sections
                .iter()
                .all(|s| s.points.iter().all(|p| p.trim().is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSubsection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subsections: Option<Vec<ContractSubsection>>,
}

/// Structured contract terms reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTerms {
    #[serde(default)]
    pub sections: Vec<ContractSection>,
}

impl ContractTerms {
    pub fn is_blank(&self) -> bool {
        self.sections
            .iter()
            .all(|s| s.title.trim().is_empty() && s.content.trim().is_empty())
    }
}

/// Content held by one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlotContent {
    Text(String),
    ValueProposition(ValueProposition),
    Terms(ContractTerms),
}

/// Slot name → generated content. Consumed once by the assembler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedContent {
    slots: BTreeMap<ContentSlot, SlotContent>,
}

impl GeneratedContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: ContentSlot, content: SlotContent) {
        self.slots.insert(slot, content);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn value_proposition(&self) -> Result<&ValueProposition, ProposalError> {
        match self.require(ContentSlot::ValueProposition)? {
            SlotContent::ValueProposition(vp) => Ok(vp),
            other => Err(wrong_kind(ContentSlot::ValueProposition, other)),
        }
    }

    pub fn scope_summary(&self) -> Result<&str, ProposalError> {
        match self.require(ContentSlot::ScopeSummary)? {
            SlotContent::Text(text) => Ok(text),
            other => Err(wrong_kind(ContentSlot::ScopeSummary, other)),
        }
    }

    pub fn terms(&self) -> Result<&ContractTerms, ProposalError> {
        match self.require(ContentSlot::Terms)? {
            SlotContent::Terms(terms) => Ok(terms),
            other => Err(wrong_kind(ContentSlot::Terms, other)),
        }
    }

    fn require(&self, slot: ContentSlot) -> Result<&SlotContent, ProposalError> {
        self.slots.get(&slot).ok_or_else(|| {
            ProposalError::Assembly(format!("generated content is missing slot '{slot}'"))
        })
    }
}

fn wrong_kind(slot: ContentSlot, found: &SlotContent) -> ProposalError {
    let kind = match found {
        SlotContent::Text(_) => "text",
        SlotContent::ValueProposition(_) => "value proposition",
        SlotContent::Terms(_) => "contract terms",
    };
    ProposalError::Assembly(format!("slot '{slot}' holds {kind} content"))
}
