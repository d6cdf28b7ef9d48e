//! Store knowledge preamble given to the assistant.

/// Default name the assistant introduces itself on behalf of.
pub const DEFAULT_AGENT_NAME: &str = "Spur Gadgets";

/// Default FAQ facts about the store.
pub const DEFAULT_STORE_KNOWLEDGE: &str = "Store Name: Spur Gadgets. Shipping: USA/Canada only (3-5 days). Returns: 30 days. Support: 9am-5pm.";

/// Immutable store facts prepended to every completion request.
///
/// Built once at startup and shared read-only across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreKnowledge {
    agent_name: String,
    facts: String,
}

impl StoreKnowledge {
    /// Creates a preamble for the given store.
    pub fn new(agent_name: impl Into<String>, facts: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            facts: facts.into(),
        }
    }

    /// Name of the store the assistant speaks for.
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Raw FAQ facts.
    pub fn facts(&self) -> &str {
        &self.facts
    }

    /// Renders the system prompt sent as the first completion message.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are a support agent for {}. {}",
            self.agent_name, self.facts
        )
    }
}

impl Default for StoreKnowledge {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_NAME, DEFAULT_STORE_KNOWLEDGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_names_store_and_lists_facts() {
        let prompt = StoreKnowledge::default().system_prompt();
        assert_eq!(
            prompt,
            "You are a support agent for Spur Gadgets. Store Name: Spur Gadgets. \
             Shipping: USA/Canada only (3-5 days). Returns: 30 days. Support: 9am-5pm."
        );
    }

    #[test]
    fn custom_knowledge_is_rendered() {
        let knowledge = StoreKnowledge::new("Acme", "Returns: 14 days.");
        assert_eq!(knowledge.agent_name(), "Acme");
        assert_eq!(knowledge.facts(), "Returns: 14 days.");
        assert_eq!(
            knowledge.system_prompt(),
            "You are a support agent for Acme. Returns: 14 days."
        );
    }
}
