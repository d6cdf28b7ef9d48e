//! Support assistant persona configuration

use serde::Deserialize;

use crate::domain::chat::{StoreKnowledge, DEFAULT_AGENT_NAME, DEFAULT_STORE_KNOWLEDGE};

/// Persona and store facts injected into every completion request
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    #[serde(default = "default_knowledge")]
    pub knowledge: String,
}

impl AssistantConfig {
    pub fn store_knowledge(&self) -> StoreKnowledge {
        StoreKnowledge::new(self.agent_name.clone(), self.knowledge.clone())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            knowledge: default_knowledge(),
        }
    }
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

fn default_knowledge() -> String {
    DEFAULT_STORE_KNOWLEDGE.to_string()
}
