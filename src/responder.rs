//! Free-text request handling for the agent front ends
//!
//! The responder is a pure pattern matcher over the user's input. It keeps no
//! state between requests and makes no external calls.

/// Reply to a bare greeting
pub const GREETING: &str = "Hii Ishwarya!";

/// Prefix of the reply that dumps the bootstrap instructions
pub const INSTRUCTIONS_HEADER: &str = "Agent Instructions:";

/// Agent whose instructions are loaded at activation
pub const DEFAULT_BOOTSTRAP_AGENT: &str = "SampleAgent";

#[derive(Debug, Clone, Default)]
pub struct Responder {
    instructions: String,
    bootstrap_agent: String,
}

impl Responder {
    pub fn new(instructions: String, bootstrap_agent: &str) -> Self {
        Self {
            instructions,
            bootstrap_agent: bootstrap_agent.to_string(),
        }
    }

    #[cfg(test)]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Answer one request
    pub fn respond(&self, input: &str) -> String {
        let lowered = input.to_lowercase();

        if lowered == "hi" || lowered == "hii" {
            return GREETING.to_string();
        }

        if lowered.contains("show instructions") {
            return format!("{}\n{}", INSTRUCTIONS_HEADER, self.instructions);
        }

        format!("Your request: {}\n{}", input, self.trailer())
    }

    fn trailer(&self) -> String {
        format!(
            "(Following agent instructions from .github/agents/{}{})",
            self.bootstrap_agent,
            crate::agent::AGENT_SUFFIX
        )
    }
}
