//! Descriptor metadata extraction
//!
//! Agent files carry no schema. The only metadata read out of them is a
//! single-quoted `description:` value, found by pattern match anywhere in the
//! text:
//!
//! ```markdown
//! ---
//! description: 'Generates code from patterns'
//! ---
//! ```
//!
//! Double quotes, escaped quotes and multi-line values are not recognised and
//! simply yield no description.

use lazy_regex::regex_captures;

use super::AGENT_SUFFIX;

/// Strip the agent suffix from a file name.
///
/// Returns `None` for files that are not agent descriptors.
pub fn agent_name(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(AGENT_SUFFIX)
}

/// Pull the first `description: '<text>'` value out of descriptor text
pub fn extract_description(content: &str) -> Option<String> {
    let (_, description) = regex_captures!(r"description:\s*'([^']+)'", content)?;
    Some(description.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_name_strips_suffix() {
        assert_eq!(agent_name("SampleAgent.agent.md"), Some("SampleAgent"));
        assert_eq!(agent_name("my.dotted.agent.md"), Some("my.dotted"));
    }

    #[test]
    fn test_agent_name_rejects_non_agents() {
        assert_eq!(agent_name("README.md"), None);
        assert_eq!(agent_name("agent.md"), None);
        assert_eq!(agent_name("Sample.agent.md.bak"), None);
    }

    #[test]
    fn test_extract_description_single_quoted() {
        let content = "---\nname: Bar\ndescription: 'Hello'\n---\n# Bar\n";
        assert_eq!(extract_description(content), Some("Hello".to_string()));
    }

    #[test]
    fn test_extract_description_allows_no_space_after_colon() {
        assert_eq!(extract_description("description:'tight'"), Some("tight".to_string()));
    }

    #[test]
    fn test_extract_description_first_match_wins() {
        let content = "description: 'first'\ndescription: 'second'\n";
        assert_eq!(extract_description(content), Some("first".to_string()));
    }

    #[test]
    fn test_extract_description_missing() {
        assert_eq!(extract_description("# Just a heading\n"), None);
    }

    #[test]
    fn test_extract_description_double_quoted_is_ignored() {
        assert_eq!(extract_description("description: \"Hello\"\n"), None);
    }

    #[test]
    fn test_extract_description_empty_value_is_ignored() {
        assert_eq!(extract_description("description: ''\n"), None);
    }
}
