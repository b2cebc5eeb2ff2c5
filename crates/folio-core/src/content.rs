//! Fixed portfolio texts fed into the prompts.

use serde::{Deserialize, Serialize};

const DEFAULT_PERSONA: &str = "You are an AI assistant for a software testing portfolio website.";

const DEFAULT_BIOGRAPHY: &str = "Cognizant Technology Solutions: Architected hybrid automation \
frameworks using Selenium & TestNG, introduced data-driven patterns and parallel execution to cut \
regression time ~30%. Built REST API test suites using RestAssured including contract/negative \
tests. Led UiPath bot validations (Studio & Orchestrator) and integrated SQL-based end-to-end \
checks. Improved release confidence and reduced manual regression effort across 10+ healthcare \
apps. Bytexus Software Solutions: Built front-end features in React, improved UI performance, and \
added integration tests for API endpoints. Cognizant Technology Solutions (Intern): Executed \
automation & manual test cases for claims processing. Performed DB validations and coordinated \
release verification.";

const DEFAULT_SITE_CONTEXT: &str = "Portfolio sections: About: SDET with 3 years experience in \
Automation, API, RPA. Experience: Cognizant, Bytexus, automation, React, API testing. Projects: \
Advance Bankist, PlayWithText, Invoice Bot. Skills: Selenium, TestNG, RestAssured, UiPath, SQL, \
Java, JavaScript, Azure DevOps, Jenkins, JIRA.";

/// Persona, biography and site context. Every field can be overridden from the
/// config file; missing fields fall back to the built-in texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub persona: String,
    pub biography: String,
    pub site_context: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            persona: DEFAULT_PERSONA.to_string(),
            biography: DEFAULT_BIOGRAPHY.to_string(),
            site_context: DEFAULT_SITE_CONTEXT.to_string(),
        }
    }
}

impl Profile {
    pub fn summary_prompt(&self) -> String {
        format!(
            "Summarize this experience in 2 lines for a portfolio: {}",
            self.biography
        )
    }

    pub fn search_prompt(&self, query: &str) -> String {
        format!(
            "Given this portfolio context: {}\nAnswer this user query: {}",
            self.site_context, query
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_prompt_layout() {
        let profile = Profile {
            site_context: "ctx".into(),
            ..Profile::default()
        };
        assert_eq!(
            profile.search_prompt("who?"),
            "Given this portfolio context: ctx\nAnswer this user query: who?"
        );
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"persona":"Be terse."}"#).unwrap();
        assert_eq!(profile.persona, "Be terse.");
        assert_eq!(profile.biography, DEFAULT_BIOGRAPHY);
        assert!(profile.summary_prompt().ends_with(DEFAULT_BIOGRAPHY));
    }
}
