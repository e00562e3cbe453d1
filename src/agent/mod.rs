//! Stub coding agent
//!
//! Renders review, security and improvement prompts for a piece of code.
//! No model is called: each operation returns the rendered prompt behind an
//! `[SDK NOT INSTALLED]` marker.

use tera::{Context, Tera};
use thiserror::Error;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Language assumed when none is given
pub const DEFAULT_LANGUAGE: &str = "python";

const REVIEW_TEMPLATE: &str = r#"
Please review this {{ language }} code and provide feedback on:
1. Code quality and readability
2. Potential bugs or issues
3. Performance concerns
4. Security vulnerabilities
5. Adherence to best practices

Code to review:
```{{ language }}
{{ code }}
```

Please provide constructive, actionable feedback.
"#;

const SECURITY_TEMPLATE: &str = r#"
Perform a security analysis of this {{ language }} code. Look for:
1. SQL injection vulnerabilities
2. XSS vulnerabilities
3. Command injection risks
4. Authentication/authorization issues
5. Data exposure risks
6. Cryptographic issues
7. Input validation problems

Code to analyze:
```{{ language }}
{{ code }}
```

Provide specific examples and remediation recommendations.
"#;

const IMPROVE_TEMPLATE: &str = r#"
Suggest improvements for this {{ language }} code:
1. Code structure and organization
2. Performance optimizations
3. Simplification opportunities
4. Modern language features to use
5. Design patterns that might help

Code to improve:
```{{ language }}
{{ code }}
```

Provide before/after examples where helpful.
"#;

/// Agent errors
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("API key is required. Set ANTHROPIC_API_KEY environment variable or pass an api key.")]
    MissingApiKey,

    #[error("Failed to render prompt: {0}")]
    Template(#[from] tera::Error),
}

/// What the agent is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Review,
    Security,
    Improve,
}

impl Operation {
    fn template(self) -> &'static str {
        match self {
            Operation::Review => "review",
            Operation::Security => "security",
            Operation::Improve => "improve",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Operation::Review => "Code review would be performed here",
            Operation::Security => "Security analysis would be performed here",
            Operation::Improve => "Improvement suggestions would be provided here",
        }
    }
}

pub struct CodingAgent {
    api_key: String,
    templates: Tera,
}

impl std::fmt::Debug for CodingAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodingAgent")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl CodingAgent {
    /// Create an agent; the key falls back to `ANTHROPIC_API_KEY`
    pub fn new(api_key: Option<String>) -> Result<Self, AgentError> {
        Self::with_lookup(api_key, |key| std::env::var(key).ok())
    }

    /// Create an agent, reading the fallback key through `lookup`
    pub fn with_lookup<F>(api_key: Option<String>, lookup: F) -> Result<Self, AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = api_key
            .or_else(|| lookup(API_KEY_VAR))
            .filter(|key| !key.trim().is_empty())
            .ok_or(AgentError::MissingApiKey)?;

        let mut templates = Tera::default();
        templates.add_raw_templates(vec![
            (Operation::Review.template(), REVIEW_TEMPLATE),
            (Operation::Security.template(), SECURITY_TEMPLATE),
            (Operation::Improve.template(), IMPROVE_TEMPLATE),
        ])?;

        tracing::debug!("coding agent initialized");
        Ok(Self { api_key, templates })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn review_code(&self, code: &str, language: Option<&str>) -> Result<String, AgentError> {
        self.run(Operation::Review, code, language)
    }

    pub fn analyze_security(
        &self,
        code: &str,
        language: Option<&str>,
    ) -> Result<String, AgentError> {
        self.run(Operation::Security, code, language)
    }

    pub fn suggest_improvements(
        &self,
        code: &str,
        language: Option<&str>,
    ) -> Result<String, AgentError> {
        self.run(Operation::Improve, code, language)
    }

    /// Render the prompt for `operation`
    pub fn prompt(
        &self,
        operation: Operation,
        code: &str,
        language: Option<&str>,
    ) -> Result<String, AgentError> {
        let mut context = Context::new();
        context.insert("language", language.unwrap_or(DEFAULT_LANGUAGE));
        context.insert("code", code);
        Ok(self.templates.render(operation.template(), &context)?)
    }

    pub fn run(
        &self,
        operation: Operation,
        code: &str,
        language: Option<&str>,
    ) -> Result<String, AgentError> {
        let prompt = self.prompt(operation, code, language)?;
        Ok(format!(
            "[SDK NOT INSTALLED] {} for:\n{}",
            operation.placeholder(),
            prompt
        ))
    }
}
