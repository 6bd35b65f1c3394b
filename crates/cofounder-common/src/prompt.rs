use std::fmt;

use serde::{Deserialize, Serialize};

/// Prompt used for the default co-founder analysis.
pub const COFOUNDER_PROMPT: &str = r#"You are an experienced startup co-founder, product manager, and technical architect.

Given a startup idea, perform the following tasks step by step:

## 1. Idea Clarity
- Define the core problem being solved
- Identify the target users (be specific)
- Explain why this problem matters right now
- Describe the unique angle or insight

## 2. MVP Design
- List 3-5 essential features only (no more)
- Describe a simple user flow in numbered steps
- Explicitly mention what should NOT be built initially
- Suggest one "wow" feature that differentiates this

## 3. Technical Plan
- Recommend frontend and backend stack with reasoning
- List key APIs, services, or third-party tools needed
- Explain the high-level architecture in simple terms
- Mention deployment strategy

## 4. Execution Roadmap
- Provide a detailed 2-week sprint plan (Day 1-3, Day 4-7, Day 8-10, Day 11-14)
- List the first 5 concrete action steps to start TODAY
- Identify the biggest risk and how to mitigate it

## 5. Judge Pitch
- Write a compelling 30-second elevator pitch
- Include a one-liner hook that grabs attention
- Clearly explain the tech innovation
- End with impact statement

IMPORTANT FORMATTING RULES:
- Use markdown headings (## for sections, ### for subsections)
- Use bullet points and numbered lists
- Keep language concise, realistic, and practical
- Do NOT use generic filler - be specific to this idea
- Each section should be clearly separated"#;

/// Prompt used when the idea is reframed as a hackathon pitch.
pub const JUDGE_PROMPT: &str = r#"You are presenting a startup project to a panel of expert hackathon judges.

Given a startup idea, reframe and explain it as a compelling hackathon presentation.

Your response must cover:

## Impact & Vision
- What real-world problem does this solve?
- How many people are affected?
- What does the world look like if this succeeds?

## Innovation & Uniqueness
- What makes this approach different from existing solutions?
- What is the creative or technical insight?
- Why hasn't this been done before (or done well)?

## Technical Depth
- What is the architecture?
- How is AI/Gemini used in a non-trivial way?
- What are the hardest technical challenges solved?

## Demo Walkthrough
- Describe the ideal 60-second live demo flow
- What is the "wow moment" judges will remember?

## Why This Team Should Win
- Summarize the project's strongest arguments
- Address potential judge concerns proactively
- End with a memorable closing statement

FORMATTING RULES:
- Use markdown headings and bullet points
- Be persuasive but honest
- Focus on IMPACT, INNOVATION, and TECHNICAL DEPTH
- Write as if speaking to judges, not reading a document"#;

const IDEA_SEPARATOR: &str = "\n\n---\n\nSTARTUP IDEA:\n";

/// Analysis style, selecting which prompt template is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Cofounder,
    Judge,
}

impl Mode {
    pub fn from_judge_flag(judge_mode: bool) -> Self {
        if judge_mode {
            Mode::Judge
        } else {
            Mode::Cofounder
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            Mode::Cofounder => COFOUNDER_PROMPT,
            Mode::Judge => JUDGE_PROMPT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Cofounder => "cofounder",
            Mode::Judge => "judge",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assemble the full prompt: template, separator, then the idea with surrounding
/// whitespace removed.
pub fn build_prompt(mode: Mode, idea: &str) -> String {
    format!("{}{IDEA_SEPARATOR}{}", mode.template(), idea.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_prompt_appends_trimmed_idea() {
        let prompt = build_prompt(Mode::Cofounder, "  an app for dog walkers \n");
        assert!(prompt.starts_with(COFOUNDER_PROMPT));
        assert!(prompt.ends_with("\n\n---\n\nSTARTUP IDEA:\nan app for dog walkers"));
    }

    #[test]
    fn mode_selects_template() {
        assert_eq!(Mode::from_judge_flag(false).template(), COFOUNDER_PROMPT);
        assert_eq!(Mode::from_judge_flag(true).template(), JUDGE_PROMPT);
        assert!(build_prompt(Mode::Judge, "x").starts_with(JUDGE_PROMPT));
    }

    #[test]
    fn templates_declare_their_sections() {
        assert!(COFOUNDER_PROMPT.contains("## 1. Idea Clarity"));
        assert!(COFOUNDER_PROMPT.contains("## 5. Judge Pitch"));
        assert!(JUDGE_PROMPT.contains("## Impact & Vision"));
        assert!(JUDGE_PROMPT.contains("## Why This Team Should Win"));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Judge).unwrap(), "\"judge\"");
        assert_eq!(Mode::Cofounder.to_string(), "cofounder");
    }
}
