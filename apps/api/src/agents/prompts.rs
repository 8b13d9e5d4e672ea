// Prompt templates for LLM interactions
//
// Holds the default role prompts of the four chain agents and the
// templates used to hand one agent's result to the next.

use std::collections::HashMap;

/// Prompt template structure
///
/// Placeholders are written `{{name}}`.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub version: String,
    pub template: String,
}

impl PromptTemplate {
    /// Render the template with variables
    ///
    /// Substitution is a single left-to-right pass: text inserted for one
    /// placeholder is never scanned again, so user input containing
    /// `{{...}}` comes through unchanged. Unknown placeholders are kept
    /// as written.
    pub fn render(&self, variables: &HashMap<&str, &str>) -> String {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            match after_open.find("}}") {
                Some(end) => {
                    let key = after_open[..end].trim();
                    match variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);

        out
    }
}

pub mod library {
    use super::PromptTemplate;

    pub const AGENT1_PROMPT: &str = "\
You are Agent1, an expert problem solver specializing in providing initial analysis and understanding of the question.

Objectives:
- Understand the problem deeply.
- Identify key components and requirements of the question.
- Provide a clear, concise summary of the problem.
- Determine the language of the original question and use it for your response.

Instructions:
- Analyze the question thoroughly.
- Break down complex questions into simpler components.
- Identify any implicit requirements or constraints.
- Do not provide a solution or code at this stage.
- Summarize your understanding in the same language as the original question.

Your response should be a clear, concise analysis of the problem, setting the stage for further problem-solving.";

    pub const AGENT2_PROMPT: &str = "\
You are Agent2, a creative thinker who builds upon the initial analysis to propose potential solution approaches.

Objectives:
- Review the initial analysis provided by Agent1.
- Propose multiple potential approaches to solving the problem.
- Consider innovative and unconventional solutions.
- Highlight the pros and cons of each approach.

Instructions:
- Build upon the analysis provided by Agent1.
- Suggest at least two different approaches to solving the problem.
- For each approach, briefly explain its rationale and potential challenges.
- Do not implement or provide detailed solutions at this stage.
- Maintain the same language as used in the original question and initial analysis.

Your response should be a thoughtful exploration of potential solution strategies, providing a foundation for further refinement.";

    pub const AGENT3_PROMPT: &str = "\
You are Agent3, a critical thinker who evaluates and refines the proposed solutions, ensuring technical accuracy and practicality.

Objectives:
- Evaluate the approaches suggested by Agent2.
- Refine and combine ideas to form a coherent solution strategy.
- Ensure the solution is technically sound and practically feasible.
- Address any potential issues or limitations.

Instructions:
- Critically analyze each approach proposed by Agent2.
- Combine the best elements from different approaches if applicable.
- Refine the chosen approach, addressing any weaknesses or limitations.
- Ensure the solution aligns with the original question and requirements.
- Do not provide implementation details or code at this stage.
- Continue using the same language as the original question and previous analyses.

Your response should be a well-reasoned refinement of the solution strategy, preparing for the final answer formulation.";

    pub const AGENT4_PROMPT: &str = "\
You are Agent4, responsible for synthesizing all previous inputs into a comprehensive final answer that directly addresses the original question.

Objectives:
- Review all previous agents' inputs.
- Formulate a clear, concise, and comprehensive answer to the original question.
- Ensure the answer is practical, implementable, and directly relevant.
- Present the final answer in the same language as the original question.

Instructions:
- Carefully review the original question and all previous agents' inputs.
- Synthesize a final answer that directly addresses the original question.
- Ensure the answer is clear, concise, and easy to understand.
- Do not include code unless it's explicitly requested in the original question.
- Focus on providing a practical, implementable solution or answer.
- Use the same language as the original question for your response.
- If the question requires steps or a list, present them in a clear, numbered format.

Your response should be the definitive answer to the original question, presented in a clear, professional manner that can be easily understood and applied by the end user.";

    /// Default role prompts in chain order
    pub fn default_role_prompts() -> [&'static str; 4] {
        [AGENT1_PROMPT, AGENT2_PROMPT, AGENT3_PROMPT, AGENT4_PROMPT]
    }

    /// Input for the next agent after a successful step.
    /// Variables: `question`, `previous`.
    pub fn handoff_success() -> PromptTemplate {
        PromptTemplate {
            name: "handoff_success".to_string(),
            version: "1.0.0".to_string(),
            template: "Original question: {{question}}\n\n\
                       Previous analysis: {{previous}}\n\n\
                       Based on this information and the chat history, \
                       please provide your analysis or improvement."
                .to_string(),
        }
    }

    /// Input for the next agent after a failed step.
    /// Variables: `question`.
    pub fn handoff_failure() -> PromptTemplate {
        PromptTemplate {
            name: "handoff_failure".to_string(),
            version: "1.0.0".to_string(),
            template: "Original question: {{question}}\n\n\
                       Previous agent encountered an error. \
                       Please provide your best analysis or response based on \
                       the original question and chat history."
                .to_string(),
        }
    }

    /// Final user turn sent to the model: role prompt prepended to the input.
    /// Variables: `role_prompt`, `input`.
    pub fn role_turn() -> PromptTemplate {
        PromptTemplate {
            name: "role_turn".to_string(),
            version: "1.0.0".to_string(),
            template: "System: {{role_prompt}}\nHuman: {{input}}".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::library::*;
    use super::*;

    fn vars<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn render_substitutes_variables() {
        let template = PromptTemplate {
            name: "t".to_string(),
            version: "1".to_string(),
            template: "Hello {{name}}, you are {{ age }}".to_string(),
        };

        let out = template.render(&vars(&[("name", "Ada"), ("age", "36")]));

        assert_eq!(out, "Hello Ada, you are 36");
    }

    #[test]
    fn render_keeps_unknown_and_unclosed_placeholders() {
        let template = PromptTemplate {
            name: "t".to_string(),
            version: "1".to_string(),
            template: "{{known}} {{unknown}} {{open".to_string(),
        };

        let out = template.render(&vars(&[("known", "x")]));

        assert_eq!(out, "x {{unknown}} {{open");
    }

    #[test]
    fn render_does_not_rescan_inserted_text() {
        let out = handoff_success().render(&vars(&[
            ("question", "what is {{previous}}?"),
            ("previous", "done"),
        ]));

        assert!(out.starts_with("Original question: what is {{previous}}?\n\n"));
        assert!(out.contains("Previous analysis: done\n\n"));
    }

    #[test]
    fn handoff_success_matches_expected_text() {
        let out = handoff_success().render(&vars(&[("question", "Q"), ("previous", "P")]));

        assert_eq!(
            out,
            "Original question: Q\n\nPrevious analysis: P\n\nBased on this information and the chat history, please provide your analysis or improvement."
        );
    }

    #[test]
    fn handoff_failure_matches_expected_text() {
        let out = handoff_failure().render(&vars(&[("question", "Q")]));

        assert_eq!(
            out,
            "Original question: Q\n\nPrevious agent encountered an error. Please provide your best analysis or response based on the original question and chat history."
        );
    }

    #[test]
    fn role_turn_prepends_role_prompt() {
        let out = role_turn().render(&vars(&[("role_prompt", "Be brief."), ("input", "Hi")]));

        assert_eq!(out, "System: Be brief.\nHuman: Hi");
    }

    #[test]
    fn default_prompts_are_distinct_and_ordered() {
        let prompts = default_role_prompts();

        for (i, prompt) in prompts.iter().enumerate() {
            assert!(prompt.starts_with(&format!("You are Agent{}", i + 1)));
        }
        assert_ne!(prompts[0], prompts[3]);
    }
}
