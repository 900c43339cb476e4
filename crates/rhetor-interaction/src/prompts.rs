//! Prompt templates for the hosted inference endpoint.
//!
//! The counter-argument prompt follows the Mistral instruct format, wrapping
//! the debate context in a single `[INST]` block.

use minijinja::{Environment, context};
use once_cell::sync::Lazy;

use crate::agent::ReplyRequest;

const COUNTER_ARGUMENT_TEMPLATE: &str = r#"<s>[INST] You are {{ persona_name }}, a debate sparring partner who is {{ persona_style }}. {{ persona_voice }}

You are participating in a respectful debate about: "{{ topic }}"

The other person argues {{ user_side }} and said: "{{ prior_argument }}"

You argue {{ agent_side }}. Provide a thoughtful counter-argument in 2-3 sentences. Be persuasive but respectful, and stay in character. [/INST]"#;

const IDENTIFICATION_FEEDBACK_TEMPLATE: &str = r#"<s>[INST] Provide brief coaching feedback for this fallacy identification:
User identified: {{ user_answer }}
Correct answer: {{ correct_answer }}
Give constructive feedback in 15-20 words. [/INST]"#;

static TEMPLATES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.add_template("counter_argument", COUNTER_ARGUMENT_TEMPLATE)
        .expect("counter_argument template must parse");
    env.add_template("identification_feedback", IDENTIFICATION_FEEDBACK_TEMPLATE)
        .expect("identification_feedback template must parse");
    env
});

/// Renders the counter-argument prompt for one opposing turn.
pub fn counter_argument_prompt(request: &ReplyRequest) -> Result<String, minijinja::Error> {
    let template = TEMPLATES.get_template("counter_argument")?;
    template.render(context! {
        persona_name => request.persona.name,
        persona_style => request.persona.style,
        persona_voice => request.persona.voice,
        topic => request.topic,
        prior_argument => request.prior_argument,
        user_side => request.side.opposite().to_string(),
        agent_side => request.side.to_string(),
    })
}

/// Renders the grading prompt for a fallacy-identification answer.
pub fn identification_feedback_prompt(
    user_answer: &str,
    correct_answer: &str,
) -> Result<String, minijinja::Error> {
    let template = TEMPLATES.get_template("identification_feedback")?;
    template.render(context! {
        user_answer => user_answer,
        correct_answer => correct_answer,
    })
}
