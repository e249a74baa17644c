//! Prompt assembly for the RAG pipeline.

/// The prompt sent to the model. `{context}`, `{score}` and `{question}`
/// are the only placeholders.
pub const PROMPT_TEMPLATE: &str = "\
You are a compassionate and helpful assistant for a mental health support chatbot.
Your primary role is to answer the user's questions based exclusively on the provided context.
The user has completed a PHQ-9 questionnaire and their score is provided below. Use this score to provide a more empathetic and relevant response.
Do not use any external knowledge. If the context does not contain the answer, state that you cannot find the information in the provided documents.

CONTEXT:
{context}

USER'S PHQ-9 SCORE: {score}

QUESTION:
{question}

ANSWER:
";

/// Values flowing from retrieval into the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainInput {
    pub context: String,
    pub question: String,
    pub score: i64,
}

/// Render [`PROMPT_TEMPLATE`] for `input`.
pub fn build_prompt(input: &ChainInput) -> String {
    render(PROMPT_TEMPLATE, input)
}

/// Substitute placeholders in a single pass over `template`.
///
/// Substituted values are copied verbatim, so placeholder text inside them
/// is never expanded.
pub fn render(template: &str, input: &ChainInput) -> String {
    let score = input.score.to_string();
    let mut out = String::with_capacity(
        template.len() + input.context.len() + input.question.len() + score.len(),
    );
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let substitution = [
            ("{context}", input.context.as_str()),
            ("{score}", score.as_str()),
            ("{question}", input.question.as_str()),
        ]
        .into_iter()
        .find(|(placeholder, _)| tail.starts_with(placeholder));

        match substitution {
            Some((placeholder, value)) => {
                out.push_str(value);
                rest = &tail[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
