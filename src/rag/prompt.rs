//! Prompt rendering for the answer generator.

use super::index::ScoredChunk;

/// Instructional template sent to the chat model. Retrieved chunk text is
/// substituted for `{context}` and the user question for `{question}`.
const PROMPT_TEMPLATE: &str = "\
Tu es l'assistant IA de la plateforme Ibn Sina.
Utilise les informations suivantes pour répondre à la question de l'utilisateur.
Si tu ne connais pas la réponse, dis simplement que tu ne sais pas, n'invente rien.
Sois courtois, concis et utile.

Contexte:
{context}

Question: {question}
Réponse:";

/// Render the answer prompt from retrieved chunks and the user question.
/// Chunks are concatenated in retrieval order, separated by blank lines.
pub fn render_prompt(chunks: &[ScoredChunk], question: &str) -> String {
    let context = chunks
        .iter()
        .map(|scored| scored.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    PROMPT_TEMPLATE
        .replace("{context}", &context)
        .replace("{question}", question)
}
