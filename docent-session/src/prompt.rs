//! Prompt construction for study-session tasks.
//!
//! Each task variant carries the text it needs and renders to the final
//! prompt string along with the generation options tuned for that task.

use std::fmt::Write as _;

use docent_model::GenerateOptions;

/// A generation task expressed over document material.
///
/// Borrows its inputs so the session can hand over retrieved context and
/// user text without copying.
#[derive(Debug, Clone, Copy)]
pub enum TaskPrompt<'a> {
    /// Summarize a document excerpt.
    Summarize {
        /// Leading excerpt of the document text.
        excerpt: &'a str,
    },
    /// Answer a question grounded in retrieved context.
    Answer {
        /// Retrieved chunks joined into a context block.
        context: &'a str,
        /// The user's question.
        question: &'a str,
    },
    /// Generate comprehension questions from a document excerpt.
    GenerateQuestions {
        /// Leading excerpt of the document text.
        excerpt: &'a str,
        /// Number of questions to request.
        count: usize,
    },
    /// Evaluate a user's answer against retrieved context.
    Evaluate {
        /// Retrieved chunks joined into a context block.
        context: &'a str,
        /// The question the user answered.
        question: &'a str,
        /// The user's answer.
        answer: &'a str,
    },
}

impl TaskPrompt<'_> {
    /// Renders the full prompt text for this task.
    pub fn render(&self) -> String {
        match self {
            TaskPrompt::Summarize { excerpt } => format!(
                "Summarize the following content in under 150 words. The summary \
                 may be in points, a paragraph, or a mixture of both, and must be \
                 clean text without any hyperlinks.\n\n{excerpt}"
            ),
            TaskPrompt::Answer { context, question } => format!(
                "Answer the following question using only the provided document context.\n\
                 Include justification and quote the supporting source text. Do not cite\n\
                 external sources and do not use citation markers such as [1] or [2].\n\n\
                 CONTEXT:\n{context}\n\nQUESTION:\n{question}\n"
            ),
            TaskPrompt::GenerateQuestions { excerpt, count } => {
                let mut prompt = format!(
                    "Read the following document and generate {count} logic-based \
                     or comprehension-focused questions.\n\n\
                     Document:\n{excerpt}\n\nOutput format:\n"
                );
                for n in 1..=*count {
                    let _ = writeln!(prompt, "{n}. Question {n}");
                }
                prompt
            }
            TaskPrompt::Evaluate {
                context,
                question,
                answer,
            } => format!(
                "Given the question and the user's answer, compare it with the \
                 document's content and provide feedback.\n\n\
                 QUESTION: {question}\nUSER ANSWER: {answer}\n\n\
                 Use only the following document context to justify the evaluation.\n\n\
                 {context}\n\n\
                 Output format:\n\
                 - Evaluation: (Correct / Partially Correct / Incorrect)\n\
                 - Feedback: (with justification)\n"
            ),
        }
    }

    /// Returns the generation options tuned for this task.
    ///
    /// Summaries and answers stay factual at low temperature; question
    /// generation runs warmer to vary phrasing across calls.
    pub fn options(&self) -> GenerateOptions {
        match self {
            TaskPrompt::Summarize { .. } => GenerateOptions {
                max_tokens: 150,
                temperature: 0.3,
            },
            TaskPrompt::Answer { .. } => GenerateOptions {
                max_tokens: 300,
                temperature: 0.3,
            },
            TaskPrompt::GenerateQuestions { .. } => GenerateOptions {
                max_tokens: 400,
                temperature: 0.5,
            },
            TaskPrompt::Evaluate { .. } => GenerateOptions {
                max_tokens: 400,
                temperature: 0.3,
            },
        }
    }
}
