//! Interactive terminal front end for document study sessions.
//!
//! Loads a document, prints its summary, then drops into a REPL where a
//! plain line is a question about the document and `:`-prefixed commands
//! drive the quiz flow.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use docent_extract::extract_file;
use docent_model::{ChatClient, ModelConfig};
use docent_session::{SessionConfig, StudySession};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

/// Study a document from the terminal: an automatic summary, free-form
/// questions, and generated quizzes, all grounded in the document text.
#[derive(Debug, Parser)]
#[command(name = "docent", version, about)]
struct Args {
    /// Path to the document to study (txt, md, or pdf).
    path: PathBuf,

    /// Chunk size in characters.
    #[arg(long, default_value_t = 500)]
    chunk_size: usize,

    /// Overlap between consecutive chunks in characters.
    #[arg(long, default_value_t = 100)]
    overlap: usize,

    /// Number of chunks retrieved as context per question.
    #[arg(long, default_value_t = 3)]
    top_k: usize,

    /// Number of challenge questions per quiz round.
    #[arg(long, default_value_t = 3)]
    questions: usize,

    /// Model name (overrides DOCENT_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Generation API base URL (overrides DOCENT_BASE_URL).
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    let mut model_config =
        ModelConfig::from_env().context("generation service is not configured")?;
    if let Some(base_url) = &args.base_url {
        model_config = model_config.with_base_url(base_url);
    }
    if let Some(model) = &args.model {
        model_config = model_config.with_model(model);
    }
    tracing::debug!(model = %model_config.model, base_url = %model_config.base_url, "generation client configured");
    let client = ChatClient::new(model_config).context("failed to build the generation client")?;

    let session_config = SessionConfig::builder()
        .chunk_size(args.chunk_size)
        .chunk_overlap(args.overlap)
        .top_k(args.top_k)
        .question_count(args.questions)
        .build()
        .context("invalid session parameters")?;

    let mut session = StudySession::builder()
        .config(session_config)
        .generator(Arc::new(client))
        .build()
        .context("failed to build the study session")?;

    let text = extract_file(&args.path)
        .await
        .with_context(|| format!("failed to extract text from {}", args.path.display()))?;
    let name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.path.display().to_string());
    session.load(name, text).context("failed to load the document")?;

    if let Some(document) = session.document() {
        println!("Loaded {} ({} characters)", document.name, document.text.chars().count());
        println!("{}", preview(&document.text, 280));
    }

    let summary = session.summarize().await.context("failed to summarize the document")?;
    println!("\nSummary\n-------\n{summary}");

    let chunk_count = session.index().await.context("failed to index the document")?;
    println!("\nIndexed {chunk_count} chunk(s). Ask a question, or try :help.");

    run_repl(&mut session).await
}

async fn run_repl(session: &mut StudySession) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("docent> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                match line {
                    ":quit" | ":q" => break,
                    ":help" => print_help(),
                    ":summary" => match session.summarize().await {
                        Ok(summary) => println!("{summary}"),
                        Err(e) => eprintln!("error: {e}"),
                    },
                    ":challenge" => {
                        if let Err(e) = run_challenge(session, &mut rl).await {
                            eprintln!("error: {e}");
                        }
                    }
                    _ => match session.answer(line).await {
                        Ok(answer) => {
                            println!("{}", answer.text);
                            println!("\nreferences\n----------\n{}", answer.context);
                        }
                        Err(e) => eprintln!("error: {e}"),
                    },
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    println!("bye");
    Ok(())
}

/// One quiz round: generate questions, collect an answer for each, and
/// print the evaluation. A failed evaluation is reported and the round
/// moves on to the next question.
async fn run_challenge(session: &mut StudySession, rl: &mut DefaultEditor) -> anyhow::Result<()> {
    let questions = session.generate_questions().await?;
    if questions.is_empty() {
        println!("no questions could be generated for this document");
        return Ok(());
    }

    for (number, question) in questions.iter().enumerate() {
        println!("\nQ{}: {question}", number + 1);
        let user_answer = match rl.readline("your answer> ") {
            Ok(line) => line.trim().to_string(),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("quiz abandoned");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        if user_answer.is_empty() {
            println!("skipped");
            continue;
        }
        match session.evaluate(question, &user_answer).await {
            Ok(feedback) => println!("{feedback}"),
            Err(e) => eprintln!("evaluation failed: {e}"),
        }
    }
    Ok(())
}

fn print_help() {
    println!("  <question>   ask anything about the document");
    println!("  :challenge   take a generated quiz on the document");
    println!("  :summary     reprint the document summary");
    println!("  :help        show this help");
    println!("  :quit        exit (Ctrl-D also works)");
}

/// First `limit` characters with whitespace collapsed, plus an ellipsis
/// when the text continues past the cut.
fn preview(text: &str, limit: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut cut: String = collapsed.chars().take(limit).collect();
    if collapsed.chars().count() > limit {
        cut.push_str("...");
    }
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(preview("one\n  two\tthree", 280), "one two three");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        assert_eq!(preview("abcdefgh", 5), "abcde...");
        assert_eq!(preview("abc", 5), "abc");
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["docent", "notes.txt"]);
        assert_eq!(args.path, PathBuf::from("notes.txt"));
        assert_eq!(args.chunk_size, 500);
        assert_eq!(args.overlap, 100);
        assert_eq!(args.top_k, 3);
        assert_eq!(args.questions, 3);
        assert!(args.model.is_none());
        assert!(args.base_url.is_none());
    }

    #[test]
    fn args_parse_overrides() {
        let args = Args::parse_from([
            "docent",
            "paper.pdf",
            "--chunk-size",
            "800",
            "--overlap",
            "200",
            "--top-k",
            "5",
            "--questions",
            "4",
            "--model",
            "sonar",
            "--base-url",
            "https://example.test",
        ]);
        assert_eq!(args.chunk_size, 800);
        assert_eq!(args.overlap, 200);
        assert_eq!(args.top_k, 5);
        assert_eq!(args.questions, 4);
        assert_eq!(args.model.as_deref(), Some("sonar"));
        assert_eq!(args.base_url.as_deref(), Some("https://example.test"));
    }
}
