//! Parsing of model responses into structured question lists.

use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());

/// Extracts up to `count` questions from a generated response.
///
/// Lines shaped like `1. ...` or `1) ...` have their numbering stripped;
/// blank lines are skipped. When no line matches the numbered form the
/// whole trimmed response is kept as a single question, so a model that
/// ignores the output format still yields something usable.
pub fn parse_questions(response: &str, count: usize) -> Vec<String> {
    let mut questions = Vec::new();
    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(found) = NUMBERED_LINE.find(line) {
            let question = line[found.end()..].trim();
            if !question.is_empty() {
                questions.push(question.to_string());
            }
        }
    }

    if questions.is_empty() {
        let trimmed = response.trim();
        if !trimmed.is_empty() {
            questions.push(trimmed.to_string());
        }
    }

    questions.truncate(count);
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_lines() {
        let response = "1. Why?\n2. How?\n3. What?\n";
        let questions = parse_questions(response, 3);
        assert_eq!(questions, vec!["Why?", "How?", "What?"]);
    }

    #[test]
    fn parses_parenthesis_numbering() {
        let response = "1) First question\n2) Second question";
        let questions = parse_questions(response, 3);
        assert_eq!(questions, vec!["First question", "Second question"]);
    }

    #[test]
    fn skips_blank_and_unnumbered_lines_between_questions() {
        let response = "Here are your questions:\n\n1. What is FNV?\n\n2. Why hash?\n";
        let questions = parse_questions(response, 3);
        assert_eq!(questions, vec!["What is FNV?", "Why hash?"]);
    }

    #[test]
    fn falls_back_to_whole_response() {
        let response = "What single question covers this document?";
        let questions = parse_questions(response, 3);
        assert_eq!(questions, vec!["What single question covers this document?"]);
    }

    #[test]
    fn caps_at_requested_count() {
        let response = "1. a\n2. b\n3. c\n4. d\n5. e";
        let questions = parse_questions(response, 3);
        assert_eq!(questions, vec!["a", "b", "c"]);
    }

    #[test]
    fn blank_response_yields_nothing() {
        assert!(parse_questions("   \n\n  ", 3).is_empty());
        assert!(parse_questions("", 3).is_empty());
    }

    #[test]
    fn numbering_without_text_is_dropped() {
        let response = "1. \n2. Real question";
        let questions = parse_questions(response, 3);
        assert_eq!(questions, vec!["Real question"]);
    }
}
