//! Line-oriented parsing of generated transcripts.
//!
//! A transcript line is an utterance when it reads `LABEL: text`, where the
//! label is a run of ASCII uppercase letters. Everything else (stage
//! directions, headings, blank lines) is dropped from structured output but
//! remains in the raw text for single-voice narration.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Utterance;

static LABELED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+):\s*(.+)$").expect("valid labeled line regex"));

static LABEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[A-Z]+:\s*").expect("valid label prefix regex"));

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]+").expect("valid line break regex"));

/// Split a raw transcript into labeled utterances, in line order.
///
/// Blank lines and lines without a `LABEL:` prefix are skipped and do not
/// consume an `order_index`. Never fails; unrecognized input yields an empty vec.
#[must_use]
pub fn parse_transcript(raw: &str) -> Vec<Utterance> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let caps = LABELED_LINE.captures(line)?;
            Some((caps[1].to_string(), caps[2].to_string()))
        })
        .enumerate()
        .map(|(order_index, (speaker_label, text))| Utterance {
            speaker_label,
            text,
            order_index,
        })
        .collect()
}

/// The transcript as one line of narration: speaker labels stripped and
/// line breaks collapsed to single spaces.
#[must_use]
pub fn flatten_transcript(raw: &str) -> String {
    let unlabeled = LABEL_PREFIX.replace_all(raw, "");
    LINE_BREAKS.replace_all(&unlabeled, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_labeled_line() {
        let utterances = parse_transcript("ALEX: Hello there");
        assert_eq!(
            utterances,
            vec![Utterance {
                speaker_label: "ALEX".to_string(),
                text: "Hello there".to_string(),
                order_index: 0,
            }]
        );
    }

    #[test]
    fn unlabeled_lines_are_dropped() {
        let utterances = parse_transcript("not a label\nHOST: Welcome");
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].speaker_label, "HOST");
        assert_eq!(utterances[0].text, "Welcome");
        assert_eq!(utterances[0].order_index, 0);
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(parse_transcript("").is_empty());
        assert!(parse_transcript("   \n  \n").is_empty());
    }

    #[test]
    fn order_index_is_dense_over_recognized_lines() {
        let raw = "HOST: Welcome\n\n[music]\nALEX: Thanks\n   \nMAYA: Hi\n";
        let indexes: Vec<(String, usize)> = parse_transcript(raw)
            .into_iter()
            .map(|u| (u.speaker_label, u.order_index))
            .collect();
        assert_eq!(
            indexes,
            vec![
                ("HOST".to_string(), 0),
                ("ALEX".to_string(), 1),
                ("MAYA".to_string(), 2)
            ]
        );
    }

    #[test]
    fn indented_lines_are_trimmed_before_matching() {
        let utterances = parse_transcript("    SAM:   Direct point.   ");
        assert_eq!(utterances[0].speaker_label, "SAM");
        assert_eq!(utterances[0].text, "Direct point.");
    }

    #[test]
    fn unknown_labels_are_kept() {
        let utterances = parse_transcript("GUEST: Surprise!");
        assert_eq!(utterances[0].speaker_label, "GUEST");
    }

    #[test]
    fn non_uppercase_labels_do_not_match() {
        assert!(parse_transcript("Host: hi").is_empty());
        assert!(parse_transcript("DR. CHEN: hi").is_empty());
        assert!(parse_transcript("HOST 2: hi").is_empty());
    }

    #[test]
    fn label_without_text_is_not_an_utterance() {
        assert!(parse_transcript("HOST:").is_empty());
        assert!(parse_transcript("HOST:    ").is_empty());
    }

    #[test]
    fn colon_inside_text_is_preserved() {
        let utterances = parse_transcript("JORDAN: Rating: 7/10");
        assert_eq!(utterances[0].text, "Rating: 7/10");
    }

    #[test]
    fn flatten_strips_labels_and_joins_lines() {
        let raw = "HOST: Welcome to the show.\n\nALEX: Thanks...\n[laughs]\nMAYA: Indeed.";
        assert_eq!(
            flatten_transcript(raw),
            "Welcome to the show. Thanks... [laughs] Indeed."
        );
    }

    #[test]
    fn flatten_strips_indented_labels_like_parse_recognizes_them() {
        let raw = "  ALEX: Hello there\n\tMAYA: Hi";
        let labels: Vec<String> = parse_transcript(raw)
            .into_iter()
            .map(|u| u.speaker_label)
            .collect();
        assert_eq!(labels, vec!["ALEX", "MAYA"]);
        assert_eq!(flatten_transcript(raw), "Hello there Hi");
    }

    #[test]
    fn flatten_handles_crlf() {
        assert_eq!(flatten_transcript("HOST: One\r\nSAM: Two\r\n"), "One Two");
    }

    #[test]
    fn flatten_of_labels_only_is_empty() {
        assert_eq!(flatten_transcript("HOST:\nALEX: \n"), "");
        assert_eq!(flatten_transcript(""), "");
    }
}
