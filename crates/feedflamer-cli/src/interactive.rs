//! Stdin prompts for values not given on the command line.

use std::io::{BufRead, Write};

use feedflamer_core::clamp_post_count;

pub(crate) const HANDLE_PROMPT: &str = "Enter Twitter username (without @): ";

/// Blank or non-numeric input selects `default`; numbers are clamped to `[1, 100]`.
pub(crate) fn parse_post_count(input: &str, default: u8) -> u8 {
    match input.trim().parse::<i64>() {
        Ok(n) => clamp_post_count(n),
        Err(_) => default,
    }
}

/// Writes `prompt`, then reads one line and returns it trimmed.
fn prompt_line<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<String> {
    output.write_all(prompt.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

/// Asks for a handle. Returns `None` when the answer is blank.
///
/// # Errors
///
/// Returns the I/O error if the terminal cannot be read or written.
pub(crate) fn ask_handle<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<Option<String>> {
    let answer = prompt_line(HANDLE_PROMPT, input, output)?;
    let handle = answer.trim_start_matches('@').trim();
    Ok((!handle.is_empty()).then(|| handle.to_owned()))
}

/// Asks how many posts to analyze.
///
/// # Errors
///
/// Returns the I/O error if the terminal cannot be read or written.
pub(crate) fn ask_post_count<R: BufRead, W: Write>(
    default: u8,
    input: &mut R,
    output: &mut W,
) -> std::io::Result<u8> {
    let prompt = format!("Number of recent posts to analyze (default {default}): ");
    let answer = prompt_line(&prompt, input, output)?;
    Ok(parse_post_count(&answer, default))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn post_count_parsing() {
        assert_eq!(parse_post_count("", 10), 10);
        assert_eq!(parse_post_count("   ", 10), 10);
        assert_eq!(parse_post_count("abc", 10), 10);
        assert_eq!(parse_post_count("25", 10), 25);
        assert_eq!(parse_post_count(" 7 \n", 10), 7);
        assert_eq!(parse_post_count("0", 10), 1);
        assert_eq!(parse_post_count("-3", 10), 1);
        assert_eq!(parse_post_count("500", 10), 100);
    }

    #[test]
    fn ask_handle_prompts_and_strips_at() {
        let mut input = Cursor::new("  @jack \n");
        let mut output = Vec::new();
        let handle = ask_handle(&mut input, &mut output).unwrap();
        assert_eq!(handle.as_deref(), Some("jack"));
        assert_eq!(String::from_utf8(output).unwrap(), HANDLE_PROMPT);
    }

    #[test]
    fn ask_handle_blank_is_none() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert!(ask_handle(&mut input, &mut output).unwrap().is_none());

        let mut eof = Cursor::new("");
        assert!(ask_handle(&mut eof, &mut output).unwrap().is_none());
    }

    #[test]
    fn ask_post_count_uses_default_on_blank() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert_eq!(ask_post_count(12, &mut input, &mut output).unwrap(), 12);
        assert!(String::from_utf8(output).unwrap().contains("(default 12)"));
    }
}
