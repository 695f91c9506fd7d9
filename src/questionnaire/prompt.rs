use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Print `message` and read one trimmed line. `None` means end of input.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<Option<String>> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush output")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt user with a yes/no question. End of input counts as the default.
pub fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = prompt(input, output, &format!("{} [{}]: ", message, hint))?;
    let answer = answer.unwrap_or_default().to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}

/// Result of asking for a 1-based choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index of the picked entry.
    Picked(usize),
    Skipped,
    EndOfInput,
}

/// Ask for a number between 1 and `count`, re-prompting on anything else.
///
/// An empty line returns `Skipped` when `allow_skip` is set.
pub fn prompt_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
    count: usize,
    allow_skip: bool,
) -> Result<Choice> {
    loop {
        let Some(answer) = prompt(input, output, message)? else {
            return Ok(Choice::EndOfInput);
        };
        if answer.is_empty() && allow_skip {
            return Ok(Choice::Skipped);
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Choice::Picked(n - 1)),
            _ => {
                writeln!(output, "  Please enter a number between 1 and {}.", count)
                    .context("Failed to write prompt")?;
            }
        }
    }
}
