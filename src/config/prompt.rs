//! First-run interactive configuration.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use console::{style, Term};

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Empty API key answers accepted before giving up; stdin at EOF reads as empty.
const MAX_EMPTY_ANSWERS: usize = 3;

/// Ask the user for the API key and download directory.
///
/// Re-asks a few times while the API key is empty; an empty directory answer
/// keeps the current value.
pub fn prompt_for_config(config: &mut Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line("")?;
    term.write_line(&style("=== CivitAI Downloader Configuration ===").bold().to_string())?;

    config.api_key = read_api_key(|retry| {
        if retry {
            term.write_line(
                &style("Error: API key cannot be empty. It's required for accessing CivitAI.")
                    .red()
                    .to_string(),
            )?;
        }
        ask(&term, "Please enter your CivitAI API key: ")
    })?;

    term.write_line("")?;
    term.write_line(&format!(
        "Default download directory: {}",
        config.download_dir.display()
    ))?;
    let custom_dir = ask(&term, "Press Enter to accept or type a custom path: ")?;
    if !custom_dir.is_empty() {
        config.download_dir = PathBuf::from(custom_dir);
    }

    Ok(())
}

/// Ask until a non-empty key is given, up to [`MAX_EMPTY_ANSWERS`] times.
///
/// `ask` receives `true` when the previous answer was empty.
fn read_api_key<F>(mut ask: F) -> Result<String>
where
    F: FnMut(bool) -> io::Result<String>,
{
    for attempt in 0..MAX_EMPTY_ANSWERS {
        let answer = ask(attempt > 0)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
    Err(Error::MissingConfig("api_key (no key entered)".to_string()))
}

fn ask(term: &Term, prompt: &str) -> io::Result<String> {
    term.write_str(prompt)?;
    Ok(term.read_line()?.trim().to_string())
}

/// Whether an interactive prompt is possible: both stdin and stdout are terminals.
pub fn can_prompt() -> bool {
    Term::stdout().is_term() && io::stdin().is_terminal()
}
