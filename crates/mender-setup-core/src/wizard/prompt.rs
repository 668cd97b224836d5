// ── Terminal seam ──

use std::io;

use super::messages;

/// Whether typed input should be echoed back to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    On,
    Off,
}

/// Line-oriented access to the user.
pub trait Prompter {
    /// Show `prompt` and read one line, without its trailing newline.
    fn prompt_line(&mut self, prompt: &str, echo: Echo) -> io::Result<String>;

    /// Show an informational line.
    fn message(&mut self, text: &str);
}

/// Ask a yes/no question until the answer is `Y`, `y`, `N`, `n` or empty.
///
/// Empty input selects `default_yes`.
pub fn prompt_yes_no<P: Prompter + ?Sized>(
    prompter: &mut P,
    prompt: &str,
    default_yes: bool,
) -> io::Result<bool> {
    let mut answer = prompter.prompt_line(prompt, Echo::On)?;
    loop {
        match answer.as_str() {
            "Y" | "y" => return Ok(true),
            "N" | "n" => return Ok(false),
            "" => return Ok(default_yes),
            _ => answer = prompter.prompt_line(messages::SELECT_YES_NO, Echo::On)?,
        }
    }
}
