// ── Terminal adapters ──
//
// The prompter the wizard talks to, and a progress spinner around the
// hosted credential check.

use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use dialoguer::Input;
use dialoguer::theme::Theme;
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use mender_setup_core::{CoreError, Echo, Prompter, TenantTokenSource};

/// Renders wizard questions exactly as written.
///
/// The questions carry their own `: ` or `[Y/n] ` suffix and defaults are
/// applied by the wizard, so nothing is added around them.
struct VerbatimTheme;

impl Theme for VerbatimTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{prompt}")
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{prompt}{sel}")
    }
}

/// Prompts on the terminal through `dialoguer`.
///
/// Hidden answers go through `rpassword`. When stdin or stdout is not a
/// terminal, questions are written to stdout and answers are read line by
/// line from stdin, so a closed stdin fails instead of taking defaults.
pub struct TerminalPrompter {
    stdin: io::StdinLock<'static>,
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal() && io::stdout().is_terminal();
        Self {
            stdin: stdin.lock(),
            interactive,
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.stdin.read_line(&mut line)? == 0 {
            return Err(closed_stdin());
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn write_prompt(prompt: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn prompt_line(&mut self, prompt: &str, echo: Echo) -> io::Result<String> {
        match (self.interactive, echo) {
            (true, Echo::On) => Input::<String>::with_theme(&VerbatimTheme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|dialoguer::Error::IO(e)| e),
            (true, Echo::Off) => {
                Self::write_prompt(prompt)?;
                rpassword::read_password()
            }
            (false, _) => {
                Self::write_prompt(prompt)?;
                self.read_line()
            }
        }
    }

    fn message(&mut self, text: &str) {
        println!("{text}");
    }
}

fn closed_stdin() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "standard input closed before all questions were answered",
    )
}

/// Shows a spinner on stderr while the wrapped source talks to the server.
pub struct SpinnerTokenSource<'a, A> {
    inner: &'a A,
    visible: bool,
}

impl<'a, A> SpinnerTokenSource<'a, A> {
    /// The spinner stays hidden when `quiet` is set or stderr is not a
    /// terminal.
    pub fn new(inner: &'a A, quiet: bool) -> Self {
        Self {
            inner,
            visible: !quiet && io::stderr().is_terminal(),
        }
    }

    fn spinner(&self) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Logging in to hosted Mender...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

impl<A: TenantTokenSource> TenantTokenSource for SpinnerTokenSource<'_, A> {
    async fn request_tenant_token(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<String, CoreError> {
        let spinner = self.spinner();
        let result = self.inner.request_tenant_token(username, password).await;
        spinner.finish_and_clear();
        result
    }
}
