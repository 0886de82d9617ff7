//! Interactive command loop.
//!
//! DESIGN
//! ======
//! `Terminal` owns both ends of the user's console. It is the `Prompter`
//! handed to `AdminConsole`, and it also feeds command lines to `Shell`, so
//! confirm dialogs and commands read from the same input stream.
//! `parse_command` is pure; `Shell::dispatch` maps commands onto controller
//! calls and re-renders after each one.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::console::render::render;
use crate::console::{AdminConsole, Prompter};
use crate::error::ConsoleError;

/// Typed at a form field prompt to abandon the form.
pub const CANCEL_TOKEN: &str = ":cancel";

const HELP: &str = "\
Commands:
  login [username]   log in (prompts for password)
  logout             end the session
  list               reload products
  add                add a product
  edit <id>          edit a product (empty input keeps a value)
  delete <id>        delete a product
  submit             re-enter and resubmit the open form
  cancel             discard the open form
  show               redraw the console
  help               this text
  quit               leave
At any form prompt, type :cancel to abandon the form.
";

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Login { username: Option<String> },
    Logout,
    List,
    Add,
    Edit { id: String },
    Delete { id: String },
    Submit,
    Cancel,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns a [`ParseError`] for unknown commands or wrong arity.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("login", []) => ShellCommand::Login { username: None },
        ("login", [user]) => ShellCommand::Login { username: Some((*user).to_owned()) },
        ("login", _) => return Err(ParseError::Usage("login [username]")),
        ("edit", [id]) => ShellCommand::Edit { id: (*id).to_owned() },
        ("edit", _) => return Err(ParseError::Usage("edit <id>")),
        ("delete" | "rm", [id]) => ShellCommand::Delete { id: (*id).to_owned() },
        ("delete" | "rm", _) => return Err(ParseError::Usage("delete <id>")),
        (name, rest) => {
            let command = match name {
                "logout" => ShellCommand::Logout,
                "list" | "ls" => ShellCommand::List,
                "add" => ShellCommand::Add,
                "submit" => ShellCommand::Submit,
                "cancel" => ShellCommand::Cancel,
                "show" => ShellCommand::Show,
                "help" | "?" => ShellCommand::Help,
                "quit" | "exit" => ShellCommand::Quit,
                _ => return Err(ParseError::Unknown(head.to_owned())),
            };
            if !rest.is_empty() {
                return Err(ParseError::Usage(usage_for(&command)));
            }
            command
        }
    };
    Ok(Some(command))
}

fn usage_for(command: &ShellCommand) -> &'static str {
    match command {
        ShellCommand::Logout => "logout",
        ShellCommand::List => "list",
        ShellCommand::Add => "add",
        ShellCommand::Submit => "submit",
        ShellCommand::Cancel => "cancel",
        ShellCommand::Show => "show",
        ShellCommand::Help => "help",
        ShellCommand::Quit => "quit",
        ShellCommand::Login { .. } => "login [username]",
        ShellCommand::Edit { .. } => "edit <id>",
        ShellCommand::Delete { .. } => "delete <id>",
    }
}

// =============================================================================
// TERMINAL
// =============================================================================

pub struct Terminal<R, W> {
    input: Mutex<R>,
    output: Mutex<W>,
}

impl<R: BufRead + Send, W: Write + Send> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input: Mutex::new(input), output: Mutex::new(output) }
    }

    /// Write `text` and flush.
    ///
    /// # Errors
    ///
    /// Propagates output I/O errors.
    pub fn write(&self, text: &str) -> io::Result<()> {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        output.write_all(text.as_bytes())?;
        output.flush()
    }

    /// Show `prompt`, then read one line without its terminator. `None` at EOF.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from either stream.
    pub fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        self.write(prompt)?;
        let mut line = String::new();
        let read = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    #[cfg(test)]
    pub(crate) fn with_output<T>(&self, f: impl FnOnce(&W) -> T) -> T {
        f(&self.output.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for Terminal<R, W> {
    fn confirm(&self, message: &str) -> bool {
        match self.read_line(&format!("{message} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "confirm prompt failed");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.write(&format!("** {message}\n")) {
            tracing::warn!(error = %e, message, "alert could not be shown");
        }
    }
}

// =============================================================================
// SHELL
// =============================================================================

pub struct Shell<R, W> {
    console: AdminConsole,
    terminal: Arc<Terminal<R, W>>,
    default_username: Option<String>,
}

enum Flow {
    Continue,
    Quit,
}

impl<R: BufRead + Send + 'static, W: Write + Send + 'static> Shell<R, W> {
    /// `terminal` should be the same instance the console prompts through.
    pub fn new(console: AdminConsole, terminal: Arc<Terminal<R, W>>, default_username: Option<String>) -> Self {
        Self { console, terminal, default_username }
    }

    #[must_use]
    pub fn console(&self) -> &AdminConsole {
        &self.console
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Io`] if the terminal fails.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        self.redraw()?;
        while let Some(line) = self.terminal.read_line("> ")? {
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(command)) => {
                    if let Flow::Quit = self.dispatch(command).await? {
                        break;
                    }
                }
                Err(e) => self.terminal.write(&format!("{e}\n"))?,
            }
        }
        Ok(())
    }

    fn redraw(&self) -> io::Result<()> {
        self.terminal.write(&render(self.console.state()))
    }

    async fn dispatch(&mut self, command: ShellCommand) -> Result<Flow, ConsoleError> {
        tracing::debug!(?command, "dispatch");
        let logged_in = self.console.state().logged_in();

        match command {
            ShellCommand::Quit => return Ok(Flow::Quit),
            ShellCommand::Help => {
                self.terminal.write(HELP)?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Show => {}
            ShellCommand::Login { username } => {
                if logged_in {
                    self.terminal.write("Already logged in.\n")?;
                    return Ok(Flow::Continue);
                }
                if !self.login(username).await? {
                    return Ok(Flow::Quit);
                }
            }
            _ if !logged_in => {
                self.terminal.write("Please log in first.\n")?;
                return Ok(Flow::Continue);
            }
            ShellCommand::Logout => self.console.logout().await,
            ShellCommand::List => self.console.list_products().await,
            ShellCommand::Add => {
                self.console.open_add_form();
                self.redraw()?;
                if self.fill_form()? {
                    self.console.submit_product().await;
                }
            }
            ShellCommand::Edit { id } => {
                if !self.console.open_edit_form(&id) {
                    self.terminal.write(&format!("No product with ID {id}.\n"))?;
                    return Ok(Flow::Continue);
                }
                self.redraw()?;
                if self.fill_form()? {
                    self.console.submit_product().await;
                }
            }
            ShellCommand::Delete { id } => self.console.delete_product(&id).await,
            ShellCommand::Submit | ShellCommand::Cancel if !self.console.state().form_visible => {
                self.terminal.write("No product form is open.\n")?;
                return Ok(Flow::Continue);
            }
            // Prompts start from what is already in the form, so a rejected
            // entry only needs the bad field retyped.
            ShellCommand::Submit => {
                if self.fill_form()? {
                    self.console.submit_product().await;
                }
            }
            ShellCommand::Cancel => self.console.cancel_form(),
        }

        self.redraw()?;
        Ok(Flow::Continue)
    }

    /// Returns `false` if input ended mid-prompt.
    async fn login(&mut self, username: Option<String>) -> Result<bool, ConsoleError> {
        let username = match username.or_else(|| self.default_username.clone()) {
            Some(username) => username,
            None => match self.terminal.read_line("username: ")? {
                Some(username) => username,
                None => return Ok(false),
            },
        };
        let Some(password) = self.terminal.read_line("password: ")? else {
            return Ok(false);
        };
        self.console.login(username.trim(), &password).await;
        Ok(true)
    }

    /// Prompt for each field, showing the current value. Empty input keeps
    /// it. Returns `false` (form cancelled) on `:cancel` or end of input.
    fn fill_form(&mut self) -> io::Result<bool> {
        let form = self.console.state().form.clone();
        let fields = [
            ("name", form.name),
            ("price", form.price),
            ("image", form.image),
            ("description", form.description),
        ];

        let mut answers = Vec::with_capacity(fields.len());
        for (label, current) in fields {
            let prompt = if current.is_empty() { format!("{label}: ") } else { format!("{label} [{current}]: ") };
            let Some(input) = self.terminal.read_line(&prompt)? else {
                self.console.cancel_form();
                return Ok(false);
            };
            if input.trim() == CANCEL_TOKEN {
                self.console.cancel_form();
                return Ok(false);
            }
            answers.push(if input.is_empty() { current } else { input });
        }

        let form = self.console.form_mut();
        let mut answers = answers.into_iter();
        form.name = answers.next().unwrap_or_default();
        form.price = answers.next().unwrap_or_default();
        form.image = answers.next().unwrap_or_default();
        form.description = answers.next().unwrap_or_default();
        Ok(true)
    }
}
