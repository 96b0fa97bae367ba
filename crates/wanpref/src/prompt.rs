//! Terminal-backed [`Prompter`] for the selection steps.
//!
//! Interactive terminals get a `dialoguer` prompt; piped stdin is read
//! line by line so answers can be scripted. End of input ends selection.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use wanpref_core::Prompter;

pub struct ConsolePrompter {
    interactive: bool,
}

impl ConsolePrompter {
    pub fn from_stdin() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    fn ask_terminal(prompt: &str) -> io::Result<Option<String>> {
        match Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(answer) => Ok(Some(answer)),
            Err(err) => {
                let dialoguer::Error::IO(err) = err;
                match err.kind() {
                    io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }

    fn ask_piped(prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}: ")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

impl Prompter for ConsolePrompter {
    fn show(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.interactive {
            Self::ask_terminal(prompt)
        } else {
            Self::ask_piped(prompt)
        }
    }
}
