//! Numbered-list selection.
//!
//! [`select`] shows options indexed from 0, reads answers from a
//! [`Prompter`] until one parses as an in-range index, and returns the
//! chosen option. Invalid answers are rejected and asked again with no
//! retry limit. The prompter abstraction keeps console I/O out of this
//! module: the CLI plugs in a terminal prompter, tests plug in scripted
//! answers.

use std::io;

use tabled::settings::Style;
use tabled::{Table, Tabled};
use tracing::debug;

use crate::error::CoreError;
use crate::model::{Network, Organization};

/// Source of answers and sink for messages during selection.
pub trait Prompter {
    /// Show a block of text to the user.
    fn show(&mut self, text: &str) -> io::Result<()>;

    /// Ask for one answer. `Ok(None)` means input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// One selectable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: String,
    pub name: String,
}

impl From<&Organization> for Choice {
    fn from(o: &Organization) -> Self {
        Self {
            id: o.id.clone(),
            name: o.name.clone(),
        }
    }
}

impl From<&Network> for Choice {
    fn from(n: &Network) -> Self {
        Self {
            id: n.id.clone(),
            name: n.name.clone(),
        }
    }
}

/// The chosen item and where it sat in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub id: String,
    pub name: String,
}

impl Selection {
    fn at(index: usize, choice: &Choice) -> Self {
        Self {
            index,
            id: choice.id.clone(),
            name: choice.name.clone(),
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ChoiceRow<'a> {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: &'a str,
    #[tabled(rename = "ID")]
    id: &'a str,
}

/// Render options as a numbered table.
pub fn render_choices(options: &[Choice]) -> String {
    let rows = options.iter().enumerate().map(|(index, c)| ChoiceRow {
        index,
        name: &c.name,
        id: &c.id,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Parse one answer against a list of `len` options.
fn parse_answer(raw: &str, len: usize) -> Result<usize, String> {
    let trimmed = raw.trim();
    let index: usize = trimmed
        .parse()
        .map_err(|_| format!("'{trimmed}' is not a number"))?;
    if index < len {
        Ok(index)
    } else {
        Err(format!(
            "{index} is out of range, choose between 0 and {}",
            len - 1
        ))
    }
}

// ── Selection ───────────────────────────────────────────────────────

/// Let the user pick one of `options`.
///
/// `kind` names what is being chosen ("organization", "network") in
/// prompts and errors. An empty list fails with
/// [`CoreError::NoValidOptions`] before anything is asked.
pub fn select(
    options: &[Choice],
    kind: &str,
    prompter: &mut impl Prompter,
) -> Result<Selection, CoreError> {
    if options.is_empty() {
        return Err(CoreError::NoValidOptions { kind: kind.into() });
    }

    prompter.show(&render_choices(options))?;
    let prompt = format!("Select {kind} [0-{}]", options.len() - 1);

    loop {
        let Some(answer) = prompter.ask(&prompt)? else {
            return Err(CoreError::SelectionCancelled { kind: kind.into() });
        };
        match parse_answer(&answer, options.len()) {
            Ok(index) => {
                let selection = Selection::at(index, &options[index]);
                debug!(kind, index, id = %selection.id, "option selected");
                prompter.show(&format!(
                    "Selected {kind}: {} ({})",
                    selection.name, selection.id
                ))?;
                return Ok(selection);
            }
            Err(reason) => prompter.show(&format!("Invalid choice: {reason}"))?,
        }
    }
}

/// Pick an option without prompting, matching `needle` against ids
/// first, then names.
pub fn find(options: &[Choice], kind: &str, needle: &str) -> Result<Selection, CoreError> {
    if options.is_empty() {
        return Err(CoreError::NoValidOptions { kind: kind.into() });
    }
    options
        .iter()
        .position(|c| c.id == needle)
        .or_else(|| options.iter().position(|c| c.name == needle))
        .map(|index| Selection::at(index, &options[index]))
        .ok_or_else(|| CoreError::NotFound {
            entity_type: kind.into(),
            identifier: needle.into(),
        })
}
