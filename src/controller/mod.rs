//! Interactive menus over a record collection.
//!
//! Each controller owns one `RecordStore` and exposes its operations as plain
//! methods; the `Menu` impl maps numbered choices onto those methods and does
//! the prompting. `run_menu` drives the loop and persists after every action.

mod contacts;
mod finance;
mod notes;
mod tasks;

pub use contacts::ContactsController;
pub use finance::{FinanceController, FinanceReport};
pub use notes::NotesController;
pub use tasks::TasksController;

use std::borrow::Cow;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::entity::Record;
use crate::error::{AssistantError, Result};
use crate::storage::RecordStore;

/// Line-oriented prompt/print over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print a label and read one line without its line terminator.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, so a garbled line is just
    /// another invalid answer.
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(AssistantError::EndOfInput);
        }
        let line = String::from_utf8_lossy(&raw);
        if let Cow::Owned(_) = line {
            debug!("replaced invalid UTF-8 in input");
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Prompt for an edited field. Blank input means "keep the current value".
    pub fn prompt_update(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        let value = self.prompt(&format!("{} ({}): ", label, current))?;
        Ok((!value.trim().is_empty()).then_some(value))
    }

    /// Prompt until the input parses, reporting each rejected value.
    pub fn prompt_parsed<T>(
        &mut self,
        label: &str,
        field: &'static str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        loop {
            let raw = self.prompt(label)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_recoverable() => {
                    debug!(field, value = %raw, "rejected input");
                    self.say(e)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn prompt_id(&mut self, label: &str) -> Result<u32> {
        self.prompt_parsed(label, "ID", |raw| parse_number(raw, "ID"))
    }

    pub fn prompt_path(&mut self) -> Result<PathBuf> {
        Ok(PathBuf::from(self.prompt("Enter CSV file name: ")?.trim()))
    }
}

/// Parse a trimmed number, naming the field on failure.
pub fn parse_number<T: FromStr>(raw: &str, field: &'static str) -> Result<T> {
    raw.trim().parse().map_err(|_| AssistantError::InvalidInput {
        field,
        value: raw.to_string(),
    })
}

/// A numbered menu over one collection. The last entry, "Back", is implied.
pub trait Menu {
    const TITLE: &'static str;
    const ITEMS: &'static [&'static str];

    /// Run the action for a 1-based choice within `ITEMS`.
    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()>;

    fn persist(&self) -> Result<()>;
}

/// Show the menu until "Back" is chosen.
///
/// Every dispatched action is followed by a save, whether it succeeded or
/// not. Invalid choices re-prompt without saving. Recoverable errors are
/// printed; anything else is returned after a final save.
pub fn run_menu<M: Menu, R: BufRead, W: Write>(
    menu: &mut M,
    console: &mut Console<R, W>,
) -> Result<()> {
    let back = M::ITEMS.len() + 1;
    loop {
        console.say(format!("{}:", M::TITLE))?;
        for (index, item) in M::ITEMS.iter().enumerate() {
            console.say(format!("{}. {}", index + 1, item))?;
        }
        console.say(format!("{}. Back", back))?;

        let raw = console.prompt("Enter choice: ")?;
        let choice = match raw.trim().parse::<usize>() {
            Ok(n) if n == back => return Ok(()),
            Ok(n) if (1..back).contains(&n) => n,
            _ => {
                console.say("Invalid choice. Please try again.")?;
                continue;
            }
        };

        debug!(menu = M::TITLE, choice, "dispatching");
        let outcome = menu.dispatch(choice, console);
        menu.persist()?;
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => console.say(e)?,
            Err(e) => return Err(e),
        }
    }
}

/// Shared "delete by id" action.
pub(crate) fn delete_record<T: Record, R: BufRead, W: Write>(
    store: &mut RecordStore<T>,
    console: &mut Console<R, W>,
) -> Result<()> {
    let id = console.prompt_id(&format!("Enter {} ID: ", T::KIND.to_lowercase()))?;
    if !store.delete(id) {
        return Err(AssistantError::RecordNotFound { kind: T::KIND, id });
    }
    console.say(format!("{} deleted.", T::KIND))
}

/// Shared CSV import action.
pub(crate) fn import_records<T: Record, R: BufRead, W: Write>(
    store: &mut RecordStore<T>,
    console: &mut Console<R, W>,
) -> Result<()> {
    let path = console.prompt_path()?;
    let count = store.import_csv(&path)?;
    console.say(format!("Imported {} record(s) from {}.", count, path.display()))
}

/// Shared CSV export action.
pub(crate) fn export_records<T: Record, R: BufRead, W: Write>(
    store: &RecordStore<T>,
    console: &mut Console<R, W>,
) -> Result<()> {
    let path = console.prompt_path()?;
    let count = store.export_csv(&path)?;
    console.say(format!("Exported {} record(s) to {}.", count, path.display()))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Cursor;

    use super::Console;

    pub type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    /// A console fed from the given lines.
    pub fn scripted(lines: &[&str]) -> ScriptedConsole {
        let mut input = lines.join("\n");
        input.push('\n');
        Console::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    pub fn output(console: ScriptedConsole) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }
}
