use std::io::{BufRead, Write};

use tracing::info;

use crate::calculator;
use crate::controller::{run_menu, Console};
use crate::error::{AssistantError, Result};
use crate::workspace::Workspace;

const MAIN_MENU: &[&str] = &[
    "Notes",
    "Tasks",
    "Contacts",
    "Finance",
    "Calculator",
    "Exit",
];

/// The top-level loop. Returns when "Exit" is chosen or input ends.
///
/// Each collection is loaded when its menu is entered and saved before the
/// menu returns, so no collection outlives its own session.
pub fn run_main_menu<R: BufRead, W: Write>(
    workspace: &Workspace,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say("Welcome to your personal assistant!")?;
    loop {
        console.say("Main menu:")?;
        for (index, item) in MAIN_MENU.iter().enumerate() {
            console.say(format!("{}. {}", index + 1, item))?;
        }

        let choice = match console.prompt("Enter choice: ") {
            Ok(choice) => choice,
            Err(AssistantError::EndOfInput) => return Ok(()),
            Err(e) => return Err(e),
        };

        let outcome = match choice.trim() {
            "1" => run_menu(&mut workspace.notes()?, console),
            "2" => run_menu(&mut workspace.tasks()?, console),
            "3" => run_menu(&mut workspace.contacts()?, console),
            "4" => run_menu(&mut workspace.finance()?, console),
            "5" => calculator::run(console),
            "6" => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            _ => {
                console.say("Invalid choice. Please try again.")?;
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            Err(AssistantError::EndOfInput) => {
                info!("input closed, leaving");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}
