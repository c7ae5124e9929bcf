use std::io::{BufRead, Write};

use super::{delete_record, export_records, import_records, Console, Menu};
use crate::entity::{Note, NoteUpdate};
use crate::error::Result;
use crate::storage::RecordStore;

pub struct NotesController {
    store: RecordStore<Note>,
}

impl NotesController {
    pub fn new(store: RecordStore<Note>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<Note> {
        &self.store
    }

    pub fn create(&mut self, title: String, content: String) -> Result<&Note> {
        self.store.add(|id| Note::new(id, title, content))
    }

    pub fn details(&self, id: u32) -> Result<&Note> {
        self.store.get(id)
    }

    /// Apply an edit and re-stamp the note.
    pub fn edit(&mut self, id: u32, update: NoteUpdate) -> Result<&Note> {
        let note = self.store.get_mut(id)?;
        note.apply(update);
        Ok(note)
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.store.is_empty() {
            return console.say("No notes found.");
        }
        for note in self.store.records() {
            console.say(format!("{}. {} ({})", note.id, note.title, note.timestamp))?;
        }
        Ok(())
    }
}

impl Menu for NotesController {
    const TITLE: &'static str = "Notes";
    const ITEMS: &'static [&'static str] = &[
        "Create a note",
        "List notes",
        "View note details",
        "Edit a note",
        "Delete a note",
        "Import notes from CSV",
        "Export notes to CSV",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match choice {
            1 => {
                let title = console.prompt("Enter note title: ")?;
                let content = console.prompt("Enter note content: ")?;
                let id = self.create(title, content)?.id;
                console.say(format!("Note {} created.", id))
            }
            2 => self.list(console),
            3 => {
                let id = console.prompt_id("Enter note ID: ")?;
                let note = self.details(id)?;
                let lines = [
                    format!("Title: {}", note.title),
                    format!("Content: {}", note.content),
                    format!("Timestamp: {}", note.timestamp),
                ];
                for line in lines {
                    console.say(line)?;
                }
                Ok(())
            }
            4 => {
                let id = console.prompt_id("Enter note ID: ")?;
                let current = self.details(id)?.clone();
                let update = NoteUpdate {
                    title: console.prompt_update("Enter new title", &current.title)?,
                    content: console.prompt_update("Enter new content", &current.content)?,
                };
                self.edit(id, update)?;
                console.say("Note updated.")
            }
            5 => delete_record(&mut self.store, console),
            6 => import_records(&mut self.store, console),
            7 => export_records(&self.store, console),
            _ => unreachable!("menu choice out of range: {}", choice),
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save()
    }
}
