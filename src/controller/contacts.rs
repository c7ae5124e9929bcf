use std::io::{BufRead, Write};

use super::{delete_record, export_records, import_records, Console, Menu};
use crate::entity::{Contact, ContactUpdate};
use crate::error::Result;
use crate::storage::RecordStore;

pub struct ContactsController {
    store: RecordStore<Contact>,
}

impl ContactsController {
    pub fn new(store: RecordStore<Contact>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore<Contact> {
        &self.store
    }

    pub fn add(&mut self, name: String, phone: String, email: String) -> Result<&Contact> {
        self.store.add(|id| Contact::new(id, name, phone, email))
    }

    /// Contacts whose name or phone contains `query`, in collection order.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        self.store
            .records()
            .iter()
            .filter(|c| c.matches(query))
            .collect()
    }

    pub fn edit(&mut self, id: u32, update: ContactUpdate) -> Result<&Contact> {
        let contact = self.store.get_mut(id)?;
        contact.apply(update);
        Ok(contact)
    }

}

fn show<R: BufRead, W: Write>(contacts: &[&Contact], console: &mut Console<R, W>) -> Result<()> {
    if contacts.is_empty() {
        return console.say("No contacts found.");
    }
    for c in contacts {
        console.say(format!("{}. {} ({}, {})", c.id, c.name, c.phone, c.email))?;
    }
    Ok(())
}

impl Menu for ContactsController {
    const TITLE: &'static str = "Contacts";
    const ITEMS: &'static [&'static str] = &[
        "Add a contact",
        "Search contacts",
        "Edit a contact",
        "Delete a contact",
        "Import contacts from CSV",
        "Export contacts to CSV",
        "List contacts",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match choice {
            1 => {
                let name = console.prompt("Enter contact name: ")?;
                let phone = console.prompt("Enter phone number: ")?;
                let email = console.prompt("Enter email address: ")?;
                let id = self.add(name, phone, email)?.id;
                console.say(format!("Contact {} added.", id))
            }
            2 => {
                let query = console.prompt("Enter name or phone to search for: ")?;
                show(&self.search(&query), console)
            }
            3 => {
                let id = console.prompt_id("Enter contact ID: ")?;
                let current = self.store.get(id)?.clone();
                let update = ContactUpdate {
                    name: console.prompt_update("Enter new name", &current.name)?,
                    phone: console.prompt_update("Enter new phone", &current.phone)?,
                    email: console.prompt_update("Enter new email", &current.email)?,
                };
                self.edit(id, update)?;
                console.say("Contact updated.")
            }
            4 => delete_record(&mut self.store, console),
            5 => import_records(&mut self.store, console),
            6 => export_records(&self.store, console),
            7 => show(&self.search(""), console),
            _ => unreachable!("menu choice out of range: {}", choice),
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdPolicy;
    use crate::controller::run_menu;
    use crate::controller::testing::{output, scripted};
    use tempfile::TempDir;

    fn controller(tmp: &TempDir, file: &str) -> ContactsController {
        ContactsController::new(
            RecordStore::open(tmp.path().join(file), IdPolicy::NextFree).unwrap(),
        )
    }

    fn seed(contacts: &mut ContactsController) {
        let people = [
            ("Ada Lovelace", "555-0101", "ada@example.com"),
            ("Alan Turing", "555-0202", "alan@example.com"),
            ("Grace Hopper", "777-0303", "grace@example.com"),
        ];
        for (name, phone, email) in people {
            contacts
                .add(name.into(), phone.into(), email.into())
                .unwrap();
        }
    }

    #[test]
    fn test_search_name_or_phone_in_order() {
        let tmp = TempDir::new().unwrap();
        let mut contacts = controller(&tmp, "contacts.json");
        seed(&mut contacts);

        let names: Vec<_> = contacts.search("A").iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ada Lovelace", "Alan Turing"]);

        let by_phone: Vec<_> = contacts.search("555").iter().map(|c| c.id).collect();
        assert_eq!(by_phone, vec![1, 2]);

        assert!(contacts.search("grace").is_empty());
        assert_eq!(contacts.search("").len(), 3);
    }

    #[test]
    fn test_export_import_into_fresh_collection() {
        let tmp = TempDir::new().unwrap();
        let mut original = controller(&tmp, "a.json");
        seed(&mut original);
        original.store.delete(1);
        original
            .add("Edsger Dijkstra".into(), "888".into(), "ed@example.com".into())
            .unwrap();

        let csv_path = tmp.path().join("contacts.csv");
        original.store().export_csv(&csv_path).unwrap();

        let mut fresh = controller(&tmp, "b.json");
        fresh.store.import_csv(&csv_path).unwrap();

        let ids: Vec<_> = fresh.store().records().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        for (a, b) in fresh.store().records().iter().zip(original.store().records()) {
            assert_eq!((&a.name, &a.phone, &a.email), (&b.name, &b.phone, &b.email));
        }
    }

    #[test]
    fn test_menu_search_and_edit() {
        let tmp = TempDir::new().unwrap();
        let mut contacts = controller(&tmp, "contacts.json");
        seed(&mut contacts);
        let mut console = scripted(&[
            "2", "777", // search
            "3", "2", "", "555-9999", "", // edit phone
            "4", "9", // delete missing
            "8",
        ]);

        run_menu(&mut contacts, &mut console).unwrap();

        let out = output(console);
        assert!(out.contains("3. Grace Hopper (777-0303, grace@example.com)"));
        assert!(!out.contains("1. Ada Lovelace (555-0101"));
        assert!(out.contains("Contact not found: 9"));

        let alan = contacts.store().find_by_id(2).unwrap();
        assert_eq!(alan.name, "Alan Turing");
        assert_eq!(alan.phone, "555-9999");
        assert_eq!(alan.email, "alan@example.com");
    }
}
