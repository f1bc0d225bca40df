//! Request/response loop over any line-based input and text output.

use std::io::{BufRead, Write};

use thiserror::Error;

use stockkeeper_infra::{Receipt, ServiceError, SnapshotStore, StockService};

use crate::command::ShellCommand;
use crate::render;

#[derive(Debug, Error)]
pub enum ShellError {
    /// Reading a prompt or writing output failed.
    #[error("shell io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the interactive menu until the user exits or input ends.
///
/// Only a broken input/output stream is an error; every stock failure is
/// reported to the user and the menu is shown again.
pub fn run<S, R, W>(service: &mut StockService<S>, input: R, mut output: W) -> Result<(), ShellError>
where
    S: SnapshotStore,
    R: BufRead,
    W: Write,
{
    let mut prompter = Prompter { input, lines: 0 };
    writeln!(output, "Starting Supermarket Stock Management System...")?;

    loop {
        render::stock(&mut output, service.listing())?;
        render::menu(&mut output)?;

        let Some(choice) = prompter.ask(&mut output, "Enter your choice (1, 2, or 3): ")? else {
            tracing::debug!(lines = prompter.lines, "input closed");
            break;
        };

        let command = match choice.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(_) => {
                writeln!(output, "Invalid choice. Please enter 1, 2, or 3.")?;
                continue;
            }
        };

        let is_sale = match command {
            ShellCommand::Restock => false,
            ShellCommand::Sell => true,
            ShellCommand::Exit => break,
        };
        let (product_prompt, quantity_prompt) = if is_sale {
            ("Enter product name sold: ", "Enter quantity sold: ")
        } else {
            ("Enter product name to restock: ", "Enter quantity to add: ")
        };

        let Some(product) = prompter.ask(&mut output, product_prompt)? else {
            break;
        };
        let Some(quantity) = prompter.ask(&mut output, quantity_prompt)? else {
            break;
        };

        let outcome = if is_sale {
            service.sell(&product, &quantity)
        } else {
            service.restock(&product, &quantity)
        };
        report(&mut output, service, outcome)?;
    }

    if service.is_dirty() {
        writeln!(output, "\nSystem shutting down. Retrying the last unsaved change on exit.")?;
    } else {
        writeln!(output, "\nSystem shutting down. Your latest changes are saved!")?;
    }
    output.flush()?;
    Ok(())
}

fn report<S, W>(
    output: &mut W,
    service: &StockService<S>,
    outcome: Result<Receipt, ServiceError>,
) -> std::io::Result<()>
where
    S: SnapshotStore,
    W: Write,
{
    match outcome {
        Ok(receipt) => {
            render::receipt(output, &receipt)?;
            render::saved(output, &service.store().location())
        }
        Err(err) => render::error(output, &err),
    }
}

struct Prompter<R> {
    input: R,
    lines: usize,
}

impl<R: BufRead> Prompter<R> {
    /// Print `prompt` and read one line. `None` at end of input.
    fn ask<W: Write>(&mut self, output: &mut W, prompt: &str) -> std::io::Result<Option<String>> {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.lines += 1;
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockkeeper_core::ProductName;
    use stockkeeper_infra::InMemorySnapshotStore;

    fn session(store: &InMemorySnapshotStore, script: &str) -> (String, Vec<(String, u64)>) {
        let mut service = StockService::open(store);
        let mut out = Vec::new();
        run(&mut service, script.as_bytes(), &mut out).unwrap();
        let entries = service
            .listing()
            .map(|(n, q)| (n.to_string(), q))
            .collect();
        (String::from_utf8(out).unwrap(), entries)
    }

    #[test]
    fn exit_choice_ends_session() {
        let store = InMemorySnapshotStore::new();
        let (text, entries) = session(&store, "3\n");
        assert!(text.contains("--- Inventory is currently empty. ---"));
        assert!(text.contains("Your latest changes are saved!"));
        assert!(entries.is_empty());
    }

    #[test]
    fn end_of_input_ends_session() {
        let store = InMemorySnapshotStore::new();
        let (text, _) = session(&store, "");
        assert!(text.contains("System shutting down"));
    }

    #[test]
    fn invalid_choice_reshows_menu() {
        let store = InMemorySnapshotStore::new();
        let (text, _) = session(&store, "9\nhello\n3\n");
        assert_eq!(text.matches("Invalid choice. Please enter 1, 2, or 3.").count(), 2);
        assert_eq!(text.matches("--- Available Actions ---").count(), 3);
    }

    #[test]
    fn restock_then_sell_to_low_stock() {
        let store = InMemorySnapshotStore::new();
        let (text, entries) = session(&store, "1\nrice\n50\n2\nRice\n45\n2\nRice\n10\n3\n");

        assert!(text.contains("NEW ITEM ADDED: Rice added with initial stock of 50 units."));
        assert!(text.contains("SALE SUCCESS: Sold 45 units of Rice."));
        assert!(text.contains("LOW STOCK ALERT! Rice is now at 5 units."));
        assert!(text.contains("ERROR: Cannot sell 10 units of Rice. Only 5 available."));
        assert!(text.contains("Stock successfully saved to <memory>."));
        assert_eq!(entries, vec![("Rice".to_string(), 5)]);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn sell_to_zero_reports_out_of_stock() {
        let store = InMemorySnapshotStore::new();
        let (text, entries) = session(&store, "1\nmilk\n5\n2\nMilk\n5\n3\n");
        assert!(text.contains("OUT OF STOCK ALERT! Milk is now completely sold out."));
        assert!(text.contains("Milk: 0 units"));
        assert_eq!(entries, vec![("Milk".to_string(), 0)]);
    }

    #[test]
    fn bad_quantity_and_unknown_product_are_reported() {
        let store = InMemorySnapshotStore::new();
        let (text, entries) = session(&store, "1\nrice\n-4\n2\nbread\n1\n3\n");
        assert!(text.contains("Quantity must be a positive number."));
        assert!(text.contains("ERROR: Product 'Bread' is not tracked in the inventory."));
        assert!(entries.is_empty());
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn save_failure_is_reported_and_change_kept() {
        let store = InMemorySnapshotStore::new();
        store.set_fail_writes(true);
        let mut service = StockService::open(&store);
        let mut out = Vec::new();
        run(&mut service, "1\neggs\n12\n3\n".as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("NEW ITEM ADDED: Eggs added with initial stock of 12 units."));
        assert!(text.contains("ERROR: could not save stock"));
        assert!(text.contains("Retrying the last unsaved change on exit."));
        assert_eq!(
            service.inventory().quantity(&ProductName::new("eggs")),
            Some(12)
        );
        assert!(service.is_dirty());
    }

    #[test]
    fn input_ending_mid_command_stops_cleanly() {
        let store = InMemorySnapshotStore::new();
        let (text, entries) = session(&store, "1\nrice\n");
        assert!(text.ends_with("Your latest changes are saved!\n"));
        assert!(entries.is_empty());
    }
}
