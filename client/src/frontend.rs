use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use memo_core::Note;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::sync::{SyncHandle, UiEvent};

/// Minimal line-oriented presentation layer
///
/// Renders whatever note list the sync client currently holds and forwards
/// user intents; all store and network work stays on the sync client task.
pub async fn run(handle: SyncHandle, mut ui: mpsc::UnboundedReceiver<UiEvent>) -> Result<()> {
    println!("memo - type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending_delete: Option<i64> = None;

    loop {
        tokio::select! {
            event = ui.recv() => match event {
                Some(UiEvent::FatalLocal(message)) => bail!("{message}"),
                Some(event) => render(&event),
                None => break,
            },
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if !handle_line(&line, &handle, &mut pending_delete) {
                        break;
                    }
                }
                Ok(None) | Err(_) => break,
            },
        }
    }

    Ok(())
}

fn render(event: &UiEvent) {
    match event {
        UiEvent::Notes(notes) => print_notes(notes),
        UiEvent::Mode(mode) => println!("[{}]", mode.label()),
        UiEvent::Status(status) => println!("{status}"),
        UiEvent::FatalLocal(_) => {}
    }
}

fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("(no notes)");
        return;
    }

    for note in notes {
        let when = DateTime::from_timestamp_millis(note.created_at)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!("{:>4}  {}  {}", note.id, when, note.content);
    }
}

/// Interpret one input line; returns false when the user quits
fn handle_line(line: &str, handle: &SyncHandle, pending_delete: &mut Option<i64>) -> bool {
    let line = line.trim();

    // Deletes need an explicit confirmation first
    if let Some(id) = pending_delete.take() {
        if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
            handle.delete(id);
        } else {
            println!("Cancelled");
        }
        return true;
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "q" | "quit" | "exit" => return false,
        "ls" | "list" => handle.refresh(),
        "add" => {
            // Validation happens in the sync client; empty content comes
            // back as a status message
            handle.add(rest.to_string());
        }
        "rm" | "del" => match rest.parse::<i64>() {
            Ok(id) => {
                println!("Delete note {id}? [y/N]");
                *pending_delete = Some(id);
            }
            Err(_) => println!("Usage: rm <id>"),
        },
        "help" => print_help(),
        other => println!("Unknown command '{other}', type 'help'"),
    }

    true
}

fn print_help() {
    println!("  add <text>   create a note");
    println!("  rm <id>      delete a note (asks for confirmation)");
    println!("  ls           refresh and show the note list");
    println!("  quit         exit");
}
