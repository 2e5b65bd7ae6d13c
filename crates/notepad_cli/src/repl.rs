//! Line-oriented note editor shell.
//!
//! # Responsibility
//! - Parse one command per input line.
//! - Drive `NotesApp` and render list/editor state as plain text.
//!
//! # Invariants
//! - Parse errors and unknown ids never end the session.
//! - Storage write failures do end it; they are returned to the caller.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use notepad_core::{KeyValueStore, NoteId, NoteSummary, NotesApp};
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

const HELP_TEXT: &str = "\
commands:
  list               show all notes, newest first
  new                create a note and open it
  open <n|id>        open note by list position (1-based) or id
  show               print the open note's buffer
  title <text>       replace the buffered title
  content <text>     replace the buffered content (\\n for line breaks)
  append <text>      add a line to the buffered content
  save               commit buffered edits
  cancel             discard buffered edits
  close              close the open note without saving
  delete <n|id>      delete a note
  help               show this text
  quit               leave (unsaved edits are discarded)";

/// Reference to a note as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the current list.
    Position(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Open(Target),
    Show,
    Title(String),
    Content(String),
    Append(String),
    Save,
    Cancel,
    Close,
    Delete(Target),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    MissingArgument(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command `{word}`; try `help`"),
            Self::MissingArgument(command) => write!(f, "`{command}` needs an argument"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "new" => Command::New,
        "open" => Command::Open(parse_target(rest, "open")?),
        "show" => Command::Show,
        "title" => Command::Title(rest.to_string()),
        "content" => Command::Content(unescape(rest)),
        "append" => Command::Append(unescape(rest)),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "close" => Command::Close,
        "delete" | "rm" => Command::Delete(parse_target(rest, "delete")?),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_target(arg: &str, command: &'static str) -> Result<Target, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::MissingArgument(command));
    }
    match arg.parse::<usize>() {
        Ok(position) if position > 0 => Ok(Target::Position(position)),
        _ => Ok(Target::Id(arg.to_string())),
    }
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Runs the shell until `quit` or end of input.
pub fn run<S, R, W>(app: &mut NotesApp<S>, input: R, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}  (type `help` for commands)", app.count_label())?;
    write_prompt(app, out)?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let flow = match parse_command(&line) {
            Ok(Some(command)) => execute(app, command, out)?,
            Ok(None) => Flow::Continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                Flow::Continue
            }
        };
        if flow == Flow::Quit {
            return Ok(());
        }
        write_prompt(app, out)?;
    }
    finish(app, out)
}

/// Applies one command and prints its outcome.
pub fn execute<S, W>(app: &mut NotesApp<S>, command: Command, out: &mut W) -> Result<Flow>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::List => print_list(&app.summaries(), &app.count_label(), out)?,
        Command::New => {
            let note = app.create_note().context("failed to create note")?;
            writeln!(out, "created {}", note.id)?;
        }
        Command::Open(target) => {
            let opened = resolve(app, &target).is_some_and(|id| app.select(&id));
            if opened {
                print_editor(app, out)?;
            } else {
                writeln!(out, "no such note")?;
            }
        }
        Command::Show => print_editor(app, out)?,
        Command::Title(text) => {
            if !app.edit_title(text) {
                writeln!(out, "no note open")?;
            }
        }
        Command::Content(text) => {
            if !app.edit_content(text) {
                writeln!(out, "no note open")?;
            }
        }
        Command::Append(text) => match app.edit_buffer().map(|buffer| buffer.content.clone()) {
            Some(mut content) => {
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(&text);
                app.edit_content(content);
            }
            None => writeln!(out, "no note open")?,
        },
        Command::Save => {
            if app.save().context("failed to save note")? {
                writeln!(out, "saved")?;
            } else {
                writeln!(out, "nothing to save")?;
            }
        }
        Command::Cancel => {
            if app.cancel() {
                writeln!(out, "changes discarded")?;
            } else {
                writeln!(out, "nothing to cancel")?;
            }
        }
        Command::Close => {
            if app.has_changes() {
                writeln!(out, "discarding unsaved changes")?;
            }
            app.deselect();
        }
        Command::Delete(target) => {
            let removed = match resolve(app, &target) {
                Some(id) => app.delete_note(&id).context("failed to delete note")?,
                None => false,
            };
            if removed {
                writeln!(out, "deleted")?;
            } else {
                writeln!(out, "no such note")?;
            }
        }
        Command::Help => writeln!(out, "{HELP_TEXT}")?,
        Command::Quit => {
            finish(app, out)?;
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

fn resolve<S: KeyValueStore>(app: &NotesApp<S>, target: &Target) -> Option<NoteId> {
    match target {
        Target::Position(position) => app
            .list()
            .get(position - 1)
            .map(|note| note.id.clone()),
        Target::Id(id) => {
            let id = NoteId::from(id.as_str());
            app.store().get(&id).map(|note| note.id.clone())
        }
    }
}

fn finish<S: KeyValueStore, W: Write>(app: &NotesApp<S>, out: &mut W) -> Result<()> {
    if app.has_changes() {
        writeln!(out, "discarding unsaved changes")?;
    }
    Ok(())
}

fn write_prompt<S: KeyValueStore, W: Write>(app: &NotesApp<S>, out: &mut W) -> Result<()> {
    match app.edit_buffer() {
        Some(buffer) => {
            let marker = if app.has_changes() { "*" } else { "" };
            write!(out, "notepad [{}{}]> ", buffer.title, marker)?;
        }
        None => write!(out, "notepad> ")?,
    }
    out.flush()?;
    Ok(())
}

fn print_list<W: Write>(rows: &[NoteSummary], label: &str, out: &mut W) -> Result<()> {
    writeln!(out, "{label}")?;
    if rows.is_empty() {
        writeln!(out, "No notes yet. Use `new` to create one.")?;
        return Ok(());
    }
    for (index, row) in rows.iter().enumerate() {
        let marker = if row.selected { ">" } else { " " };
        writeln!(
            out,
            "{marker}{:>3}. {}  [{}]",
            index + 1,
            row.title,
            format_date(row.created_at)
        )?;
        writeln!(out, "      {}", row.preview)?;
    }
    Ok(())
}

fn print_editor<S: KeyValueStore, W: Write>(app: &NotesApp<S>, out: &mut W) -> Result<()> {
    let (Some(note), Some(buffer)) = (app.selected_note(), app.edit_buffer()) else {
        writeln!(out, "Select a note to view, or create a new one with `new`.")?;
        return Ok(());
    };
    writeln!(out, "# {}", buffer.title)?;
    writeln!(out, "id: {}  created: {}", note.id, format_date(note.created_at))?;
    writeln!(out)?;
    writeln!(out, "{}", buffer.content)?;
    if app.has_changes() {
        writeln!(out, "(unsaved changes: `save` or `cancel`)")?;
    }
    Ok(())
}

fn format_date(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
