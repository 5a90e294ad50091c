use crate::commands::{
    AddCommand, ClearCommand, Command, DeleteCommand, EditCommand, FilterCommand, MarkCommand,
    PurgeCommand, add, clear, delete, edit, filter, mark, purge,
};
use crate::model::filter::{FilterError, TaskFilter};
use crate::model::task::{Tag, Task, TaskError, Timestamp};

/// Error type for reading a shell line
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command {0:?} (try `help`)")]
    UnknownCommand(String),
    #[error("invalid command format\n{0}")]
    Usage(&'static str),
    #[error("{0}")]
    Task(#[from] TaskError),
    #[error("{0}")]
    Filter(#[from] FilterError),
}

/// One line of shell input
#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    /// A reversible command for the executor
    Run(Command),
    List,
    Undo,
    Redo,
    Help,
    Exit,
}

pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, args) = match line.split_once(char::is_whitespace) {
        Some((word, args)) => (word, args.trim()),
        None => (line, ""),
    };

    let cmd = match word {
        "list" | "ls" => ShellCommand::List,
        "undo" => ShellCommand::Undo,
        "redo" => ShellCommand::Redo,
        "help" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        add::COMMAND_WORD => {
            if args.is_empty() {
                return Err(ParseError::Usage(add::MESSAGE_USAGE));
            }
            ShellCommand::Run(Command::Add(AddCommand::new(parse_task(args)?)))
        }
        delete::COMMAND_WORD => {
            let index = parse_index(args).ok_or(ParseError::Usage(delete::MESSAGE_USAGE))?;
            ShellCommand::Run(Command::Delete(DeleteCommand::new(index)))
        }
        edit::COMMAND_WORD => {
            let (index, rest) = args
                .split_once(char::is_whitespace)
                .and_then(|(index, rest)| Some((parse_index(index)?, rest)))
                .ok_or(ParseError::Usage(edit::MESSAGE_USAGE))?;
            ShellCommand::Run(Command::Edit(EditCommand::new(index, parse_task(rest)?)))
        }
        mark::DONE_COMMAND_WORD | mark::UNDONE_COMMAND_WORD => {
            let index = parse_index(args).ok_or(ParseError::Usage(mark::MESSAGE_USAGE))?;
            let done = word == mark::DONE_COMMAND_WORD;
            ShellCommand::Run(Command::Mark(MarkCommand::new(index, done)))
        }
        filter::COMMAND_WORD => {
            let filters = args
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<TaskFilter>, _>>()?;
            ShellCommand::Run(Command::Filter(FilterCommand::new(filters)))
        }
        purge::COMMAND_WORD => ShellCommand::Run(Command::Purge(PurgeCommand::new())),
        clear::COMMAND_WORD => ShellCommand::Run(Command::Clear(ClearCommand::new())),
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(cmd))
}

pub fn usage() -> String {
    [
        add::MESSAGE_USAGE,
        delete::MESSAGE_USAGE,
        edit::MESSAGE_USAGE,
        mark::MESSAGE_USAGE,
        filter::MESSAGE_USAGE,
        purge::MESSAGE_USAGE,
        clear::MESSAGE_USAGE,
        "list: Shows the displayed task list.",
        "undo: Reverses the last command. redo: Re-applies it.",
        "exit: Leaves the shell.",
    ]
    .join("\n\n")
}

fn parse_index(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}

/// Which field the following words belong to
enum Field {
    Title,
    Description,
    Timestamp,
}

/// Parse `TITLE [/d DESCRIPTION] [/t TIMESTAMP] [#TAG]...`. Tags may appear
/// anywhere; markers may come in any order.
pub fn parse_task(text: &str) -> Result<Task, ParseError> {
    let mut title = Vec::new();
    let mut description = Vec::new();
    let mut timestamp = Vec::new();
    let mut tags = Vec::new();
    let mut field = Field::Title;

    for word in text.split_whitespace() {
        match word {
            "/d" => field = Field::Description,
            "/t" => field = Field::Timestamp,
            w if w.starts_with('#') => tags.push(Tag::new(w)?),
            w => match field {
                Field::Title => title.push(w),
                Field::Description => description.push(w),
                Field::Timestamp => timestamp.push(w),
            },
        }
    }

    let timestamp = if timestamp.is_empty() {
        None
    } else {
        Some(timestamp.join(" ").parse::<Timestamp>()?)
    };
    let description = description.join(" ");
    Ok(Task::new(&title.join(" "))?
        .with_description(Some(&description))
        .with_timestamp(timestamp)
        .with_tags(tags))
}
