//! Interactive session: one command per line, page re-rendered after each.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{FormDraft, RecordStore};
use crate::controller::ViewController;
use crate::ui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(FormDraft),
    Name(String),
    Email(String),
    Submit,
    Delete(i64),
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <name> <email>   create a user
  name <value>         set the draft name
  email <value>        set the draft email
  submit               create a user from the draft
  delete <id>          delete a user
  refresh              reload the list
  help                 show this help
  quit                 leave";

/// Parses one input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    let Some((word, rest)) = split_word(line) else {
        return Ok(None);
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => {
            let (name, email) = split_name_email(rest);
            ShellCommand::Add(FormDraft::new(name, email))
        }
        "name" => ShellCommand::Name(rest.to_string()),
        "email" => ShellCommand::Email(rest.to_string()),
        "submit" => ShellCommand::Submit,
        "delete" | "rm" => {
            let id = rest
                .parse::<i64>()
                .map_err(|_| format!("delete needs a numeric id, got {rest:?}"))?;
            ShellCommand::Delete(id)
        }
        "refresh" | "list" => ShellCommand::Refresh,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Some(command))
}

/// Email has no spaces, so it is the last token and the rest is the name.
/// A lone token is the email only if it looks like one.
fn split_name_email(rest: &str) -> (&str, &str) {
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, email)) => (name.trim(), email.trim()),
        None if rest.contains('@') => ("", rest),
        None => (rest, ""),
    }
}

fn split_word(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    })
}

/// What the session loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Render,
    Quiet,
    Stop,
}

/// Applies one command to the controller.
///
/// Submissions with a blank required field are refused here, before any
/// round trip, and leave the view state untouched.
pub async fn apply<S: RecordStore>(ctrl: &ViewController<S>, command: ShellCommand) -> Flow {
    match command {
        ShellCommand::Add(draft) => {
            ctrl.set_draft(draft);
            submit_checked(ctrl).await
        }
        ShellCommand::Name(name) => {
            ctrl.set_name(name);
            Flow::Render
        }
        ShellCommand::Email(email) => {
            ctrl.set_email(email);
            Flow::Render
        }
        ShellCommand::Submit => submit_checked(ctrl).await,
        ShellCommand::Delete(id) => {
            ui::with_spinner("Deleting...", ctrl.remove(id)).await;
            Flow::Render
        }
        ShellCommand::Refresh => {
            ui::with_spinner("Loading...", ctrl.refresh()).await;
            Flow::Render
        }
        ShellCommand::Help => {
            println!("{HELP}");
            Flow::Quiet
        }
        ShellCommand::Quit => Flow::Stop,
    }
}

async fn submit_checked<S: RecordStore>(ctrl: &ViewController<S>) -> Flow {
    if let Some(field) = ctrl.draft().missing_field() {
        eprintln!("Please fill out the {field} field.");
        return Flow::Render;
    }
    ui::with_spinner("Adding...", ctrl.submit()).await;
    Flow::Render
}

fn print_page<S: RecordStore>(ctrl: &ViewController<S>) {
    let page = ui::render(&ctrl.state(), &ctrl.draft());
    println!("{page}");
}

/// Runs the session on stdin until `quit` or end of input.
pub async fn run<S: RecordStore>(ctrl: &ViewController<S>) -> std::io::Result<()> {
    ui::with_spinner("Loading...", ctrl.refresh()).await;
    print_page(ctrl);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(hint) => {
                eprintln!("{hint}");
                continue;
            }
        };
        match apply(ctrl, command).await {
            Flow::Render => print_page(ctrl),
            Flow::Quiet => {}
            Flow::Stop => break,
        }
    }
    Ok(())
}
