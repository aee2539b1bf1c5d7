//! Line commands understood by the interactive shell.

use tracker_core::{FormData, RecordId, ViewEvent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fragment change (`#users`, `go tasks`).
    Navigate(String),
    Event(ViewEvent),
    Show,
    Notices,
    Help,
    Quit,
}

/// Parses one input line; `Err` carries a message for the user.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if let Some(fragment) = line.strip_prefix('#') {
        return Ok(Command::Navigate(fragment.to_string()));
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "go" => Command::Navigate(rest.to_string()),
        "search" => Command::Event(ViewEvent::Search(rest.to_string())),
        "add" => Command::Event(ViewEvent::Submit(parse_fields(rest)?)),
        "edit" => Command::Event(ViewEvent::Edit(required_id(rest)?)),
        "set" => {
            let (field, value) = parse_pair(rest)?;
            Command::Event(ViewEvent::EditInput { field, value })
        }
        "save" => Command::Event(ViewEvent::Save),
        "enter" => Command::Event(ViewEvent::KeyPress("Enter".to_string())),
        "cancel" => Command::Event(ViewEvent::Cancel),
        "delete" => Command::Event(ViewEvent::Delete(required_id(rest)?)),
        "toggle" => {
            let (id, state) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: toggle <id> on|off".to_string())?;
            let done = match state.trim() {
                "on" => true,
                "off" => false,
                other => return Err(format!("expected on|off, got `{other}`")),
            };
            Command::Event(ViewEvent::Toggle {
                id: RecordId::from(id),
                done,
            })
        }
        "show" => Command::Show,
        "notices" => Command::Notices,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err("empty command".to_string()),
        other => return Err(format!("unknown command `{other}`; try `help`")),
    };
    Ok(command)
}

fn required_id(rest: &str) -> Result<RecordId, String> {
    if rest.is_empty() {
        return Err("missing record id".to_string());
    }
    Ok(RecordId::from(rest))
}

fn parse_pair(token: &str) -> Result<(String, String), String> {
    token
        .split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected field=value, got `{token}`"))
}

/// `name=Ann Lee email=ann@example.com`: a value runs until the next
/// `field=` token.
fn parse_fields(rest: &str) -> Result<FormData, String> {
    let mut form = FormData::new();
    let mut current: Option<(String, String)> = None;

    for word in rest.split_whitespace() {
        match word.split_once('=') {
            Some((field, value)) if !field.is_empty() => {
                if let Some((field, value)) = current.take() {
                    form.set(field, value);
                }
                current = Some((field.to_string(), value.to_string()));
            }
            _ => match current.as_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(word);
                }
                None => return Err(format!("expected field=value, got `{word}`")),
            },
        }
    }
    if let Some((field, value)) = current {
        form.set(field, value);
    }
    Ok(form)
}

pub const HELP: &str = "\
commands:
  #<route> | go <route>     switch view (projects, users, tasks)
  search <text>             filter the current list
  add field=value ...       submit the add form
  edit <id>                 put a row in edit mode
  set field=value           change a field of the row being edited
  save | enter              save the row being edited
  cancel                    leave edit mode
  delete <id>               delete a row (asks for confirmation)
  toggle <id> on|off        mark a task done or not done
  show                      print the current view markup
  notices                   print visible notices
  quit";
