//! Parsing of typed commands into session actions.

use colormap_core::color::palette_entry;
use colormap_core::{Action, ColorRef};
use std::path::PathBuf;
use thiserror::Error;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Action(Action),
    Colors,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),
    #[error("Not a number: {0}")]
    InvalidNumber(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Help text, one command per line.
pub const HELP: &[(&str, &str)] = &[
    ("add <color> <min> <max>", "Color the range [min, max)"),
    ("background <color>", "Change the gap-fill color"),
    ("save", "Save a snapshot as colormap_NN"),
    ("load <name>", "Load a saved snapshot"),
    ("saved", "List saved snapshots"),
    ("delete <name>", "Delete a saved snapshot"),
    ("upload <data-url>", "Load a data:...;base64,... upload"),
    ("import <path>", "Load a colormap JSON file"),
    ("export <path>", "Write the colormap as JSON"),
    ("reset", "Start over"),
    ("colors", "List the palette"),
    ("help", "Show this help"),
    ("quit", "Exit"),
];

fn parse_bound(token: Option<&str>) -> Result<Option<f64>, CommandError> {
    match token {
        None => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .map(Some)
            .map_err(|_| CommandError::InvalidNumber(text.to_string())),
    }
}

/// Palette labels map to their value; anything else passes through untouched.
fn color_ref(name: &str) -> ColorRef {
    palette_entry(name)
        .map(|entry| entry.color_ref())
        .unwrap_or_else(|| ColorRef::from(name))
}

fn required<'a>(token: Option<&'a str>, usage: &'static str) -> Result<&'a str, CommandError> {
    token.ok_or(CommandError::Usage(usage))
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(Command::Empty);
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "add" => Command::Action(Action::Add {
            color: tokens.next().map(color_ref),
            min: parse_bound(tokens.next())?,
            max: parse_bound(tokens.next())?,
        }),
        "background" | "bg" => {
            let color = required(tokens.next(), "background <color>")?;
            Command::Action(Action::SetBackgroundColor(color_ref(color)))
        }
        "save" => Command::Action(Action::Save),
        "load" => {
            let name = required(tokens.next(), "load <name>")?;
            Command::Action(Action::LoadNamed(name.to_string()))
        }
        "saved" | "list" => Command::Action(Action::Refresh),
        "delete" => {
            let name = required(tokens.next(), "delete <name>")?;
            Command::Action(Action::DeleteSaved(name.to_string()))
        }
        "upload" => {
            let contents = required(tokens.next(), "upload <data-url>")?;
            Command::Action(Action::Upload(contents.to_string()))
        }
        "import" => {
            let path = required(tokens.next(), "import <path>")?;
            Command::Action(Action::Import(PathBuf::from(path)))
        }
        "export" => {
            let path = required(tokens.next(), "export <path>")?;
            Command::Action(Action::Export(PathBuf::from(path)))
        }
        "reset" => Command::Action(Action::Reset),
        "colors" => Command::Colors,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse("add red 20 40").unwrap(),
            Command::Action(Action::Add {
                color: Some(ColorRef::new("red")),
                min: Some(20.0),
                max: Some(40.0),
            })
        );
    }

    #[test]
    fn test_parse_add_missing_bound_reaches_session() {
        assert_eq!(
            parse("add red 20").unwrap(),
            Command::Action(Action::Add {
                color: Some(ColorRef::new("red")),
                min: Some(20.0),
                max: None,
            })
        );
    }

    #[test]
    fn test_parse_add_palette_label() {
        assert_eq!(
            parse("add Magenta 0 10").unwrap(),
            Command::Action(Action::Add {
                color: Some(ColorRef::new("magenta")),
                min: Some(0.0),
                max: Some(10.0),
            })
        );
    }

    #[test]
    fn test_parse_add_bad_number() {
        assert_eq!(
            parse("add red twenty 40"),
            Err(CommandError::InvalidNumber("twenty".to_string()))
        );
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse("   ").unwrap(), Command::Empty);
        assert_eq!(parse("QUIT").unwrap(), Command::Quit);
        assert_eq!(
            parse("load colormap_01").unwrap(),
            Command::Action(Action::LoadNamed("colormap_01".to_string()))
        );
        assert_eq!(
            parse("bg black").unwrap(),
            Command::Action(Action::SetBackgroundColor(ColorRef::new("black")))
        );
        assert!(matches!(parse("load"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("paint it"), Err(CommandError::Unknown(_))));
    }
}
