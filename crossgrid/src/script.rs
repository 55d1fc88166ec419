//! Key scripts: a compact text form of a key sequence.
//!
//! Letters and digits type themselves. Whitespace between tokens is ignored.
//! Named keys are written in angle brackets:
//!
//! | token          | key                              |
//! |----------------|----------------------------------|
//! | `<bs>`         | backspace                        |
//! | `<left>` etc.  | arrows (`left right up down`)    |
//! | `<space>`      | switch direction                 |
//! | `<tab>`        | next incomplete entry            |
//! | `<s-tab>`      | previous incomplete entry        |
//! | `<click:R,C>`  | click the cell at row R, col C   |
//! | `<select:N>`   | pick entry N from the clue list  |
//! | `<block:R,C>`  | toggle a block at row R, col C   |

use crossgrid_core::{KeyEvent, Position};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unterminated key name starting at byte {0}")]
    Unterminated(usize),
    #[error("unknown key <{0}>")]
    UnknownKey(String),
    #[error("bad argument in <{0}>")]
    BadArgument(String),
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
}

/// Parse a key script into key events.
pub fn parse_keys(script: &str) -> Result<Vec<KeyEvent>, ScriptError> {
    let mut keys = Vec::new();
    let mut rest = script;
    let mut offset = 0;
    while let Some(ch) = rest.chars().next() {
        let consumed = match ch {
            '<' => {
                let end = rest.find('>').ok_or(ScriptError::Unterminated(offset))?;
                keys.push(named_key(&rest[1..end])?);
                end + 1
            }
            c if c.is_whitespace() => c.len_utf8(),
            c if c.is_alphanumeric() => {
                keys.push(KeyEvent::Char(c));
                c.len_utf8()
            }
            c => return Err(ScriptError::UnexpectedChar(c)),
        };
        rest = &rest[consumed..];
        offset += consumed;
    }
    Ok(keys)
}

fn named_key(name: &str) -> Result<KeyEvent, ScriptError> {
    let key = match name {
        "bs" => KeyEvent::Backspace,
        "left" => KeyEvent::Left,
        "right" => KeyEvent::Right,
        "up" => KeyEvent::Up,
        "down" => KeyEvent::Down,
        "space" => KeyEvent::Space,
        "tab" => KeyEvent::Tab,
        "s-tab" => KeyEvent::BackTab,
        _ => match name.split_once(':') {
            Some(("click", arg)) => KeyEvent::Click(position(name, arg)?),
            Some(("block", arg)) => KeyEvent::ToggleBlock(position(name, arg)?),
            Some(("select", arg)) => KeyEvent::SelectEntry(
                arg.trim()
                    .parse()
                    .map_err(|_| ScriptError::BadArgument(name.to_string()))?,
            ),
            _ => return Err(ScriptError::UnknownKey(name.to_string())),
        },
    };
    Ok(key)
}

fn position(name: &str, arg: &str) -> Result<Position, ScriptError> {
    let bad = || ScriptError::BadArgument(name.to_string());
    let (row, col) = arg.split_once(',').ok_or_else(bad)?;
    let row = row.trim().parse().map_err(|_| bad())?;
    let col = col.trim().parse().map_err(|_| bad())?;
    Ok(Position::new(row, col))
}
