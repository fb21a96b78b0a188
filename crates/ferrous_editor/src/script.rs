//! Line-oriented command scripts for driving the editor without a window.
//!
//! ```text
//! # place two cubes on layer 2 and save
//! layer 2
//! cube
//! click 640 360
//! place 3.2 0 -1.7
//! save
//! ```

use std::str::FromStr;
use std::time::Duration;

use ferrous_app::AppEvent;
use ferrous_core::PointerEvent;
use glam::Vec3;
use thiserror::Error;

use crate::state::Command;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{word}`")]
    UnknownCommand { line: usize, word: String },
    #[error("line {line}: usage: {usage}")]
    Usage { line: usize, usage: &'static str },
}

/// Parses a whole script.  Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<AppEvent<Command>>, ScriptError> {
    let mut events = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        if let Some(event) = parse_line(raw, i + 1)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parses one line; `Ok(None)` for blanks and comments.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<AppEvent<Command>>, ScriptError> {
    let text = raw.split('#').next().unwrap_or_default().trim();
    let mut words = text.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let usage = |usage: &'static str| ScriptError::Usage { line, usage };

    let event = match word {
        "layer" => {
            let [n] = numbers::<i32, 1>(&args).ok_or_else(|| usage("layer N"))?;
            AppEvent::Message(Command::SetLayer(n))
        }
        "select" => match args.as_slice() {
            [name] => AppEvent::Message(Command::SelectAsset(name.to_string())),
            _ => return Err(usage("select NAME")),
        },
        "cube" => {
            no_args(&args).ok_or_else(|| usage("cube"))?;
            AppEvent::Message(Command::ToggleCubePlacement)
        }
        "clear-tool" => {
            no_args(&args).ok_or_else(|| usage("clear-tool"))?;
            AppEvent::Message(Command::ClearTool)
        }
        "click" => {
            let [x, y] = numbers::<f64, 2>(&args).ok_or_else(|| usage("click X Y"))?;
            AppEvent::Pointer(PointerEvent::left(x, y))
        }
        "place" => {
            let p = numbers::<f32, 3>(&args).ok_or_else(|| usage("place X Y Z"))?;
            AppEvent::Message(Command::PlaceAt {
                point: Vec3::from(p),
            })
        }
        "remove" => {
            let [index] = numbers::<usize, 1>(&args).ok_or_else(|| usage("remove INDEX"))?;
            AppEvent::Message(Command::Remove { index })
        }
        "move" => {
            let (index, rest) = args.split_first().ok_or_else(|| usage("move INDEX X Y Z"))?;
            let index = index.parse().map_err(|_| usage("move INDEX X Y Z"))?;
            let p = numbers::<f32, 3>(rest).ok_or_else(|| usage("move INDEX X Y Z"))?;
            AppEvent::Message(Command::Move {
                index,
                point: Vec3::from(p),
            })
        }
        "save" => {
            no_args(&args).ok_or_else(|| usage("save"))?;
            AppEvent::Message(Command::Save)
        }
        "load" => {
            no_args(&args).ok_or_else(|| usage("load"))?;
            AppEvent::Message(Command::Load)
        }
        "wait" => {
            let [ms] = numbers::<u64, 1>(&args).ok_or_else(|| usage("wait MS"))?;
            AppEvent::Wait(Duration::from_millis(ms))
        }
        "resize" => {
            let [width, height] = numbers::<u32, 2>(&args).ok_or_else(|| usage("resize W H"))?;
            AppEvent::Resized { width, height }
        }
        "quit" => AppEvent::Quit,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                word: other.to_string(),
            })
        }
    };
    Ok(Some(event))
}

fn no_args(args: &[&str]) -> Option<()> {
    args.is_empty().then_some(())
}

/// Exactly `N` arguments, each parsed as `T`.
fn numbers<T: FromStr + Copy + Default, const N: usize>(args: &[&str]) -> Option<[T; N]> {
    if args.len() != N {
        return None;
    }
    let mut out = [T::default(); N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().ok()?;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(line: &str) -> Command {
        match parse_line(line, 1).unwrap() {
            Some(AppEvent::Message(cmd)) => cmd,
            other => panic!("expected a message, got {other:?}"),
        }
    }

    #[test]
    fn parses_every_command() {
        let script = "
            # setup
            layer 3
            select pikachu
            cube
            clear-tool
            click 640 360   # centre
            place 1.4 0 2.6
            remove 0
            move 1 2 0 -3
            save
            load
            wait 250
            resize 800 600
            quit
        ";
        let events = parse_script(script).unwrap();
        assert_eq!(events.len(), 13);
        assert!(matches!(events[4], AppEvent::Pointer(p) if p.x == 640.0 && p.y == 360.0));
        assert!(matches!(events[10], AppEvent::Wait(d) if d == Duration::from_millis(250)));
        assert!(matches!(
            events[11],
            AppEvent::Resized { width: 800, height: 600 }
        ));
        assert!(matches!(events[12], AppEvent::Quit));
    }

    #[test]
    fn arguments_are_typed() {
        assert!(matches!(message("layer 2"), Command::SetLayer(2)));
        assert!(matches!(
            message("move 4 1 2 3"),
            Command::Move { index: 4, point } if point == Vec3::new(1.0, 2.0, 3.0)
        ));
        assert!(matches!(
            message("select eevee"),
            Command::SelectAsset(name) if name == "eevee"
        ));
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_script("cube\n\nlayer up\n").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Usage {
                line: 3,
                usage: "layer N"
            }
        );
        let err = parse_script("jump 1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unknown command `jump`");
        assert!(parse_script("place 1 2").is_err());
        assert!(parse_script("save now").is_err());
    }
}
