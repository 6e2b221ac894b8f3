//! Terminal input grammar: one command per line.

use memory_lane_core::surface::Overlay;
use memory_lane_navigation::domain::commands::Direction;
use thiserror::Error;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A navigation arrow.
    Navigate(Direction),
    /// A touch start/end pair.
    Swipe {
        /// Horizontal touch start position.
        start_x: f64,
        /// Horizontal touch end position.
        end_x: f64,
    },
    /// A hotspot click.
    Hotspot(String),
    /// The solve button of a slide, zero-based.
    Solve(usize),
    /// Enter in the answer input, with the text as typed.
    Answer(String),
    /// The close control of an overlay.
    Close(Overlay),
    /// A click on an overlay's background.
    Background(Overlay),
    /// The finale entry control.
    Finale,
    /// The intro entry control.
    Begin,
    /// Print the current state.
    State,
    /// Exit.
    Quit,
}

/// Reasons an input line is not understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command needs an argument that is missing.
    #[error("{command} needs {argument}")]
    MissingArgument {
        /// The command word.
        command: &'static str,
        /// What is missing.
        argument: &'static str,
    },

    /// A numeric argument did not parse.
    #[error("not a number: {0}")]
    InvalidNumber(String),

    /// Slide numbers start at 1.
    #[error("slide numbers start at 1")]
    SlideZero,

    /// The overlay name is unknown.
    #[error("unknown overlay: {0}")]
    UnknownOverlay(String),
}

/// Parses one input line. Blank lines yield `None`.
///
/// The text of `answer` is everything after the whitespace character that
/// ends the command word, kept verbatim so the answer check sees exactly what was typed.
///
/// # Errors
///
/// Returns an `InputError` describing why the line is not understood.
pub fn parse_line(line: &str) -> Result<Option<Input>, InputError> {
    let line = line.trim_start();
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (command, rest) = match line.find(char::is_whitespace) {
        Some(at) => {
            let separator = line[at..].chars().next().map_or(1, char::len_utf8);
            (&line[..at], &line[at + separator..])
        }
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let input = match command {
        "next" | "right" => Input::Navigate(Direction::Next),
        "prev" | "left" => Input::Navigate(Direction::Previous),
        "swipe" => {
            let start_x = number(args.next(), "swipe", "a start position")?;
            let end_x = number(args.next(), "swipe", "an end position")?;
            Input::Swipe { start_x, end_x }
        }
        "hotspot" => Input::Hotspot(
            args.next()
                .ok_or(InputError::MissingArgument {
                    command: "hotspot",
                    argument: "a hotspot id",
                })?
                .to_owned(),
        ),
        "solve" => {
            let raw = args.next().ok_or(InputError::MissingArgument {
                command: "solve",
                argument: "a slide number",
            })?;
            let slide: usize = raw
                .parse()
                .map_err(|_| InputError::InvalidNumber(raw.to_owned()))?;
            Input::Solve(slide.checked_sub(1).ok_or(InputError::SlideZero)?)
        }
        "answer" => Input::Answer(rest.to_owned()),
        "close" => Input::Close(overlay(args.next(), "close")?),
        "bg" => Input::Background(overlay(args.next(), "bg")?),
        "finale" => Input::Finale,
        "begin" => Input::Begin,
        "state" => Input::State,
        "quit" | "exit" => Input::Quit,
        other => return Err(InputError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(input))
}

fn number(
    raw: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<f64, InputError> {
    let raw = raw.ok_or(InputError::MissingArgument { command, argument })?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::InvalidNumber(raw.to_owned()))
}

fn overlay(raw: Option<&str>, command: &'static str) -> Result<Overlay, InputError> {
    let raw = raw.ok_or(InputError::MissingArgument {
        command,
        argument: "an overlay name",
    })?;
    Overlay::from_name(raw).ok_or_else(|| InputError::UnknownOverlay(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Input {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_arrow_aliases() {
        assert_eq!(parse("next"), Input::Navigate(Direction::Next));
        assert_eq!(parse("right"), Input::Navigate(Direction::Next));
        assert_eq!(parse("prev"), Input::Navigate(Direction::Previous));
        assert_eq!(parse("  left "), Input::Navigate(Direction::Previous));
    }

    #[test]
    fn test_blank_line_is_nothing() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn test_swipe_takes_two_positions() {
        assert_eq!(
            parse("swipe 300 120.5"),
            Input::Swipe {
                start_x: 300.0,
                end_x: 120.5
            }
        );
        assert_eq!(
            parse_line("swipe 300"),
            Err(InputError::MissingArgument {
                command: "swipe",
                argument: "an end position"
            })
        );
        assert_eq!(
            parse_line("swipe 1 NaN"),
            Err(InputError::InvalidNumber("NaN".to_owned()))
        );
    }

    #[test]
    fn test_solve_is_one_based() {
        assert_eq!(parse("solve 1"), Input::Solve(0));
        assert_eq!(parse("solve 3"), Input::Solve(2));
        assert_eq!(parse_line("solve 0"), Err(InputError::SlideZero));
        assert_eq!(
            parse_line("solve two"),
            Err(InputError::InvalidNumber("two".to_owned()))
        );
    }

    #[test]
    fn test_answer_keeps_text_verbatim() {
        assert_eq!(parse("answer  2163 "), Input::Answer(" 2163 ".to_owned()));
        assert_eq!(parse("answer 超大優惠"), Input::Answer("超大優惠".to_owned()));
        assert_eq!(parse("answer"), Input::Answer(String::new()));
    }

    #[test]
    fn test_any_whitespace_ends_the_command_word() {
        assert_eq!(parse("answer\t2163"), Input::Answer("2163".to_owned()));
        assert_eq!(parse("answer\t 2163"), Input::Answer(" 2163".to_owned()));
        assert_eq!(parse("solve\t2"), Input::Solve(1));
        assert_eq!(parse("close\u{3000}info"), Input::Close(Overlay::Info));
    }

    #[test]
    fn test_overlay_commands() {
        assert_eq!(parse("close info"), Input::Close(Overlay::Info));
        assert_eq!(parse("bg grand_finale"), Input::Background(Overlay::GrandFinale));
        assert_eq!(
            parse_line("close door"),
            Err(InputError::UnknownOverlay("door".to_owned()))
        );
    }

    #[test]
    fn test_bare_commands() {
        assert_eq!(parse("hotspot diary-cover"), Input::Hotspot("diary-cover".to_owned()));
        assert_eq!(parse("finale"), Input::Finale);
        assert_eq!(parse("begin"), Input::Begin);
        assert_eq!(parse("state"), Input::State);
        assert_eq!(parse("quit"), Input::Quit);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_line("dance"),
            Err(InputError::UnknownCommand("dance".to_owned()))
        );
    }
}
