//! Text commands for adjusting a running scene, one per line, e.g. `hertz 5` or `pause`.
//!
//! Argument text is kept verbatim and parsed by the setter it is routed to, so malformed numbers
//! are reported by the setter rather than here.

/// A parameter change requested from outside the tick loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Hertz(String),
    Amplitude(String),
    /// Static size of obstacle 1 or 2.
    ObstacleSize(usize, String),
    Pause,
    Resume,
    ChangeScale(bool),
    ShowAudioFile(bool),
}

/// Parse one command line. Returns `None` for unknown commands or a missing argument.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (name, argument) = match line.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, Some(argument.trim().to_string())),
        None => (line, None),
    };

    let command = match (name, argument) {
        ("hertz", Some(text)) => Command::Hertz(text),
        ("amplitude", Some(text)) => Command::Amplitude(text),
        ("size1", Some(text)) => Command::ObstacleSize(1, text),
        ("size2", Some(text)) => Command::ObstacleSize(2, text),
        ("pause", None) => Command::Pause,
        ("resume", None) => Command::Resume,
        ("scale", Some(flag)) => Command::ChangeScale(parse_flag(&flag)?),
        ("audio", Some(flag)) => Command::ShowAudioFile(parse_flag(&flag)?),
        _ => return None,
    };

    Some(command)
}

fn parse_flag(flag: &str) -> Option<bool> {
    match flag {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}
