use crate::errors::{Result, TermfsError, TermfsErrorType};

/// Command names offered by the terminal, in help/completion order.
pub const COMMAND_NAMES: [&str; 8] = ["pwd", "ls", "cd", "clear", "help", "nano", "cat", "quit"];

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pwd,
    Ls(Option<String>),
    Cd(Option<String>),
    Cat(String),
    /// `nano <file>` opens the project page, same as invoking the file.
    Open(String),
    Clear,
    Help,
    Quit,
    /// Anything that is not a known command is tried as a file to invoke
    /// before being reported as `command not found`.
    Launch(String),
}

pub fn parse_command(input: &str) -> Result<Command> {
    let mut parts = input.split_whitespace();
    let name = match parts.next() {
        Some(name) => name,
        None => {
            return Err(TermfsError::new(
                TermfsErrorType::InvalidInput,
                "empty command".to_string(),
            ))
        }
    };
    let args: Vec<&str> = parts.collect();

    let cmd = match name {
        "pwd" => Command::Pwd,
        "ls" => Command::Ls(args.first().map(|a| a.to_string())),
        "cd" => Command::Cd(args.first().map(|a| a.to_string())),
        "cat" => match args.first() {
            Some(path) => Command::Cat(path.to_string()),
            None => {
                return Err(TermfsError::new(
                    TermfsErrorType::InvalidInput,
                    "cat: missing file operand".to_string(),
                ))
            }
        },
        "nano" => match args.first() {
            Some(path) => Command::Open(path.to_string()),
            None => {
                return Err(TermfsError::new(
                    TermfsErrorType::InvalidInput,
                    "nano: missing file operand".to_string(),
                ))
            }
        },
        "clear" => Command::Clear,
        "help" => Command::Help,
        "quit" => Command::Quit,
        other => Command::Launch(other.to_string()),
    };
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("pwd").unwrap(), Command::Pwd);
        assert_eq!(parse_command("ls").unwrap(), Command::Ls(None));
        assert_eq!(
            parse_command("ls projects").unwrap(),
            Command::Ls(Some("projects".to_string()))
        );
        assert_eq!(parse_command("cd").unwrap(), Command::Cd(None));
        assert_eq!(
            parse_command("cd ../web").unwrap(),
            Command::Cd(Some("../web".to_string()))
        );
        assert_eq!(
            parse_command("cat site").unwrap(),
            Command::Cat("site".to_string())
        );
        assert_eq!(
            parse_command("nano site").unwrap(),
            Command::Open("site".to_string())
        );
        assert_eq!(parse_command("clear").unwrap(), Command::Clear);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn missing_operands_are_errors() {
        let err = parse_command("cat").unwrap_err();
        assert_eq!(err.error_type, TermfsErrorType::InvalidInput);
        assert_eq!(err.message, "cat: missing file operand");

        let err = parse_command("nano").unwrap_err();
        assert_eq!(err.message, "nano: missing file operand");
    }

    #[test]
    fn unknown_word_falls_through_to_launch() {
        assert_eq!(
            parse_command("site extra args").unwrap(),
            Command::Launch("site".to_string())
        );
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        assert_eq!(
            parse_command("  ls   projects  ").unwrap(),
            Command::Ls(Some("projects".to_string()))
        );
    }
}
