// The terminal emulator's command loop, minus the rendering. Each call to
// `execute` takes one typed line and produces the transcript lines to append
// plus at most one side effect for the embedding UI to act on.

use tracing::instrument;

use crate::commands::{parse_command, Command};
use crate::errors::{TermfsError, TermfsErrorType};
use crate::fsystem::{FileSystem, FsNode};
use crate::session::Session;

/// One line of terminal transcript. Errors keep their kind so the UI can
/// style a missing path differently from a type mismatch.
#[derive(Debug, Clone, PartialEq)]
pub enum TermLine {
    /// An echoed command, rendered behind the prompt.
    Command(String),
    Output(String),
    Error(TermfsError),
}

/// Side effects the embedding UI must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum TermEvent {
    /// Route the browser to a project page.
    Navigate(String),
    /// Start the bug minigame.
    LaunchGame,
    /// Wipe the rendered transcript.
    ClearScreen,
    /// Tear the terminal down.
    Exit,
}

/// Result of executing one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub lines: Vec<TermLine>,
    pub event: Option<TermEvent>,
}

impl Execution {
    fn empty() -> Execution {
        Execution {
            lines: Vec::new(),
            event: None,
        }
    }
}

pub struct Terminal {
    fs: FileSystem,
    session: Session,
}

impl Terminal {
    pub fn new(fs: FileSystem) -> Terminal {
        Terminal {
            fs,
            session: Session::new(),
        }
    }

    /// Resume a terminal from persisted session state.
    pub fn with_session(fs: FileSystem, session: Session) -> Terminal {
        Terminal { fs, session }
    }

    pub fn filesystem(&self) -> &FileSystem {
        &self.fs
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The prompt text: the current path, `/`-joined.
    pub fn prompt(&self) -> String {
        self.session.path.join("/")
    }

    /// Execute one typed line. Blank input produces nothing; everything else
    /// is echoed into the transcript and recorded in history first.
    #[instrument(skip(self))]
    pub fn execute(&mut self, input: &str) -> Execution {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Execution::empty();
        }

        let mut execution = Execution::empty();
        execution.lines.push(TermLine::Command(trimmed.to_string()));
        self.session.push_history(trimmed);

        let command = match parse_command(trimmed) {
            Ok(command) => command,
            Err(e) => {
                execution.lines.push(TermLine::Error(e));
                return execution;
            }
        };

        match command {
            Command::Pwd => self.handle_pwd(&mut execution),
            Command::Ls(path) => self.handle_ls(&mut execution, path.as_deref()),
            Command::Cd(path) => self.handle_cd(&mut execution, path.as_deref()),
            Command::Cat(path) => self.handle_cat(&mut execution, &path),
            Command::Open(path) => {
                if !self.file_navigation(&mut execution, &path) {
                    execution.lines.push(TermLine::Error(TermfsError::new(
                        TermfsErrorType::NotFound,
                        format!("nano: {}: No such file or directory", path),
                    )));
                }
            }
            Command::Launch(word) => {
                if !self.file_navigation(&mut execution, &word) {
                    execution.lines.push(TermLine::Error(TermfsError::new(
                        TermfsErrorType::NotFound,
                        format!("command not found: {}", word),
                    )));
                }
            }
            Command::Clear => execution.event = Some(TermEvent::ClearScreen),
            Command::Help => self.handle_help(&mut execution),
            Command::Quit => {
                execution.lines.push(TermLine::Output("Goodbye!".to_string()));
                execution.event = Some(TermEvent::Exit);
            }
        }
        execution
    }

    fn handle_pwd(&self, execution: &mut Execution) {
        execution
            .lines
            .push(TermLine::Output(format!("/{}", self.session.path.join("/"))));
    }

    fn handle_ls(&self, execution: &mut Execution, path: Option<&str>) {
        let target = match path {
            Some(p) => match self.fs.resolve_path(&self.session.path, p) {
                Some(resolved) => resolved,
                None => {
                    execution.lines.push(TermLine::Error(TermfsError::new(
                        TermfsErrorType::NotFound,
                        format!("ls: cannot access '{}': No such file or directory", p),
                    )));
                    return;
                }
            },
            None => self.session.path.clone(),
        };

        let items = self.fs.list(&target);
        let output = items
            .iter()
            .map(|item| item.display_name())
            .collect::<Vec<String>>()
            .join("  ");
        execution.lines.push(TermLine::Output(output));
    }

    fn handle_cd(&mut self, execution: &mut Execution, path: Option<&str>) {
        let path = match path {
            Some(p) => p,
            None => {
                self.session.go_home();
                return;
            }
        };

        let resolved = match self.fs.resolve_path(&self.session.path, path) {
            Some(resolved) => resolved,
            None => {
                execution.lines.push(TermLine::Error(TermfsError::new(
                    TermfsErrorType::NotFound,
                    format!("cd: no such file or directory: {}", path),
                )));
                return;
            }
        };

        match self.fs.get_node(&resolved) {
            Some(FsNode::File(_)) => {
                // A project file is a page, not a directory. Open it.
                let url = self.fs.get_node(&resolved).and_then(|n| n.project_url());
                match url {
                    Some(url) => {
                        execution.lines.push(TermLine::Output(format!(
                            "cd: '{}' is a project file, opening...",
                            path
                        )));
                        execution.event = Some(TermEvent::Navigate(url));
                    }
                    None => {
                        execution.lines.push(TermLine::Error(TermfsError::new(
                            TermfsErrorType::NotADirectory,
                            format!("cd: not a directory: {}", path),
                        )));
                    }
                }
            }
            Some(FsNode::Executable(e)) => {
                execution
                    .lines
                    .push(TermLine::Output(format!("Launching {}...", e.name)));
                execution.event = Some(TermEvent::LaunchGame);
            }
            Some(FsNode::Directory(_)) => self.session.path = resolved,
            None => {
                execution.lines.push(TermLine::Error(TermfsError::new(
                    TermfsErrorType::NotFound,
                    format!("cd: no such file or directory: {}", path),
                )));
            }
        }
    }

    fn handle_cat(&self, execution: &mut Execution, path: &str) {
        let clean = path.strip_prefix("./").unwrap_or(path);
        let node = self
            .fs
            .resolve_path(&self.session.path, clean)
            .and_then(|resolved| self.fs.get_node(&resolved).cloned());

        let node = match node {
            Some(node) => node,
            None => {
                execution.lines.push(TermLine::Error(TermfsError::new(
                    TermfsErrorType::NotFound,
                    format!("cat: {}: No such file or directory", path),
                )));
                return;
            }
        };

        match node {
            FsNode::Directory(_) => {
                execution.lines.push(TermLine::Error(TermfsError::new(
                    TermfsErrorType::IsADirectory,
                    format!("cat: {}: Is a directory", path),
                )));
            }
            FsNode::Executable(e) => {
                execution
                    .lines
                    .push(TermLine::Output(format!("{}: No metadata available", e.name)));
            }
            FsNode::File(f) => {
                let project = &f.metadata;
                let mut lines = vec![
                    format!("File: {}", project.name),
                    "Type: Project".to_string(),
                    String::new(),
                ];
                if let Some(description) = &project.description {
                    lines.push("Description:".to_string());
                    lines.push(description.clone());
                    lines.push(String::new());
                }
                if let Some(status) = &project.status {
                    lines.push(format!("Status: {}", status));
                }
                if !project.tech_stack.is_empty() {
                    lines.push(format!("Tech Stack: {}", project.tech_stack.join(", ")));
                }
                if let Some(github_url) = &project.github_url {
                    lines.push(format!("GitHub: {}", github_url));
                }
                if let Some(demo_url) = &project.demo_url {
                    lines.push(format!("Demo: {}", demo_url));
                }
                execution
                    .lines
                    .extend(lines.into_iter().map(TermLine::Output));
            }
        }
    }

    /// Try to treat `path` as an invocable file. Returns false when nothing
    /// navigable sits there, so the caller can fall back to its own error.
    fn file_navigation(&self, execution: &mut Execution, path: &str) -> bool {
        let clean = path.strip_prefix("./").unwrap_or(path);
        let resolved = match self.fs.resolve_path(&self.session.path, clean) {
            Some(resolved) => resolved,
            None => return false,
        };
        match self.fs.get_node(&resolved) {
            Some(node @ FsNode::File(_)) => match node.project_url() {
                Some(url) => {
                    execution
                        .lines
                        .push(TermLine::Output(format!("Opening {}...", node.name())));
                    execution.event = Some(TermEvent::Navigate(url));
                    true
                }
                None => false,
            },
            Some(FsNode::Executable(e)) => {
                execution
                    .lines
                    .push(TermLine::Output(format!("Launching {}...", e.name)));
                execution.event = Some(TermEvent::LaunchGame);
                true
            }
            _ => false,
        }
    }

    fn handle_help(&self, execution: &mut Execution) {
        let help_text = [
            "Available commands:",
            "  pwd              - print working directory",
            "  ls [path]        - list directory contents",
            "  cd [path]        - change directory",
            "  cd ..            - go up one directory",
            "  cat [file]       - display project information",
            "  clear            - clear terminal",
            "  quit             - exit",
            "  help             - show this help",
            "",
            "To open the project page:",
            "  cd [filename]       - open project",
            "  cd [path to filename]     - open project (relative)",
            "",
            "Use arrow keys to navigate command history",
            "Use Tab key for auto-completion",
        ];
        execution
            .lines
            .extend(help_text.iter().map(|l| TermLine::Output(l.to_string())));
    }
}
