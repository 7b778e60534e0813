//! In-memory virtual filesystem and terminal emulation engine for the
//! portfolio site's terminal easter egg.
//!
//! The view layer supplies the current folder and project lists (fetched as
//! JSON from its REST API), builds a [`FileSystem`], and drives a
//! [`Terminal`] with the lines the visitor types. Everything here is
//! synchronous and in-memory: the tree is rebuilt wholesale whenever the
//! lists change, and the only outputs are transcript lines and navigation
//! events.

mod commands;
mod completion;
mod errors;
mod fsystem;
mod records;
mod session;
mod terminal;

pub use commands::{parse_command, Command, COMMAND_NAMES};
pub use completion::{common_prefix, complete};
pub use errors::{Result, TermfsError, TermfsErrorType};
pub use fsystem::{Directory, Executable, FileSystem, FsNode, ProjectFile, HOME, PLAY_EXECUTABLE};
pub use records::{Folder, Project};
pub use session::Session;
pub use terminal::{Execution, TermEvent, TermLine, Terminal};
