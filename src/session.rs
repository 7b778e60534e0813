// Navigation state for one terminal session. The engine is stateless across
// page loads; whatever layer embeds it persists this struct (the site keeps
// it in sessionStorage) and hands it back on the next construction.

use serde::{Deserialize, Serialize};

use crate::fsystem::HOME;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Current working directory as canonical segments.
    pub path: Vec<String>,
    /// Every executed command, oldest first.
    pub history: Vec<String>,
    /// Arrow-key recall position. Not persisted; recall restarts from the
    /// newest entry after a reload.
    #[serde(skip)]
    cursor: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            path: HOME.iter().map(|s| s.to_string()).collect(),
            history: Vec::new(),
            cursor: None,
        }
    }
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn push_history(&mut self, command: &str) {
        self.history.push(command.to_string());
        self.cursor = None;
    }

    /// Step backwards through history (up arrow). Sticks at the oldest entry.
    pub fn recall_prev(&mut self) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => self.history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(next);
        Some(&self.history[next])
    }

    /// Step forwards through history (down arrow). Returns `None` once the
    /// cursor moves past the newest entry, which the caller treats as "clear
    /// the input line".
    pub fn recall_next(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(i) if i + 1 < self.history.len() => {
                self.cursor = Some(i + 1);
                Some(&self.history[i + 1])
            }
            Some(_) => {
                self.cursor = None;
                None
            }
        }
    }

    pub fn go_home(&mut self) {
        self.path = HOME.iter().map(|s| s.to_string()).collect();
    }
}
