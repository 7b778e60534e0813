// Input records for building the virtual filesystem. In the full site these
// arrive as JSON from `GET /api/folders` and `GET /api/projects`; the engine
// itself never talks to the network.

use serde::{Deserialize, Serialize};

/// A named bucket of projects. Folders are flat in this view; there are no
/// nested sub-folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A project leaf. `folder_id = None` places the project directly under the
/// home directory; otherwise it lives under the matching folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
}
