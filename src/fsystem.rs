// Definition of the virtual file system backing the terminal. The tree is
// entirely synthetic: it is rebuilt wholesale from the folder and project
// lists and never mutated afterwards, so a FileSystem can be shared by
// read-only reference without synchronization.

use tracing::instrument;

use crate::errors::{Result, TermfsError, TermfsErrorType};
use crate::records::{Folder, Project};

/// The home directory, conventional starting point for relative resolution
/// and the `~` shorthand.
pub const HOME: [&str; 2] = ["usr", "maxim"];

/// Name of the fixed executable entry at the filesystem root.
pub const PLAY_EXECUTABLE: &str = "play.exe";

const PROJECTS_DIR: &str = "projects";

#[derive(Debug, Clone, PartialEq)]
pub enum FsNode {
    Directory(Directory),
    File(ProjectFile),
    Executable(Executable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    name: String,
    // Insertion order is the listing order. Directories are small enough
    // that linear child lookup beats keeping a separate index.
    children: Vec<FsNode>,
}

/// A project leaf. Carries the full record so the terminal can render it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectFile {
    pub slug: String,
    pub folder_slug: Option<String>,
    pub metadata: Project,
}

/// A decorative leaf with no metadata. Invoking it triggers a side effect
/// (the bug minigame) instead of navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Executable {
    pub name: String,
}

impl FsNode {
    pub fn name(&self) -> &str {
        match self {
            FsNode::Directory(d) => &d.name,
            FsNode::File(f) => &f.slug,
            FsNode::Executable(e) => &e.name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FsNode::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self, FsNode::File(_))
    }

    /// The display name as it appears in a listing: directories get a
    /// trailing slash.
    pub fn display_name(&self) -> String {
        match self {
            FsNode::Directory(d) => format!("{}/", d.name),
            _ => self.name().to_string(),
        }
    }

    /// Navigation URL for a project file. Directories and executables have
    /// no page to open.
    pub fn project_url(&self) -> Option<String> {
        match self {
            FsNode::File(f) => match &f.folder_slug {
                Some(folder) => Some(format!("/projects/{}/{}", folder, f.slug)),
                None => Some(format!("/projects/{}", f.slug)),
            },
            _ => None,
        }
    }
}

impl Directory {
    fn new(name: &str) -> Directory {
        Directory {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&FsNode> {
        self.children.iter().find(|c| c.name() == name)
    }

    fn push(&mut self, node: FsNode) -> Result<()> {
        if self.child(node.name()).is_some() {
            return Err(TermfsError::new(
                TermfsErrorType::DuplicateEntry,
                format!("`{}` appears more than once in `{}`", node.name(), self.name),
            ));
        }
        self.children.push(node);
        Ok(())
    }

    fn get(&self, path: &[&str]) -> Option<&FsNode> {
        let child = self.child(path[0])?;
        if path.len() == 1 {
            return Some(child);
        }
        match child {
            FsNode::Directory(d) => d.get(&path[1..]),
            // A leaf with path segments left over means the caller tried to
            // treat a file as a directory.
            _ => None,
        }
    }
}

/// The resolver itself. Built once per page load from the current lists and
/// discarded when they change.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSystem {
    root: FsNode,
}

impl FileSystem {
    /// Build the synthetic tree. The fixed skeleton `usr/maxim/projects`
    /// always exists, even with empty input lists.
    ///
    /// Unlike lookup, construction is fallible: duplicate slugs within one
    /// scope and projects referencing a nonexistent `folder_id` are rejected
    /// loudly rather than silently shadowing each other.
    #[instrument(skip_all, fields(projects = projects.len(), folders = folders.len()))]
    pub fn build(projects: &[Project], folders: &[Folder]) -> Result<FileSystem> {
        let mut projects_dir = Directory::new(PROJECTS_DIR);
        for folder in folders {
            let mut folder_dir = Directory::new(&folder.slug);
            for project in projects.iter().filter(|p| p.folder_id.as_deref() == Some(folder.id.as_str())) {
                folder_dir.push(FsNode::File(ProjectFile {
                    slug: project.slug.clone(),
                    folder_slug: Some(folder.slug.clone()),
                    metadata: project.clone(),
                }))?;
            }
            projects_dir.push(FsNode::Directory(folder_dir))?;
        }

        let mut home = Directory::new(HOME[1]);
        home.push(FsNode::Directory(projects_dir))?;
        for project in projects.iter().filter(|p| p.folder_id.is_none()) {
            home.push(FsNode::File(ProjectFile {
                slug: project.slug.clone(),
                folder_slug: None,
                metadata: project.clone(),
            }))?;
        }

        let folder_ids: Vec<&str> = folders.iter().map(|f| f.id.as_str()).collect();
        for project in projects {
            if let Some(id) = &project.folder_id {
                if !folder_ids.contains(&id.as_str()) {
                    tracing::error!("Project {} references unknown folder {}", project.slug, id);
                    return Err(TermfsError::new(
                        TermfsErrorType::InvalidInput,
                        format!("Project `{}` references unknown folder `{}`", project.slug, id),
                    ));
                }
            }
        }

        let mut usr = Directory::new(HOME[0]);
        usr.push(FsNode::Directory(home))?;

        let mut root = Directory::new("root");
        root.push(FsNode::Directory(usr))?;
        root.push(FsNode::Executable(Executable {
            name: PLAY_EXECUTABLE.to_string(),
        }))?;

        tracing::debug!("Built virtual filesystem");
        Ok(FileSystem {
            root: FsNode::Directory(root),
        })
    }

    /// Look up the node at an already-canonical path. The empty path is the
    /// synthetic root.
    pub fn get_node<S: AsRef<str>>(&self, path: &[S]) -> Option<&FsNode> {
        if path.is_empty() {
            return Some(&self.root);
        }
        let parts: Vec<&str> = path.iter().map(|s| s.as_ref()).collect();
        match &self.root {
            FsNode::Directory(d) => d.get(&parts),
            _ => None,
        }
    }

    pub fn exists<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get_node(path).is_some()
    }

    pub fn is_file<S: AsRef<str>>(&self, path: &[S]) -> bool {
        matches!(self.get_node(path), Some(FsNode::File(_)))
    }

    /// Immediate children of the directory at `path`, in construction order.
    /// Anything that is not a known directory lists as empty.
    pub fn list<S: AsRef<str>>(&self, path: &[S]) -> Vec<&FsNode> {
        match self.get_node(path) {
            Some(FsNode::Directory(d)) => d.children.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Shell-like path resolution. `~/` is rewritten against the fixed home,
    /// a leading `/` makes the path absolute, and anything else is resolved
    /// against `current` with `.` as a no-op and `..` popping one segment.
    /// `..` clamps at the filesystem root rather than underflowing.
    ///
    /// A miss is an expected outcome (a typo in the terminal), so it comes
    /// back as `None` rather than an error.
    #[instrument(skip(self, current))]
    pub fn resolve_path<S: AsRef<str>>(&self, current: &[S], target: &str) -> Option<Vec<String>> {
        let mut base: Vec<String> = current.iter().map(|s| s.as_ref().to_string()).collect();
        let mut target = target;

        if target == "~" || target == "~/" {
            return Some(HOME.iter().map(|s| s.to_string()).collect());
        }
        if let Some(rest) = target.strip_prefix("~/") {
            base = HOME.iter().map(|s| s.to_string()).collect();
            target = rest;
        }

        if let Some(rest) = target.strip_prefix('/') {
            let parts: Vec<String> = rest
                .split('/')
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string())
                .collect();
            if self.exists(&parts) {
                return Some(parts);
            }
            tracing::debug!("Absolute path does not exist");
            return None;
        }

        for part in target.split('/').filter(|p| !p.is_empty()) {
            match part {
                "." => (),
                ".." => {
                    base.pop();
                }
                other => base.push(other.to_string()),
            }
        }

        if self.exists(&base) {
            Some(base)
        } else {
            tracing::debug!("Resolved candidate does not exist");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str, slug: &str) -> Folder {
        Folder {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    fn project(id: &str, name: &str, slug: &str, folder_id: Option<&str>) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            folder_id: folder_id.map(|f| f.to_string()),
            description: None,
            status: None,
            tech_stack: Vec::new(),
            github_url: None,
            demo_url: None,
        }
    }

    fn sample() -> FileSystem {
        let folders = vec![folder("f1", "Web", "web")];
        let projects = vec![
            project("p1", "Site", "site", Some("f1")),
            project("p2", "Tool", "tool", None),
        ];
        FileSystem::build(&projects, &folders).unwrap()
    }

    #[test]
    fn skeleton_exists_with_empty_input() {
        let fs = FileSystem::build(&[], &[]).unwrap();
        assert!(fs.exists(&["usr"]));
        assert!(fs.exists(&["usr", "maxim"]));
        assert!(fs.exists(&["usr", "maxim", "projects"]));
        assert!(fs.list(&["usr", "maxim", "projects"]).is_empty());
    }

    #[test]
    fn root_contains_usr_and_play() {
        let fs = sample();
        let names: Vec<&str> = fs.list::<&str>(&[]).iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["usr", PLAY_EXECUTABLE]);
    }

    #[test]
    fn foldered_project_round_trip() {
        let fs = sample();
        let resolved = fs
            .resolve_path::<&str>(&[], "/usr/maxim/projects/web/site")
            .unwrap();
        assert_eq!(resolved, vec!["usr", "maxim", "projects", "web", "site"]);
        match fs.get_node(&resolved).unwrap() {
            FsNode::File(f) => assert_eq!(f.metadata.id, "p1"),
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn root_level_project_reachable() {
        let fs = sample();
        let resolved = fs.resolve_path::<&str>(&[], "/usr/maxim/tool").unwrap();
        assert!(fs.is_file(&resolved));
    }

    #[test]
    fn home_shorthand_equivalence() {
        let fs = sample();
        let via_tilde = fs.resolve_path(&["usr", "maxim", "projects"], "~/projects");
        let via_relative = fs.resolve_path(&["usr", "maxim"], "projects");
        assert_eq!(via_tilde, via_relative);
        assert_eq!(
            fs.resolve_path::<&str>(&[], "~/"),
            Some(vec!["usr".to_string(), "maxim".to_string()])
        );
    }

    #[test]
    fn dot_segments_are_noops() {
        let fs = sample();
        assert_eq!(
            fs.resolve_path(&["usr", "maxim"], "./././tool"),
            fs.resolve_path(&["usr", "maxim"], "tool")
        );
    }

    #[test]
    fn parent_traversal_clamps_at_root() {
        let fs = sample();
        // One level up from home is a real directory in this variant.
        assert_eq!(
            fs.resolve_path(&["usr", "maxim"], ".."),
            Some(vec!["usr".to_string()])
        );
        assert_eq!(fs.resolve_path(&["usr", "maxim"], "../.."), Some(vec![]));
        // Popping past the root clamps instead of underflowing.
        assert_eq!(fs.resolve_path(&["usr", "maxim"], "../../../.."), Some(vec![]));
        assert_eq!(
            fs.resolve_path(&["usr", "maxim"], "../../usr/maxim"),
            Some(vec!["usr".to_string(), "maxim".to_string()])
        );
    }

    #[test]
    fn listing_folders_only_under_projects() {
        let fs = sample();
        let listing = fs.list(&["usr", "maxim", "projects"]);
        assert_eq!(listing.len(), 1);
        assert!(listing[0].is_directory());
        assert_eq!(listing[0].name(), "web");
    }

    #[test]
    fn unknown_path_is_none() {
        let fs = sample();
        assert_eq!(
            fs.resolve_path::<&str>(&[], "/usr/maxim/projects/doesnotexist"),
            None
        );
        assert_eq!(fs.resolve_path(&["usr", "maxim"], "nope/deeper"), None);
    }

    #[test]
    fn file_is_not_a_directory() {
        let fs = sample();
        // Listing a file is empty, and descending through it misses.
        assert!(fs.list(&["usr", "maxim", "tool"]).is_empty());
        assert_eq!(fs.resolve_path(&["usr", "maxim"], "tool/inner"), None);
    }

    #[test]
    fn project_urls() {
        let fs = sample();
        let site = fs.get_node(&["usr", "maxim", "projects", "web", "site"]).unwrap();
        assert_eq!(site.project_url(), Some("/projects/web/site".to_string()));
        let tool = fs.get_node(&["usr", "maxim", "tool"]).unwrap();
        assert_eq!(tool.project_url(), Some("/projects/tool".to_string()));
        let dir = fs.get_node(&["usr", "maxim", "projects"]).unwrap();
        assert_eq!(dir.project_url(), None);
        let play = fs.get_node(&[PLAY_EXECUTABLE]).unwrap();
        assert_eq!(play.project_url(), None);
    }

    #[test]
    fn duplicate_slug_fails_construction() {
        let folders = vec![folder("f1", "Web", "web"), folder("f2", "Also Web", "web")];
        let err = FileSystem::build(&[], &folders).unwrap_err();
        assert_eq!(err.error_type, TermfsErrorType::DuplicateEntry);

        let projects = vec![
            project("p1", "Site", "site", Some("f1")),
            project("p2", "Site Again", "site", Some("f1")),
        ];
        let err = FileSystem::build(&projects, &[folder("f1", "Web", "web")]).unwrap_err();
        assert_eq!(err.error_type, TermfsErrorType::DuplicateEntry);
    }

    #[test]
    fn duplicate_slug_across_scopes_is_fine() {
        let folders = vec![folder("f1", "Web", "web"), folder("f2", "Games", "games")];
        let projects = vec![
            project("p1", "Site", "site", Some("f1")),
            project("p2", "Other Site", "site", Some("f2")),
            project("p3", "Third Site", "site", None),
        ];
        assert!(FileSystem::build(&projects, &folders).is_ok());
    }

    #[test]
    fn dangling_folder_id_fails_construction() {
        let projects = vec![project("p1", "Site", "site", Some("ghost"))];
        let err = FileSystem::build(&projects, &[]).unwrap_err();
        assert_eq!(err.error_type, TermfsErrorType::InvalidInput);
    }

    #[test]
    fn top_level_slug_colliding_with_skeleton_fails() {
        let projects = vec![project("p1", "Projects", "projects", None)];
        let err = FileSystem::build(&projects, &[]).unwrap_err();
        assert_eq!(err.error_type, TermfsErrorType::DuplicateEntry);
    }

    #[test]
    fn get_node_on_empty_path_is_root() {
        let fs = sample();
        let root = fs.get_node::<&str>(&[]).unwrap();
        assert!(root.is_directory());
    }
}
