// Tab completion for the terminal input line. The first word completes
// against the command table, later words against directory contents.

use crate::commands::COMMAND_NAMES;
use crate::fsystem::FileSystem;

/// Candidate completions for the input as typed so far. Candidates are full
/// replacements for the last word; directories come back with a trailing `/`.
pub fn complete(fs: &FileSystem, current_path: &[String], input: &str) -> Vec<String> {
    let parts: Vec<&str> = input.split(' ').collect();
    let last = parts.last().copied().unwrap_or("");

    if parts.len() == 1 {
        return COMMAND_NAMES
            .iter()
            .filter(|c| c.starts_with(last))
            .map(|c| c.to_string())
            .collect();
    }

    // Path completion: resolve everything before the final separator and
    // list that directory.
    if let Some((dir_part, _)) = last.rsplit_once('/') {
        let prefix = format!("{}/", dir_part);
        if let Some(resolved) = fs.resolve_path(current_path, dir_part) {
            return fs
                .list(&resolved)
                .iter()
                .map(|item| format!("{}{}", prefix, item.display_name()))
                .filter(|name| name.starts_with(last))
                .collect();
        }
        return Vec::new();
    }

    fs.list(current_path)
        .iter()
        .map(|item| item.display_name())
        .filter(|name| name.starts_with(last))
        .collect()
}

/// Longest shared prefix of all candidates, used to extend the input when
/// more than one completion matches.
pub fn common_prefix(options: &[String]) -> String {
    let mut iter = options.iter();
    let first = match iter.next() {
        Some(first) => first.clone(),
        None => return String::new(),
    };
    iter.fold(first, |prefix, current| {
        prefix
            .chars()
            .zip(current.chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a)
            .collect()
    })
}
