//! File-tree grouping for display.
//!
//! Root-level files come first in file order, then one group per
//! directory, directories sorted by name, children in file order.

use atelier_types::builder::GeneratedFile;

/// One display row in the file tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Full path, used for selection.
    pub path: String,
    /// Display name (path for root files, basename inside a folder).
    pub name: String,
    pub selected: bool,
}

/// A group of files: the root group (`dir: None`) or one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeGroup {
    pub dir: Option<String>,
    pub entries: Vec<TreeEntry>,
}

/// Group files for rendering.
pub fn group(files: &[GeneratedFile], selected: Option<&str>) -> Vec<TreeGroup> {
    let mut root = Vec::new();
    let mut dirs: Vec<(String, Vec<TreeEntry>)> = Vec::new();

    for file in files {
        match file.path.rsplit_once('/') {
            None => root.push(TreeEntry {
                path: file.path.clone(),
                name: file.path.clone(),
                selected: selected == Some(file.path.as_str()),
            }),
            Some((dir, name)) => {
                let entry = TreeEntry {
                    path: file.path.clone(),
                    name: name.to_string(),
                    selected: selected == Some(file.path.as_str()),
                };
                match dirs.iter_mut().find(|(d, _)| d == dir) {
                    Some((_, entries)) => entries.push(entry),
                    None => dirs.push((dir.to_string(), vec![entry])),
                }
            }
        }
    }

    dirs.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut groups = Vec::new();
    if !root.is_empty() {
        groups.push(TreeGroup {
            dir: None,
            entries: root,
        });
    }
    groups.extend(dirs.into_iter().map(|(dir, entries)| TreeGroup {
        dir: Some(dir),
        entries,
    }));
    groups
}
