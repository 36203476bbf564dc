use crate::error::Result;
use crate::item::{FileItem, ItemKind};
use byte_unit::{Byte, UnitType};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use log;
use serde::{Deserialize, Serialize};
use std::path::Component;
use std::time::SystemTime;

/// Rendering options for the visual directory tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeViewConfig {
    #[serde(default)]
    pub show_size: bool,
    #[serde(default)]
    pub show_last_modified: bool,
    #[serde(default)]
    pub show_char_count: bool,
    #[serde(default = "default_true")]
    pub include_files: bool,
    /// 0 means unlimited depth.
    #[serde(default)]
    pub max_depth: usize,
    /// Free-text annotations keyed by exact relative directory path.
    #[serde(default)]
    pub dir_context: IndexMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Default for TreeViewConfig {
    fn default() -> Self {
        Self {
            show_size: false,
            show_last_modified: false,
            show_char_count: false,
            include_files: true,
            max_depth: 0,
            dir_context: IndexMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub kind: ItemKind,
    pub children: Vec<TreeNode>,
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
    pub char_count: Option<usize>,
}

impl TreeNode {
    fn dir(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::Dir,
            children: Vec::new(),
            size: None,
            modified: None,
            char_count: None,
        }
    }

    fn file(name: &str, size: Option<u64>, modified: Option<SystemTime>) -> Self {
        Self {
            name: name.to_string(),
            kind: ItemKind::File,
            children: Vec::new(),
            size,
            modified,
            char_count: None,
        }
    }
}

/// Converts a flat, ordered set of relative file paths into a nested
/// directory tree and renders it as ASCII, independent of source origin.
pub struct FileTreeBuilder {
    config: TreeViewConfig,
}

impl Default for FileTreeBuilder {
    fn default() -> Self {
        Self::new(TreeViewConfig::default())
    }
}

impl FileTreeBuilder {
    pub fn new(config: TreeViewConfig) -> Self {
        Self { config }
    }

    /// Build the node graph and render it in one step.
    pub fn build_tree(&self, items: &[FileItem]) -> Result<String> {
        let nodes = self.build_nodes(items);
        let mut out = String::new();
        self.render_level(&nodes, "", "", 1, &mut out);
        Ok(out)
    }

    pub fn build_nodes(&self, items: &[FileItem]) -> Vec<TreeNode> {
        log::debug!("Building tree structure from {} item(s)...", items.len());
        let mut roots: Vec<TreeNode> = Vec::new();

        for item in items {
            let components: Vec<String> = item
                .relative_path()
                .components()
                .filter_map(|c| match c {
                    Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect();
            if components.is_empty() {
                continue;
            }

            let char_count = if self.config.show_char_count && item.is_file() {
                match item.contents() {
                    Ok(content) => Some(content.chars().count()),
                    Err(e) => {
                        log::warn!(
                            "Could not read {} for char count: {}",
                            item.relative_path().display(),
                            e
                        );
                        None
                    }
                }
            } else {
                None
            };

            Self::insert_node(&mut roots, &components, item, char_count);
        }

        roots
    }

    fn insert_node(
        level: &mut Vec<TreeNode>,
        components: &[String],
        item: &FileItem,
        char_count: Option<usize>,
    ) {
        let name = &components[0];
        let rest = &components[1..];
        let is_leaf = rest.is_empty();

        match level.binary_search_by(|node| node.name.as_str().cmp(name.as_str())) {
            Ok(index) => {
                if !is_leaf {
                    Self::insert_node(&mut level[index].children, rest, item, char_count);
                }
                // Duplicate leaf segments collapse into the existing node.
            }
            Err(insertion_point) => {
                let mut node = if is_leaf && item.is_file() {
                    let mut n = TreeNode::file(name, item.size(), item.modified());
                    n.char_count = char_count;
                    n
                } else {
                    TreeNode::dir(name)
                };
                if !is_leaf {
                    Self::insert_node(&mut node.children, rest, item, char_count);
                }
                level.insert(insertion_point, node);
            }
        }
    }

    fn render_level(
        &self,
        nodes: &[TreeNode],
        line_prefix: &str,
        path_prefix: &str,
        depth: usize,
        out: &mut String,
    ) {
        if self.config.max_depth > 0 && depth > self.config.max_depth {
            return;
        }

        let visible: Vec<&TreeNode> = nodes
            .iter()
            .filter(|n| self.config.include_files || n.kind == ItemKind::Dir)
            .collect();

        for (i, node) in visible.iter().enumerate() {
            let last = i + 1 == visible.len();
            let connector = if last { "└── " } else { "├── " };
            let node_path = if path_prefix.is_empty() {
                node.name.clone()
            } else {
                format!("{}/{}", path_prefix, node.name)
            };

            out.push_str(line_prefix);
            out.push_str(connector);
            out.push_str(&node.name);
            match node.kind {
                ItemKind::Dir => {
                    out.push('/');
                    if let Some(note) = self.config.dir_context.get(&node_path) {
                        out.push_str("  # ");
                        out.push_str(note);
                    }
                }
                ItemKind::File => {
                    if let Some(meta) = self.render_metadata(node) {
                        out.push_str(&meta);
                    }
                }
            }
            out.push('\n');

            if !node.children.is_empty() {
                let child_prefix = format!("{}{}", line_prefix, if last { "    " } else { "│   " });
                self.render_level(&node.children, &child_prefix, &node_path, depth + 1, out);
            }
        }
    }

    fn render_metadata(&self, node: &TreeNode) -> Option<String> {
        let mut parts = Vec::new();
        if self.config.show_size {
            if let Some(size) = node.size {
                let adjusted = Byte::from_u64(size).get_appropriate_unit(UnitType::Binary);
                parts.push(format!("{adjusted:.1}"));
            }
        }
        if self.config.show_last_modified {
            if let Some(modified) = node.modified {
                let stamp: DateTime<Local> = modified.into();
                parts.push(stamp.format("%Y-%m-%d %H:%M").to_string());
            }
        }
        if self.config.show_char_count {
            if let Some(count) = node.char_count {
                parts.push(format!("{} chars", count));
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!(" [{}]", parts.join(", ")))
        }
    }
}

/// Flatten a node graph back into the relative file paths it was built from.
pub fn flatten_paths(nodes: &[TreeNode]) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(nodes, "", &mut paths);
    paths
}

fn collect_paths(nodes: &[TreeNode], prefix: &str, out: &mut Vec<String>) {
    for node in nodes {
        let path = if prefix.is_empty() {
            node.name.clone()
        } else {
            format!("{}/{}", prefix, node.name)
        };
        match node.kind {
            ItemKind::File => out.push(path),
            ItemKind::Dir => collect_paths(&node.children, &path, out),
        }
    }
}
