// src/config/model.rs

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [state]
/// file = ".siteup/state.json"
///
/// [watch]
/// roots = ["content", "media", "."]
/// debounce_ms = 400
///
/// [input.team_docx]
/// path = "content/TEAM.docx"
///
/// [input.hero_dir]
/// path = "media/hero"
/// kind = "dir"
///
/// [task.team]
/// cmd = ["node", "build-teams-from-docx.mjs", "--doc", "content/TEAM.docx"]
/// inputs = ["team_docx"]
/// ```
///
/// All sections except `[input.*]` and `[task.*]` are optional and have
/// reasonable defaults. Tables keep their declaration order, which is also
/// the order tasks run in.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Where the signature state lives, from `[state]`.
    #[serde(default)]
    pub state: StateSection,

    /// Watch roots, debounce and ignore patterns from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,

    /// All tracked inputs from `[input.<name>]`.
    #[serde(default)]
    pub input: IndexMap<String, InputConfig>,

    /// All tasks from `[task.<name>]`.
    #[serde(default)]
    pub task: IndexMap<String, TaskConfig>,

    /// Always-run steps from `[hook.<name>]`, executed after the stale tasks
    /// on every pass. A failing hook is a warning, not a pass failure.
    #[serde(default)]
    pub hook: IndexMap<String, HookConfig>,
}

/// `[state]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StateSection {
    /// Path of the persisted state file, relative to the config directory.
    #[serde(default = "default_state_file")]
    pub file: PathBuf,
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".siteup/state.json")
}

impl Default for StateSection {
    fn default() -> Self {
        Self {
            file: default_state_file(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Directories observed recursively for change events, relative to the
    /// config directory. A root that does not exist is skipped with a warning.
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,

    /// Quiet period after the last change event before a pass starts.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Filename patterns whose change events are ignored entirely
    /// (editor temp files, swap files, partial downloads).
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_roots() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_ignore() -> Vec<String> {
    ["*.tmp", "*.swp", "*.part", "*~"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            debounce_ms: default_debounce_ms(),
            ignore: default_ignore(),
        }
    }
}

/// Kind of a tracked input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Signature is a hash of the file's bytes.
    #[default]
    File,
    /// Signature is a digest over the directory's `name:mtime:size` entries.
    Dir,
}

/// `[input.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Filesystem path, relative to the config directory.
    pub path: PathBuf,

    /// `"file"` (default) or `"dir"`.
    #[serde(default)]
    pub kind: InputKind,

    /// For `kind = "dir"`: include nested subdirectory entries in the
    /// signature. Defaults to false (immediate file entries only).
    #[serde(default)]
    pub recursive: bool,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Command as an argv list; no shell is involved.
    pub cmd: Vec<String>,

    /// Names of tracked inputs this task depends on. The first entry is the
    /// primary input: if it is absent the task is never run.
    pub inputs: Vec<String>,

    /// Optional tracked input naming the task's own output file. When that
    /// input is currently absent the task runs even if nothing changed.
    #[serde(default)]
    pub output: Option<String>,
}

/// `[hook.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HookConfig {
    /// Command as an argv list; no shell is involved.
    pub cmd: Vec<String>,
}
