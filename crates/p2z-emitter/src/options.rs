use p2z_common::limits::DEFAULT_INDENT_WIDTH;
use serde::Deserialize;

/// Knobs for one conversion run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertOptions {
    /// Class names treated as ambient in addition to the PHP built-ins.
    pub known_classes: Vec<String>,
    /// Spaces per indentation level in the emitted code.
    pub indent_width: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            known_classes: Vec::new(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}
