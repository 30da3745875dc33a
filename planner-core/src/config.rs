//! Store-level settings shared by the CLI and any other front end.

use serde::{Deserialize, Serialize};

/// Tag palette: green, yellow, orange, red, purple, blue, sky, mint, pink, dark.
pub const TAG_COLORS: &[&str] = &[
    "#61bd4f", "#f2d600", "#ff9f1a", "#eb5a46", "#c377e0", "#0079bf", "#00c2e0", "#51e898",
    "#ff78cb", "#344563",
];

pub const DEFAULT_LIST_COLOR: &str = "#ebecf0";
pub const DEFAULT_COPY_SUFFIX: &str = " (Copy)";
pub const DEFAULT_TEMPLATE_ID_PREFIX: &str = "tpl_";
pub const DEFAULT_EXPORT_EXTENSION: &str = "plnpro";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    #[serde(default = "default_list_color")]
    pub default_list_color: String,
    #[serde(default = "default_copy_suffix")]
    pub copy_suffix: String,
    #[serde(default = "default_tag_palette")]
    pub tag_palette: Vec<String>,
    #[serde(default = "default_template_id_prefix")]
    pub template_id_prefix: String,
    #[serde(default = "default_export_extension")]
    pub export_extension: String,
}

fn default_list_color() -> String {
    DEFAULT_LIST_COLOR.to_string()
}

fn default_copy_suffix() -> String {
    DEFAULT_COPY_SUFFIX.to_string()
}

fn default_tag_palette() -> Vec<String> {
    TAG_COLORS.iter().map(|c| c.to_string()).collect()
}

fn default_template_id_prefix() -> String {
    DEFAULT_TEMPLATE_ID_PREFIX.to_string()
}

fn default_export_extension() -> String {
    DEFAULT_EXPORT_EXTENSION.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_list_color: default_list_color(),
            copy_suffix: default_copy_suffix(),
            tag_palette: default_tag_palette(),
            template_id_prefix: default_template_id_prefix(),
            export_extension: default_export_extension(),
        }
    }
}

impl StoreConfig {
    /// Palette color for the n-th tag, wrapping around. An empty palette
    /// falls back to the built-in first color.
    pub fn palette_color(&self, n: usize) -> String {
        if self.tag_palette.is_empty() {
            return TAG_COLORS[0].to_string();
        }
        self.tag_palette[n % self.tag_palette.len()].clone()
    }

    /// Color given to migrated legacy tags that carried none.
    pub fn fallback_tag_color(&self) -> String {
        self.palette_color(0)
    }
}
