use serde::{Deserialize, Serialize};

use crate::roles::PageSize;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Where the role directory lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every path is appended to (e.g., "https://backend.example.com/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the paginated list endpoint.
    #[serde(default = "default_list_path")]
    pub list_path: String,
    /// Path of a single role; `{id}` is replaced with the role id.
    #[serde(default = "default_item_path")]
    pub item_path: String,
    /// Path used for deletes; falls back to `item_path`.
    #[serde(default)]
    pub delete_path: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

impl ApiConfig {
    pub fn delete_path(&self) -> &str {
        self.delete_path.as_deref().unwrap_or(&self.item_path)
    }
}

/// Initial state of the roles table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Rows per page when the screen opens (10, 20 or 25).
    #[serde(default)]
    pub default_page_size: PageSize,
}

/// Where exported sheets are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output directory (default: current directory).
    #[serde(default = "default_export_directory")]
    pub directory: String,
    /// File name without extension (default: "userRoles").
    #[serde(default = "default_export_base_name")]
    pub base_name: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_list_path() -> String {
    "/roles".to_string()
}

fn default_item_path() -> String {
    "/roles/{id}".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_export_directory() -> String {
    ".".to_string()
}

fn default_export_base_name() -> String {
    "userRoles".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            list_path: default_list_path(),
            item_path: default_item_path(),
            delete_path: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            base_name: default_export_base_name(),
        }
    }
}
