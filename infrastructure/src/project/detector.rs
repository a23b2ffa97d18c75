//! Framework detection for the working directory.
//!
//! A marker-file lookup that produces descriptive metadata about the
//! project. The result is injected once into the system prompt as context;
//! nothing else consumes it.

use std::path::Path;
use tracing::debug;

/// Descriptive metadata about the detected project framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkInfo {
    /// Framework name, or "Unknown"
    pub name: String,
    /// Declared version constraint, when the manifest names one
    pub version: Option<String>,
    /// Notable add-ons (e.g. "Livewire", "Inertia.js")
    pub features: Vec<String>,
    /// Key config files worth surfacing as context
    pub config_files: Vec<String>,
}

impl Default for FrameworkInfo {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            version: None,
            features: Vec::new(),
            config_files: Vec::new(),
        }
    }
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let text = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

/// Detect the framework used by the project rooted at `root`.
pub fn detect_framework(root: &Path) -> FrameworkInfo {
    let mut info = FrameworkInfo::default();

    if root.join("artisan").exists() && root.join("composer.json").exists() {
        info.name = "Laravel".to_string();

        if let Some(composer) = read_json(&root.join("composer.json")) {
            info.version = composer
                .get("require")
                .and_then(|r| r.get("laravel/framework"))
                .and_then(|v| v.as_str())
                .map(String::from);
        }

        for routes in ["routes/web.php", "routes/api.php"] {
            if root.join(routes).exists() {
                info.config_files.push(routes.to_string());
            }
        }

        if let Ok(pkg) = std::fs::read_to_string(root.join("package.json")) {
            if pkg.contains("livewire") {
                info.features.push("Livewire".to_string());
            }
            if pkg.contains("@inertiajs") {
                info.features.push("Inertia.js".to_string());
            }
        }
    } else if root.join("bin/console").exists() && root.join("symfony.lock").exists() {
        info.name = "Symfony".to_string();
        info.config_files.push("config/routes.yaml".to_string());
    } else if root.join("system/CodeIgniter.php").exists() {
        info.name = "CodeIgniter".to_string();
        info.config_files
            .push("application/config/config.php".to_string());
    } else if root.join("bin/cake").exists() {
        info.name = "CakePHP".to_string();
    } else if root.join("yii").exists() {
        info.name = "Yii".to_string();
    } else if let Some(composer) = read_json(&root.join("composer.json")) {
        let has_slim = composer
            .get("require")
            .and_then(|r| r.get("slim/slim"))
            .is_some();
        if has_slim {
            info.name = "Slim".to_string();
        }
    }

    debug!(framework = %info.name, "Framework detection finished");
    info
}

/// Maximum number of context files injected into the prompt
const MAX_CONTEXT_FILES: usize = 5;

/// Maximum characters taken from each context file
const MAX_CONTEXT_CHARS: usize = 2000;

/// Build the project-context text injected into the system prompt.
///
/// Framework metadata plus bounded excerpts of the key files.
pub fn project_context(root: &Path, info: &FrameworkInfo) -> String {
    let mut parts = Vec::new();

    parts.push(format!("Framework: {}", info.name));
    if let Some(version) = &info.version {
        parts.push(format!("Version: {}", version));
    }
    if !info.features.is_empty() {
        parts.push(format!("Features: {}", info.features.join(", ")));
    }

    let mut files = info.config_files.clone();
    if info.name == "Laravel" {
        files.extend(
            ["composer.json", "package.json", ".env.example"]
                .into_iter()
                .map(String::from),
        );
    }

    for file in files.iter().take(MAX_CONTEXT_FILES) {
        let path = root.join(file);
        if !path.is_file() {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        let excerpt = if content.len() > MAX_CONTEXT_CHARS {
            let mut end = MAX_CONTEXT_CHARS;
            while !content.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}\n\n... (truncated)", &content[..end])
        } else {
            content
        };
        parts.push(format!("\n--- {} ---\n{}", file, excerpt));
    }

    parts.join("\n")
}
