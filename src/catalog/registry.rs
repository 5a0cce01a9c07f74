//! Template Registry
//!
//! Simple in-memory registry of named template documents.

use std::collections::HashMap;

use serde_json::json;

use super::RawTemplate;

/// In-memory name -> template map
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, RawTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Add or replace a template in the registry
    pub fn add_template(&mut self, name: impl Into<String>, raw: RawTemplate) {
        self.templates.insert(name.into(), raw);
    }

    /// Remove a template; returns the removed content if it was present
    pub fn remove_template(&mut self, name: &str) -> Option<RawTemplate> {
        self.templates.remove(name)
    }

    /// Look up a template by name
    pub fn get_template(&self, name: &str) -> Option<&RawTemplate> {
        self.templates.get(name)
    }

    /// List all registered template names
    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }

    /// Add the built-in "minimal" factory template shipped in the binary
    pub fn add_embedded_minimal_template(&mut self) {
        let embedded_json = include_str!("../../resources/templates/minimal.json");

        match serde_json::from_str::<RawTemplate>(embedded_json) {
            Ok(raw) => self.add_template("minimal", raw),
            Err(e) => {
                // Fallback to a hard-coded document if parsing fails
                log::warn!(
                    "Failed to parse embedded minimal template: {}. Using hard-coded fallback.",
                    e
                );
                self.add_minimal_fallback_template();
            }
        }
    }

    fn add_minimal_fallback_template(&mut self) {
        self.add_template(
            "minimal",
            json!({
                "v": "4.0",
                "name": "minimal",
                "workspace": {
                    "projects": [],
                    "commands": []
                }
            }),
        );
    }
}
