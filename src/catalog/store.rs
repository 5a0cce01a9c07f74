//! Template Store
//!
//! Directory-backed `TemplateCatalog`: an in-memory registry cache seeded
//! with the embedded template, filled from template directories, and kept
//! fresh by a file watcher.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::registry::TemplateRegistry;
use super::{FetchError, RawTemplate, TemplateCatalog};
use crate::config::Config;

/// Events produced by the template directory watcher
#[derive(Debug)]
enum WatcherEvent {
    TemplateFileChanged(PathBuf),
    TemplateFileRemoved(PathBuf),
    WatcherError(notify::Error),
}

/// Production template catalog backed by `<name>.json` files
pub struct TemplateStore {
    registry: Arc<RwLock<TemplateRegistry>>,
    template_dirs: Vec<PathBuf>,
    _watcher: Option<RecommendedWatcher>,
    watcher_rx: Option<mpsc::UnboundedReceiver<WatcherEvent>>,
}

impl TemplateStore {
    pub fn new(config: &Config) -> Self {
        Self::with_dirs(config.template_dirs.clone())
    }

    /// Create a store over explicit template directories (useful for testing)
    pub fn with_dirs(template_dirs: Vec<PathBuf>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(TemplateRegistry::new())),
            template_dirs,
            _watcher: None,
            watcher_rx: None,
        }
    }

    /// Seed the embedded template, scan the template directories, and start
    /// watching them for changes.
    pub async fn initialize(&mut self) -> Result<()> {
        self.registry
            .write()
            .unwrap()
            .add_embedded_minimal_template();

        self.load_templates_from_dirs().await?;
        self.start_watching()?;

        log::info!(
            "Template store initialized with {} template(s)",
            self.registry.read().unwrap().list_templates().len()
        );
        Ok(())
    }

    /// List the names of all currently cached templates
    pub fn list_templates(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap()
            .list_templates()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    async fn load_templates_from_dirs(&self) -> Result<()> {
        for dir in &self.template_dirs {
            if !dir.exists() {
                continue;
            }

            let mut entries = tokio::fs::read_dir(dir)
                .await
                .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;

            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if path.extension().and_then(|s| s.to_str()) == Some("json") {
                    if let Err(e) = load_template_file(&self.registry, &path).await {
                        log::warn!("Skipping template file {}: {}", path.display(), e);
                    }
                }
            }
        }
        Ok(())
    }

    fn start_watching(&mut self) -> Result<()> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watcher_rx = Some(rx);

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => {
                        for path in event.paths {
                            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                                let _ = tx.send(WatcherEvent::TemplateFileChanged(path));
                            }
                        }
                    }
                    EventKind::Remove(_) => {
                        for path in event.paths {
                            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                                let _ = tx.send(WatcherEvent::TemplateFileRemoved(path));
                            }
                        }
                    }
                    _ => {}
                },
                Err(e) => {
                    let _ = tx.send(WatcherEvent::WatcherError(e));
                }
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;

        for dir in &self.template_dirs {
            if dir.exists() {
                watcher.watch(dir, RecursiveMode::NonRecursive)?;
            }
        }

        self._watcher = Some(watcher);
        self.start_watcher_task();

        Ok(())
    }

    fn start_watcher_task(&mut self) {
        if let Some(mut rx) = self.watcher_rx.take() {
            let registry = self.registry.clone();

            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    match event {
                        WatcherEvent::TemplateFileChanged(path) => {
                            match load_template_file(&registry, &path).await {
                                Ok(name) => log::info!("Reloaded template '{}'", name),
                                Err(e) => log::warn!(
                                    "Failed to reload template {}: {}",
                                    path.display(),
                                    e
                                ),
                            }
                        }
                        WatcherEvent::TemplateFileRemoved(path) => {
                            if let Some(name) = template_name_from_path(&path) {
                                registry.write().unwrap().remove_template(&name);
                                log::info!("Removed template '{}'", name);
                            }
                        }
                        WatcherEvent::WatcherError(e) => {
                            log::warn!("Template watcher error: {}", e);
                        }
                    }
                }
            });
        }
    }
}

#[async_trait]
impl TemplateCatalog for TemplateStore {
    fn get(&self, name: &str) -> Option<RawTemplate> {
        self.registry.read().unwrap().get_template(name).cloned()
    }

    async fn fetch(&self, name: &str) -> Result<RawTemplate, FetchError> {
        for dir in &self.template_dirs {
            let path = dir.join(format!("{}.json", name));
            if !path.exists() {
                continue;
            }

            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                FetchError::new(format!(
                    "Failed to read template file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            let raw: RawTemplate = serde_json::from_str(&content).map_err(|e| {
                FetchError::new(format!(
                    "Failed to parse template file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            self.registry
                .write()
                .unwrap()
                .add_template(name, raw.clone());
            return Ok(raw);
        }

        Err(FetchError::new(format!("Template '{}' not found", name)))
    }
}

/// The template name is the file stem of its `<name>.json` file
fn template_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

async fn load_template_file(
    registry: &Arc<RwLock<TemplateRegistry>>,
    path: &Path,
) -> Result<String> {
    let name = template_name_from_path(path)
        .with_context(|| format!("Template file has no usable name: {}", path.display()))?;

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read template file: {}", path.display()))?;
    let raw: RawTemplate = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse template JSON: {}", path.display()))?;

    registry.write().unwrap().add_template(name.clone(), raw);
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_name_from_path() {
        assert_eq!(
            template_name_from_path(Path::new("/tmp/templates/minimal.json")),
            Some("minimal".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_template_reports_name() {
        let store = TemplateStore::with_dirs(vec![]);
        let err = store.fetch("nope").await.expect_err("fetch should fail");
        assert_eq!(err.message, Some("Template 'nope' not found".to_string()));
    }
}
