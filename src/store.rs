//! User template collection
//!
//! Invariant: whenever the store holds at least one template, exactly one
//! of them is the default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Destination the `{amz_link}` placeholder is built for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    #[default]
    Amazon,
    Posttap,
    Joylink,
    Geniuslink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
    pub title_word_limit: usize,
    pub tracking_id: String,
    pub is_default: bool,
    pub link_type: LinkType,
}

/// Detached, editable copy of a stored template
///
/// Changes stay local until passed to [`TemplateStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    id: String,
    pub name: String,
    pub content: String,
    pub title_word_limit: usize,
    pub tracking_id: String,
    pub link_type: LinkType,
}

impl TemplateDraft {
    pub fn id(&self) -> &str {
        &self.id
    }
}

pub const DEFAULT_TITLE_WORD_LIMIT: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; a missing file yields an empty store
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no template file, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut store: TemplateStore = serde_json::from_str(&json)?;
        store.repair_default();
        info!(count = store.templates.len(), "templates loaded");
        Ok(store)
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn default_template(&self) -> Option<&Template> {
        self.templates.iter().find(|t| t.is_default)
    }

    /// Add a template; the first one added becomes the default
    pub fn add(&mut self, name: &str, content: &str) -> &Template {
        let template = Template {
            id: self.next_id(),
            name: name.to_string(),
            content: content.to_string(),
            title_word_limit: DEFAULT_TITLE_WORD_LIMIT,
            tracking_id: String::new(),
            is_default: self.templates.is_empty(),
            link_type: LinkType::default(),
        };
        debug!(id = %template.id, name, "template added");

        self.templates.push(template);
        &self.templates[self.templates.len() - 1]
    }

    pub fn set_default(&mut self, id: &str) -> Result<()> {
        self.position(id)?;
        for template in &mut self.templates {
            template.is_default = template.id == id;
        }
        Ok(())
    }

    pub fn edit(&self, id: &str) -> Result<TemplateDraft> {
        let template = &self.templates[self.position(id)?];
        Ok(TemplateDraft {
            id: template.id.clone(),
            name: template.name.clone(),
            content: template.content.clone(),
            title_word_limit: template.title_word_limit,
            tracking_id: template.tracking_id.clone(),
            link_type: template.link_type,
        })
    }

    /// Write a draft back over its template
    pub fn save(&mut self, draft: TemplateDraft) -> Result<()> {
        let idx = self.position(&draft.id)?;
        let template = &mut self.templates[idx];

        template.name = draft.name;
        template.content = draft.content;
        template.title_word_limit = draft.title_word_limit;
        template.tracking_id = draft.tracking_id;
        template.link_type = draft.link_type;

        debug!(id = %template.id, "template saved");
        Ok(())
    }

    /// Delete a template; the last one cannot be deleted
    ///
    /// If the default is deleted, the template that followed it (or the new
    /// last one) becomes the default.
    pub fn delete(&mut self, id: &str) -> Result<Template> {
        let idx = self.position(id)?;
        if self.templates.len() == 1 {
            return Err(Error::LastTemplate);
        }

        let removed = self.templates.remove(idx);
        if removed.is_default {
            let next = idx.min(self.templates.len() - 1);
            self.templates[next].is_default = true;
            debug!(id = %self.templates[next].id, "default template promoted");
        }
        Ok(removed)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
    }

    fn next_id(&self) -> String {
        let max = self
            .templates
            .iter()
            .filter_map(|t| t.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Restore the single-default invariant on data loaded from disk
    fn repair_default(&mut self) {
        let mut seen = false;
        for template in &mut self.templates {
            if template.is_default && !seen {
                seen = true;
            } else {
                template.is_default = false;
            }
        }
        if !seen {
            if let Some(first) = self.templates.first_mut() {
                first.is_default = true;
            }
        }
    }
}
