//! africasuite-templates
//!
//! Report template definitions. Pure data: the built-in hotel reports plus
//! any extra templates loaded from JSON files at startup. The registry is
//! built once and never mutated while reports are being generated.

pub mod builtin;
pub mod error;
pub mod loader;

use std::path::Path;

use africasuite_core::models::template::{ReportTemplate, TemplateCategory};

use error::TemplateError;

/// In-memory table of report templates, in registration order.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<ReportTemplate>,
}

impl TemplateRegistry {
    /// Registry holding the built-in AfricaSuite templates.
    pub fn builtin() -> Self {
        Self {
            templates: builtin::all_templates(),
        }
    }

    /// Registry holding exactly `templates`. Ids must be unique.
    pub fn with_templates(templates: Vec<ReportTemplate>) -> Result<Self, TemplateError> {
        let mut registry = Self {
            templates: Vec::with_capacity(templates.len()),
        };
        for template in templates {
            registry.register(template)?;
        }
        Ok(registry)
    }

    /// Add a template. Must happen before the registry is shared.
    pub fn register(&mut self, template: ReportTemplate) -> Result<(), TemplateError> {
        if self.templates.iter().any(|t| t.id == template.id) {
            return Err(TemplateError::DuplicateTemplate(template.id));
        }
        self.templates.push(template);
        Ok(())
    }

    /// Register every `*.json` template under `dir`. Returns how many were added.
    pub fn load_json_dir(&mut self, dir: &Path) -> Result<usize, TemplateError> {
        let loaded = loader::load_dir(dir)?;
        let count = loaded.len();
        for template in loaded {
            self.register(template)?;
        }
        tracing::info!(dir = %dir.display(), count, "loaded report templates");
        Ok(count)
    }

    pub fn list_templates(&self) -> &[ReportTemplate] {
        &self.templates
    }

    pub fn get_template(&self, id: &str) -> Result<&ReportTemplate, TemplateError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| TemplateError::NotFound(id.to_string()))
    }

    pub fn templates_by_category(
        &self,
        category: TemplateCategory,
    ) -> impl Iterator<Item = &ReportTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
