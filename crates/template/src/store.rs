//! Template lookup

use crate::schema::Template;
use std::collections::HashMap;

/// Source of templates for [`crate::DocumentRenderer::render_by_id`]
pub trait TemplateStore {
    /// Find a template by id
    fn lookup(&self, id: &str) -> Option<Template>;
}

/// Templates held in memory, keyed by id
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<String, Template>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, returning the one it replaced
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        self.templates.insert(template.id.clone(), template)
    }

    pub fn remove(&mut self, id: &str) -> Option<Template> {
        self.templates.remove(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl FromIterator<Template> for InMemoryTemplateStore {
    fn from_iter<I: IntoIterator<Item = Template>>(iter: I) -> Self {
        let mut store = Self::new();
        for template in iter {
            store.insert(template);
        }
        store
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn lookup(&self, id: &str) -> Option<Template> {
        self.templates.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TemplateCategory;

    #[test]
    fn test_insert_and_lookup() {
        let mut store = InMemoryTemplateStore::new();
        assert!(store.is_empty());

        store.insert(Template::new("a", "A", TemplateCategory::Report));
        let replaced = store.insert(Template::new("a", "A2", TemplateCategory::Report));

        assert_eq!(replaced.map(|t| t.name), Some("A".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("a").map(|t| t.name), Some("A2".to_string()));
        assert!(store.lookup("missing").is_none());

        store.remove("a");
        assert!(store.lookup("a").is_none());
    }

    #[test]
    fn test_from_iter() {
        let store: InMemoryTemplateStore = [
            Template::new("a", "A", TemplateCategory::Invoice),
            Template::new("b", "B", TemplateCategory::Contract),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.len(), 2);
        assert!(store.lookup("b").is_some());
    }
}
