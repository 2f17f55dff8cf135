use super::{Language, CATALOG};

/// Ordered set of languages the harness iterates over
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for language in CATALOG {
            catalog.register(language);
        }
        catalog
    }

    /// Appends a language; a language whose extension is already registered is ignored
    pub fn register(&mut self, language: Language) {
        if self.get_by_extension(language.extension).is_none() {
            self.languages.push(language);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn as_slice(&self) -> &[Language] {
        &self.languages
    }

    /// Get a language by display name
    pub fn get(&self, name: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn get_by_extension(&self, extension: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.extension == extension)
    }

    /// Column position of a language in reports
    pub fn position(&self, name: &str) -> Option<usize> {
        self.languages.iter().position(|l| l.name == name)
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
