//! Language descriptors and the fixed catalog of supported sample languages

mod registry;

pub use registry::LanguageCatalog;

use serde::Serialize;
use std::fmt;

/// How documentation samples for one programming language are tagged, staged and run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Language {
    /// Display name (e.g., "Python", "C#")
    pub name: &'static str,

    /// Tag used on fenced code blocks in the documentation (e.g., "python")
    pub syntax: &'static str,

    /// File extension of staged programs and the template key (e.g., "py")
    pub extension: &'static str,

    /// Compiler invoked before running; `None` when the run executable reads the source
    pub build: Option<&'static str>,

    /// Executable invoked with the staged program path as its sole argument
    pub run: &'static str,
}

impl Language {
    pub const fn interpreted(
        name: &'static str,
        syntax: &'static str,
        extension: &'static str,
        run: &'static str,
    ) -> Self {
        Self {
            name,
            syntax,
            extension,
            build: None,
            run,
        }
    }

    pub const fn compiled(
        name: &'static str,
        syntax: &'static str,
        extension: &'static str,
        build: &'static str,
        run: &'static str,
    ) -> Self {
        Self {
            name,
            syntax,
            extension,
            build: Some(build),
            run,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub const CSHARP: Language = Language::compiled("C#", "csharp", "cs", "gcs", "mono");
pub const JAVA: Language = Language::compiled("Java", "java", "java", "javac", "java");
pub const JAVASCRIPT: Language = Language::interpreted("JavaScript", "javascript", "js", "node");
pub const PHP: Language = Language::interpreted("PHP", "php", "php", "php");
pub const PYTHON: Language = Language::interpreted("Python", "python", "py", "python");
pub const RUBY: Language = Language::interpreted("Ruby", "ruby", "rb", "ruby");

/// Every supported language, in report column order
pub const CATALOG: [Language; 6] = [CSHARP, JAVA, JAVASCRIPT, PHP, PYTHON, RUBY];
