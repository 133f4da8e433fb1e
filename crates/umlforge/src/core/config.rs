//! Generator configuration

/// Default indentation width of generated source and schema text
pub const DEFAULT_INDENT: usize = 4;

/// Options controlling the generated artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Java package declared at the top of every class source
    pub package: Option<String>,
    /// Spaces per indentation level
    pub indent: usize,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            package: None,
            indent: DEFAULT_INDENT,
        }
    }

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        let package = package.into();
        self.package = if package.trim().is_empty() {
            None
        } else {
            Some(package.trim().to_string())
        };
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Indentation string for the given nesting depth
    pub fn indent_str(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
