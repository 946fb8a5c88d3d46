//! Configuration of a generation request.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::{metadata::winmd::Container, Error, Result};

/// Import path prefix of the Go projection the IR targets
pub const DEFAULT_IMPORT_PREFIX: &str = "github.com/saltosystems/winrt-go";

/// Includes or excludes one method by name.
///
/// Parsed from `"Name"` (include) or `"!Name"` (exclude).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFilter {
    /// The method name this filter applies to
    pub name: String,
    /// Keep the method if true, drop it otherwise
    pub include: bool,
}

impl MethodFilter {
    /// A filter keeping `name`
    #[must_use]
    pub fn include(name: impl Into<String>) -> Self {
        MethodFilter {
            name: name.into(),
            include: true,
        }
    }

    /// A filter dropping `name`
    #[must_use]
    pub fn exclude(name: impl Into<String>) -> Self {
        MethodFilter {
            name: name.into(),
            include: false,
        }
    }
}

impl FromStr for MethodFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let (name, include) = match value.strip_prefix('!') {
            Some(name) => (name, false),
            None => (value, true),
        };

        if name.is_empty() {
            return Err(Error::Config(format!("empty method filter '{value}'")));
        }

        Ok(MethodFilter {
            name: name.to_string(),
            include,
        })
    }
}

impl fmt::Display for MethodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.include {
            write!(f, "{}", self.name)
        } else {
            write!(f, "!{}", self.name)
        }
    }
}

/// Configuration of one [`crate::generate`] request.
///
/// # Examples
///
/// ```rust
/// use winmdgen::{generator::MethodFilter, GeneratorConfig};
///
/// let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer")
///     .with_container_path("Windows.Storage.winmd")
///     .with_skip_statics(true)
///     .with_method_filter("!get_Capacity".parse()?);
///
/// config.validate()?;
/// assert!(!config.keeps_method("get_Capacity"));
/// assert!(config.keeps_method("get_Length"));
/// # Ok::<(), winmdgen::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Fully-qualified runtime class name, e.g. `Windows.Storage.Streams.Buffer`
    pub class: String,

    /// Metadata containers searched in order; directories expand to their `*.winmd` files
    pub containers: Vec<Container>,

    /// Do not project the `<Primary>Factory` interface (default: false)
    pub skip_factory: bool,

    /// Do not project the `<Primary>Statics` interface (default: false)
    pub skip_statics: bool,

    /// Method filters, evaluated in order
    pub method_filters: Vec<MethodFilter>,

    /// Prefix of generated import paths (default: [`DEFAULT_IMPORT_PREFIX`])
    pub import_prefix: String,
}

impl GeneratorConfig {
    /// A configuration for `class` without any container
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        GeneratorConfig {
            class: class.into(),
            containers: Vec::new(),
            skip_factory: false,
            skip_statics: false,
            method_filters: Vec::new(),
            import_prefix: DEFAULT_IMPORT_PREFIX.to_string(),
        }
    }

    /// Append a metadata container.
    #[must_use]
    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    /// Append a `.winmd` file or a directory of them.
    #[must_use]
    pub fn with_container_path(self, path: impl Into<PathBuf>) -> Self {
        self.with_container(Container::Path(path.into()))
    }

    /// Append an in-memory metadata container.
    #[must_use]
    pub fn with_container_bytes(self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.with_container(Container::Bytes {
            name: name.into(),
            data,
        })
    }

    /// Enable or disable factory projection.
    #[must_use]
    pub fn with_skip_factory(mut self, skip: bool) -> Self {
        self.skip_factory = skip;
        self
    }

    /// Enable or disable statics projection.
    #[must_use]
    pub fn with_skip_statics(mut self, skip: bool) -> Self {
        self.skip_statics = skip;
        self
    }

    /// Append a method filter.
    #[must_use]
    pub fn with_method_filter(mut self, filter: MethodFilter) -> Self {
        self.method_filters.push(filter);
        self
    }

    /// Replace the import prefix.
    #[must_use]
    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }

    /// Check the configuration before any container is opened.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the class name is empty or has no namespace, or no
    /// container was given.
    pub fn validate(&self) -> Result<()> {
        if self.class.is_empty() {
            return Err(Error::Config("class name is empty".to_string()));
        }

        match self.class.rsplit_once('.') {
            Some((namespace, name)) if !namespace.is_empty() && !name.is_empty() => {}
            _ => {
                return Err(Error::Config(format!(
                    "class name '{}' is not namespace-qualified",
                    self.class
                )))
            }
        }

        if self.containers.is_empty() {
            return Err(Error::Config("no metadata container given".to_string()));
        }

        for container in &self.containers {
            if let Container::Path(path) = container {
                if path.as_os_str().is_empty() {
                    return Err(Error::Config("empty container path".to_string()));
                }
            }
        }

        Ok(())
    }

    /// True if `method` survives the method filters.
    ///
    /// The first filter naming the method decides, unnamed methods are kept.
    #[must_use]
    pub fn keeps_method(&self, method: &str) -> bool {
        self.method_filters
            .iter()
            .find(|filter| filter.name == method)
            .map_or(true, |filter| filter.include)
    }

    /// Import path of the package generated for `namespace.name`
    #[must_use]
    pub fn import_path(&self, namespace: &str, name: &str) -> String {
        let folder = format!("{namespace}.{name}").to_lowercase().replace('.', "/");
        format!("{}/{}", self.import_prefix.trim_end_matches('/'), folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filters() {
        let include: MethodFilter = "get_Length".parse().unwrap();
        assert_eq!(include, MethodFilter::include("get_Length"));

        let exclude: MethodFilter = "!get_Length".parse().unwrap();
        assert_eq!(exclude, MethodFilter::exclude("get_Length"));
        assert_eq!(exclude.to_string(), "!get_Length");

        assert!(matches!("!".parse::<MethodFilter>(), Err(Error::Config(_))));
        assert!(matches!("".parse::<MethodFilter>(), Err(Error::Config(_))));
    }

    #[test]
    fn first_filter_decides() {
        let config = GeneratorConfig::new("Windows.Foundation.Uri")
            .with_method_filter(MethodFilter::exclude("get_Host"))
            .with_method_filter(MethodFilter::include("get_Host"))
            .with_method_filter(MethodFilter::include("get_Port"));

        assert!(!config.keeps_method("get_Host"));
        assert!(config.keeps_method("get_Port"));
        assert!(config.keeps_method("Equals"));
    }

    #[test]
    fn validation() {
        let valid = GeneratorConfig::new("Windows.Foundation.Uri").with_container_path("a.winmd");
        assert!(valid.validate().is_ok());

        for class in ["", "Uri", ".Uri", "Windows.Foundation."] {
            let config = GeneratorConfig::new(class).with_container_path("a.winmd");
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{class}");
        }

        let no_containers = GeneratorConfig::new("Windows.Foundation.Uri");
        assert!(matches!(no_containers.validate(), Err(Error::Config(_))));

        let empty_path = GeneratorConfig::new("Windows.Foundation.Uri").with_container_path("");
        assert!(matches!(empty_path.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn import_paths() {
        let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer");
        assert_eq!(
            config.import_path("Windows.Foundation", "MemoryBuffer"),
            "github.com/saltosystems/winrt-go/windows/foundation/memorybuffer"
        );

        let custom = config.with_import_prefix("example.com/bindings/");
        assert_eq!(
            custom.import_path("Windows.Foundation", "Uri"),
            "example.com/bindings/windows/foundation/uri"
        );
    }
}
