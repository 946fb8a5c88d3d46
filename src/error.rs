use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Resolution Errors
/// - [`Error::ClassNotFound`] - The requested class is not present in a metadata container.
///   The generator driver treats this as "try the next container" and only surfaces it once
///   every container has been searched.
/// - [`Error::NotARuntimeClass`] - The class exists, but is not flagged as a Windows Runtime class
///
/// ## File Parsing Errors
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond file boundaries
/// - [`Error::NotSupported`] - Unsupported file format or feature
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::RecursionLimit`] - A signature nested deeper than the parser allows
///
/// ## I/O and External Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from goblin crate
///
/// ## Configuration Errors
/// - [`Error::Config`] - The generator configuration failed validation
///
/// # Examples
///
/// ```rust,no_run
/// use winmdgen::{generate, Error, GeneratorConfig};
///
/// let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer")
///     .with_container_path("Windows.Storage.winmd");
///
/// match generate(&config) {
///     Ok(data) => println!("package {}", data.package),
///     Err(Error::ClassNotFound(class)) => eprintln!("no container defines {class}"),
///     Err(Error::NotARuntimeClass(class)) => eprintln!("{class} is not a runtime class"),
///     Err(e) => eprintln!("generation failed: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Resolution Errors
    /// The requested class was not found.
    ///
    /// Raised by the class locator once a `TypeDef` table has been fully scanned without a
    /// match, and by the generator once every metadata container has been searched.
    #[error("class {0} was not found")]
    ClassNotFound(String),

    /// The resolved type lacks the Windows Runtime flag (`0x4000`).
    ///
    /// Only runtime classes can be generated; plain interfaces, value types and delegates
    /// are rejected.
    #[error("{0} is not a runtime class")]
    NotARuntimeClass(String),

    // File parsing Errors
    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Neither a PE image with a CLR runtime header, nor a bare metadata root.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// Recursion limit reached while decoding a signature.
    ///
    /// The associated value shows the recursion limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// Invalid generator configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
