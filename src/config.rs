use std::fmt;
use std::path::PathBuf;

/// Which side of the API the generated types describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Payloads returned by the server
    Read,
    /// Payloads submitted by a client
    Write,
}

impl Mode {
    pub fn suffix(self) -> &'static str {
        match self {
            Mode::Read => "Read",
            Mode::Write => "Write",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Read => "read",
            Mode::Write => "write",
        })
    }
}

/// Where the spec text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecSource {
    Url(String),
    File(PathBuf),
}

impl SpecSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SpecSource::Url(location.to_owned())
        } else {
            SpecSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecSource::Url(url) => f.write_str(url),
            SpecSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings for one generator run. Built once at startup and never changed.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SpecSource,
    pub dest: PathBuf,
    pub mode: Mode,
    /// Append the `Read`/`Write` suffix after `Dto`
    pub qualify: bool,
    /// Print declarations instead of writing them
    pub dry_run: bool,
}

impl Config {
    pub fn new(source: SpecSource, mode: Mode) -> Self {
        Config {
            source,
            dest: PathBuf::from("./dto-spec"),
            mode,
            qualify: true,
            dry_run: false,
        }
    }

    /// Suffix every generated type name ends with.
    pub fn type_suffix(&self) -> String {
        if self.qualify {
            format!("Dto{}", self.mode.suffix())
        } else {
            "Dto".to_owned()
        }
    }
}
