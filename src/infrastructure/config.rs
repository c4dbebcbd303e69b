use std::fmt;
use std::path::PathBuf;

/// Where a JSON document comes from
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSource {
    File(PathBuf),
    Interactive,
}

impl JsonSource {
    pub fn from_path(path: Option<&PathBuf>) -> Self {
        path.map_or(JsonSource::Interactive, |p| JsonSource::File(p.clone()))
    }
}

impl fmt::Display for JsonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonSource::File(path) => write!(f, "{}", path.display()),
            JsonSource::Interactive => write!(f, "interactive input"),
        }
    }
}

/// Where rendered text responses go
#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Everything a single run needs, resolved once from the command line
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub payload: JsonSource,
    /// Headers are only read when a file is named
    pub headers: Option<JsonSource>,
    pub output: OutputTarget,
    /// Attachments are written here under their advertised name
    pub attachment_dir: PathBuf,
    pub verbose: bool,
}
