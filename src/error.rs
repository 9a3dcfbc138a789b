use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, HyperplaneErr>;

/// The crate's error type.
#[derive(Debug)]
pub enum HyperplaneErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyDataset(String),
    InvalidLabel {
        index: usize,
        value: f32,
    },
    InvalidConfig(String),
    Json(serde_json::Error),
    UnexpectedValue {
        name: String,
        step: usize,
    },
    ObservationMismatch {
        weights: usize,
        biases: usize,
    },
    NoFrames,
    Plot(String),
    OutputDir(PathBuf),
    Encoder(String),
}

impl Display for HyperplaneErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperplaneErr::Io { path, source } => {
                write!(f, "io error on '{}': {source}", path.display())
            }
            HyperplaneErr::Parse { path, line, token } => write!(
                f,
                "cannot parse '{token}' as a number at {}:{line}",
                path.display()
            ),
            HyperplaneErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            HyperplaneErr::EmptyDataset(what) => write!(f, "the {what} has no samples"),
            HyperplaneErr::InvalidLabel { index, value } => write!(
                f,
                "label {index} is {value}, binary labels must be either 1 or -1"
            ),
            HyperplaneErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            HyperplaneErr::Json(e) => write!(f, "invalid JSON: {e}"),
            HyperplaneErr::UnexpectedValue { name, step } => write!(
                f,
                "observation '{name}' at step {step} carries the wrong kind of value"
            ),
            HyperplaneErr::ObservationMismatch { weights, biases } => write!(
                f,
                "captured {weights} weight observations but {biases} bias observations"
            ),
            HyperplaneErr::NoFrames => {
                write!(f, "no observations were captured, there is nothing to animate")
            }
            HyperplaneErr::Plot(msg) => write!(f, "plotting error: {msg}"),
            HyperplaneErr::OutputDir(path) => write!(
                f,
                "the output directory '{}' does not exist",
                path.display()
            ),
            HyperplaneErr::Encoder(msg) => write!(f, "encoder error: {msg}"),
        }
    }
}

impl Error for HyperplaneErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HyperplaneErr::Io { source, .. } => Some(source),
            HyperplaneErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HyperplaneErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl HyperplaneErr {
    /// Wraps an io error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Converts any plotting backend failure into a `Plot` error.
    pub(crate) fn plot<E: Display>(e: E) -> Self {
        Self::Plot(e.to_string())
    }
}
