/// A rejected input. The core fails fast: no retry, no silent defaulting —
/// recovery belongs to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A numeric parameter is outside its valid range.
    InvalidParameter { name: &'static str, value: f64, detail: &'static str },
    /// Scenario name not present in the shock-table registry.
    UnknownScenario { name: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter { name, value, detail } => {
                write!(f, "invalid parameter {name}={value}: {detail}")
            }
            Self::UnknownScenario { name } => {
                write!(f, "unknown scenario {name:?}")
            }
        }
    }
}

impl std::error::Error for Error {}
