use std::fmt;

pub(crate) enum HarnessError {
    MissingMock { name: &'static str },
    Downcast { name: &'static str },
    StillShared { name: &'static str },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingMock { name } => {
                write!(f, "{name}: No mock was synthesized for this interface.")
            }
            Self::Downcast { name } => {
                write!(f, "{name}: Fatal: failed to downcast the registered mock entry.")
            }
            Self::StillShared { name } => {
                write!(
                    f,
                    "{name}: Cannot reconfigure a mock while a subject still shares it. Drop the subject first."
                )
            }
        }
    }
}
