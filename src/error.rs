pub type WaylineResult<T> = Result<T, WaylineError>;

#[derive(thiserror::Error, Debug)]
pub enum WaylineError {
    #[error("data error: {0}")]
    Data(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WaylineError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(WaylineError::data("x").to_string().contains("data error:"));
        assert!(
            WaylineError::config("x")
                .to_string()
                .contains("config error:")
        );
        assert!(
            WaylineError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = WaylineError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
