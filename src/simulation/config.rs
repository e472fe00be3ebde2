// src/simulation/config.rs

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// How many trials to run. Zero is allowed and yields an empty summary.
    pub times: usize,
    /// Heading of the printed summary.
    pub title: String,
}

impl RunnerConfig {
    pub fn new(times: usize, title: impl Into<String>) -> Self {
        Self {
            times,
            title: title.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyField {
                entity: "trial runner",
                field: "title",
            });
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            times: 1,
            title: "Example".to_string(),
        }
    }
}
