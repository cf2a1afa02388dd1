/// Domain-specific error types for simpleranker
///
/// Only two things can go wrong: the ranker was built with settings it cannot
/// honor, or a match handed to it lacks the score it is supposed to rank by.

#[derive(Debug, thiserror::Error)]
pub enum RankerError {
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>
    },

    #[error("Missing score: match '{id}' has no '{metric}' score")]
    MissingScore {
        id: String,
        metric: String
    },
}

impl RankerError {
    /// Helper to create configuration errors with field names
    ///
    /// Example:
    /// ```
    /// use simpleranker::errors::RankerError;
    /// let err = RankerError::configuration("ranking", "unknown ranking 'median'");
    /// ```
    pub fn configuration(field: &str, message: &str) -> Self {
        RankerError::Configuration {
            message: message.to_string(),
            field: Some(field.to_string()),
        }
    }

    pub fn missing_score(id: &str, metric: &str) -> Self {
        RankerError::MissingScore {
            id: id.to_string(),
            metric: metric.to_string(),
        }
    }
}
