//! Toast-style notifications raised by view operations.

use std::fmt;

use lotus::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: Option<String>,
    pub variant: Variant,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: Variant::Success,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            variant: Variant::Destructive,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Failure toast whose description is the error message.
    #[must_use]
    pub fn from_error(title: impl Into<String>, error: &ApiError) -> Self {
        Self::destructive(title, error.message())
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.variant {
            Variant::Success => "ok",
            Variant::Destructive => "error",
        };

        write!(f, "[{marker}] {}", self.title)?;

        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lotus::api::ApiErrorKind;

    use super::*;

    #[test]
    fn error_message_becomes_description() {
        let error = ApiError::new(ApiErrorKind::Server, Some(500), "server error");

        let notification = Notification::from_error("Order Fetch Failed", &error);

        assert!(notification.is_destructive(), "api errors are destructive");
        assert_eq!(notification.to_string(), "[error] Order Fetch Failed: server error");
    }

    #[test]
    fn success_has_no_description() {
        assert_eq!(Notification::success("Deleted").to_string(), "[ok] Deleted");
    }
}
