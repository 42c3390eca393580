use std::fmt;
use std::str::FromStr;

/// A required, user supplied text field of a contact message
///
/// Only presence is checked: the value must contain something other than whitespace.
/// Emails are stored as given, no format validation is applied.
#[derive(Debug, PartialEq, Clone)]
pub struct ContactText(String);

impl FromStr for ContactText {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err("Field cannot be empty".into());
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for ContactText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
