use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// JSON body naming the store an action targets.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseRequest {
    /// Database URL, e.g. `http://localhost:8000`.
    pub url: String,
}

/// Button pressed on the inspector page.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
    AsRefStr
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PageAction {
    #[default]
    Connect,
    Delete,
}

/// Form submitted by the inspector page.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageForm {
    /// Database URL typed in the sidebar.
    #[serde(default)]
    pub url: String,
    /// Pressed button.
    #[serde(default)]
    pub action: PageAction,
}

impl PageForm {
    /// Returns the trimmed URL, or `None` when the field was left empty.
    pub fn url(&self) -> Option<&str> {
        let url = self.url.trim();
        (!url.is_empty()).then_some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_url_counts_as_missing() {
        let form = PageForm {
            url: "   ".to_owned(),
            action: PageAction::Connect,
        };
        assert_eq!(form.url(), None);
    }

    #[test]
    fn url_is_trimmed() {
        let form = PageForm {
            url: " http://localhost:8000 ".to_owned(),
            action: PageAction::Delete,
        };
        assert_eq!(form.url(), Some("http://localhost:8000"));
    }
}
