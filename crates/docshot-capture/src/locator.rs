//! Element locators understood by preview pages

/// How to find an element on the preview page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// First element matching a CSS selector (selector lists allowed)
    Css(String),

    /// First `<button>` whose text contains any of the labels, ignoring case.
    ///
    /// Holding several labels lets one locator cover localized variants of
    /// the same button.
    ButtonText(Vec<String>),
}

impl Locator {
    /// Locate by CSS selector
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Locate a button by any of its possible labels
    pub fn button_text<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ButtonText(labels.into_iter().map(Into::into).collect())
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(selector) => write!(f, "{}", selector),
            Self::ButtonText(labels) => write!(f, "button with text {}", labels.join(" | ")),
        }
    }
}
