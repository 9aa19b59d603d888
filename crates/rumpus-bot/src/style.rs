//! Outbound text styling.

/// Markup styles the service renders in chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bold,
    Italic,
    Code,
}

impl Style {
    /// Wrap text in the style's markup.
    pub fn apply(self, text: &str) -> String {
        match self {
            Style::Bold => format!("*{}*", text),
            Style::Italic => format!("_{}_", text),
            Style::Code => format!("`{}`", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_markup() {
        assert_eq!(Style::Bold.apply("hi"), "*hi*");
        assert_eq!(Style::Italic.apply("hi"), "_hi_");
        assert_eq!(Style::Code.apply("hi"), "`hi`");
    }
}
