//! Grid patterns: the column separator and the three row rulers.

/// The separators drawn between table cells.
///
/// Rulers are patterns repeated to each column's width; an empty ruler
/// suppresses that rule line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Drawn between adjacent columns on every line.
    pub column_sep: String,
    /// Rule between the header and the first body row.
    pub header_ruler: String,
    /// Rule between body rows.
    pub body_ruler: String,
    /// Rule between the last body row and the footer.
    pub footer_ruler: String,
}

impl Grid {
    pub fn new(
        column_sep: impl Into<String>,
        header_ruler: impl Into<String>,
        body_ruler: impl Into<String>,
        footer_ruler: impl Into<String>,
    ) -> Self {
        Grid {
            column_sep: column_sep.into(),
            header_ruler: header_ruler.into(),
            body_ruler: body_ruler.into(),
            footer_ruler: footer_ruler.into(),
        }
    }

    /// Single-space gutters, no rulers.
    pub fn plain() -> Self {
        Self::new(" ", "", "", "")
    }

    /// ASCII pipes with `=` around the body and `-` between rows.
    pub fn ascii() -> Self {
        Self::new(" | ", "=", "-", "=")
    }

    /// Box-drawing pipes with light rules around the body.
    pub fn light() -> Self {
        Self::new(" │ ", "─", "", "─")
    }

    /// Two-space gutters with light rules around the body.
    pub fn soft() -> Self {
        Self::new("  ", "─", "", "─")
    }

    /// The ruler separating the header from the body; falls back to the body
    /// ruler when no header ruler is set.
    pub fn effective_header_ruler(&self) -> &str {
        if self.header_ruler.is_empty() {
            &self.body_ruler
        } else {
            &self.header_ruler
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::ascii()
    }
}
