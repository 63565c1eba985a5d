//! Input page segmentation

use crate::cli::PageBreakArg;

/// Split raw file text into document pages per the requested mode.
///
/// Pages that are empty after trimming are dropped (a trailing form feed or
/// doubled blank line should not create phantom pages).
pub fn split_pages(text: &str, mode: PageBreakArg) -> Vec<String> {
    match mode {
        PageBreakArg::None => vec![text.to_string()],
        PageBreakArg::Formfeed => text
            .split('\u{000C}')
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string)
            .collect(),
        PageBreakArg::Blank => text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_single_page() {
        let pages = split_pages("a\u{000C}b", PageBreakArg::None);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_formfeed_split() {
        let pages = split_pages("page one\u{000C}page two\u{000C}", PageBreakArg::Formfeed);
        assert_eq!(pages, vec!["page one".to_string(), "page two".to_string()]);
    }

    #[test]
    fn test_blank_line_split() {
        let pages = split_pages("alpha\n\nbeta\n\n\n\ngamma", PageBreakArg::Blank);
        assert_eq!(pages.len(), 3);
    }
}
