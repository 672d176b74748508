use figlet_rs::FIGfont;
use once_cell::sync::OnceCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;
use unicode_width::UnicodeWidthStr;

/// The standard FIGlet font, loaded once.
static STANDARD_FONT: OnceCell<FIGfont> = OnceCell::new();

/// Errors that can occur when generating banners
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    #[error("failed to load font: {0}")]
    FontLoadFailed(String),

    #[error("failed to convert text '{0}' to ASCII art")]
    ConversionFailed(String),
}

fn standard_font() -> Result<&'static FIGfont, BannerError> {
    STANDARD_FONT.get_or_try_init(|| {
        // figlet-rs has been known to panic on some font contents
        match catch_unwind(FIGfont::standard) {
            Ok(Ok(font)) => Ok(font),
            Ok(Err(e)) => Err(BannerError::FontLoadFailed(e)),
            Err(_) => Err(BannerError::FontLoadFailed("panic during font loading".to_string())),
        }
    })
}

/// Generate ASCII art for `text`, without trailing blank lines.
pub(crate) fn generate(text: &str) -> Result<Vec<String>, BannerError> {
    let font = standard_font()?;
    let figure = match catch_unwind(AssertUnwindSafe(|| font.convert(text))) {
        Ok(Some(figure)) => figure.to_string(),
        Ok(None) | Err(_) => return Err(BannerError::ConversionFailed(text.to_string())),
    };
    let mut lines: Vec<String> = figure.lines().map(|line| line.trim_end().to_string()).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    Ok(lines)
}

/// The lines to show as the title, as ASCII art if it fits within `max_width` and as plain text otherwise.
pub(crate) fn title_lines(title: &str, max_width: u16) -> Vec<String> {
    if title.trim().is_empty() {
        return Vec::new();
    }
    match generate(title) {
        Ok(lines) if block_width(&lines) <= usize::from(max_width) => lines,
        Ok(_) => vec![title.to_string()],
        Err(e) => {
            warn!("falling back to plain title: {e}");
            vec![title.to_string()]
        }
    }
}

/// The display width of the widest line.
pub(crate) fn block_width(lines: &[String]) -> usize {
    lines.iter().map(|line| line.width()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_with_standard_font() {
        let lines = generate("Hi").expect("failed to generate");
        assert!(lines.len() > 1);
        assert!(lines.last().is_some_and(|line| !line.is_empty()));
    }

    #[test]
    fn wide_title_falls_back_to_plain() {
        let lines = title_lines("Dynamic Grid", 10);
        assert_eq!(lines, vec!["Dynamic Grid".to_string()]);
    }

    #[test]
    fn title_fits() {
        let lines = title_lines("Grid", 200);
        assert!(lines.len() > 1);
        assert!(block_width(&lines) <= 200);
    }

    #[test]
    fn empty_title() {
        assert!(title_lines("  ", 80).is_empty());
    }
}
