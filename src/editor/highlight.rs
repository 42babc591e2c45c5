//! Line-range highlight overlay.
//!
//! Tutorial slides and runtime error reports both point at source lines;
//! the overlay is a rectangle sized to the visible text of those lines,
//! anchored as an in-flow widget so it moves with the document.

use crate::surface::{Position, Surface};

const WIDTH_PAD: f64 = 8.0;
const HEIGHT_PAD: f64 = 6.0;
const SCROLL_MARGIN: f64 = 40.0;

/// A closed range of line numbers in the original "first" / "first-last"
/// string form. Callers may pass a single line, and the range may be
/// inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRange {
    lines: Vec<usize>,
}

impl LineRange {
    pub fn parse(s: &str) -> Option<Self> {
        let lines = s
            .split('-')
            .map(|part| part.trim().parse().ok())
            .collect::<Option<Vec<usize>>>()?;
        if lines.is_empty() {
            return None;
        }
        Some(Self { lines })
    }

    pub fn single(line: usize) -> Self {
        Self { lines: vec![line] }
    }

    pub fn first(&self) -> usize {
        self.lines[0]
    }

    pub fn last(&self) -> usize {
        *self.lines.last().expect("Line range is never empty")
    }

    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.iter().copied()
    }
}

/// Overlay box in content-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The single highlight overlay. Hidden on every local edit, since editing
/// invalidates the highlighted span's line mapping.
#[derive(Debug, Default)]
pub struct HighlightBox {
    rect: Option<HighlightRect>,
}

impl HighlightBox {
    pub fn new() -> Self {
        Self { rect: None }
    }

    pub fn show<S: Surface>(&mut self, surface: &mut S, range: &LineRange) {
        let lines: Vec<String> = range
            .lines()
            .map(|i| surface.line(i).unwrap_or_default())
            .collect();
        let Some(first_line) = lines.first() else {
            return;
        };
        let inset = first_line
            .chars()
            .take_while(|c| c.is_whitespace())
            .count();

        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let cols = widest.saturating_sub(inset) + 1;
        let width = cols as f64 * surface.char_width() + WIDTH_PAD;

        let first = range.first();
        let last = range.last();
        let spanned = (1 + last as isize - first as isize).max(0) as f64;
        let height = surface.line_height() * spanned + HEIGHT_PAD;

        let anchor = Position::new(first, inset);
        surface.place_widget(anchor);
        let (left, top) = surface.coords_of(anchor);
        self.rect = Some(HighlightRect {
            left,
            top,
            width,
            height,
        });

        surface.scroll_into_view(Position::new(last, 0), SCROLL_MARGIN);
    }

    pub fn hide(&mut self) {
        self.rect = None;
    }

    pub fn rect(&self) -> Option<HighlightRect> {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.rect.is_some()
    }
}
