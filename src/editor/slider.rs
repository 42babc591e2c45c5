//! Scrub editing of numeric literals.
//!
//! Holding the slider modifier with the cursor on a number pops a range
//! control over the token; dragging it rewrites the literal in place while
//! a marked span tracks where the text now lives.

use crate::surface::{MarkId, MarkStyle, Position, Span, Surface, TokenKind};

const SLIDER_STEP: f64 = 1.0;

/// The visible scrub control, positioned in content-space pixels relative
/// to the editor's wrapping container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderControl {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
    pub left: f64,
    pub top: f64,
}

/// At most one scrub in flight: one mark, one control.
#[derive(Debug, Default)]
pub struct SliderEditor {
    mark: Option<MarkId>,
    control: Option<SliderControl>,
}

impl SliderEditor {
    pub fn new() -> Self {
        Self {
            mark: None,
            control: None,
        }
    }

    /// If the cursor is on a number, reset and show the control. Probing
    /// one column past the cursor lets a cursor sitting right before or
    /// inside the literal resolve to it. Anything else is a no-op.
    pub fn activate<S: Surface>(&mut self, surface: &mut S) {
        let cursor = surface.cursor();
        let probe = Position::new(cursor.line, cursor.col + 1);
        let Some(token) = surface.token_at(probe) else {
            return;
        };
        if token.kind != TokenKind::Number {
            return;
        }
        let Ok(value) = token.text.parse::<f64>() else {
            return;
        };

        if let Some(old) = self.mark.take() {
            surface.clear_mark(old);
        }
        let span = Span::on_line(cursor.line, token.start, token.end);
        self.mark = Some(surface.mark_span(span, MarkStyle::ScrubToken));

        // Small values get a fixed band; larger ones scale with the value.
        // The min/max assignment is literal: a negative value flips the
        // ordering, and that ordering is part of the contract.
        let (min, max) = if (-127.0..=127.0).contains(&value) {
            (-127.0, 127.0)
        } else {
            (-value * 2.0, value * 2.0)
        };

        let (x, y) = surface.coords_of(Position::new(cursor.line, token.start));
        let left = x + (token.text.chars().count() as f64 * surface.char_width()) / 2.0;
        let top = y - surface.line_height();

        self.control = Some(SliderControl {
            min,
            max,
            value,
            step: SLIDER_STEP,
            left,
            top,
        });
    }

    /// One control input: replace the marked span's current text with the
    /// new value and re-mark the region it now occupies.
    pub fn input<S: Surface>(&mut self, surface: &mut S, value: f64) {
        if self.control.is_none() {
            return;
        }
        let Some(mark) = self.mark.take() else {
            return;
        };
        let Some(span) = surface.find_mark(mark) else {
            return;
        };
        surface.clear_mark(mark);

        let text = format_value(value);
        surface.replace_range(span, &text);

        let new_span = Span::on_line(
            span.from.line,
            span.from.col,
            span.from.col + text.chars().count(),
        );
        self.mark = Some(surface.mark_span(new_span, MarkStyle::ScrubToken));

        if let Some(control) = &mut self.control {
            control.value = value;
        }
    }

    /// Clear the mark and hide the control.
    pub fn hide<S: Surface>(&mut self, surface: &mut S) {
        if let Some(mark) = self.mark.take() {
            surface.clear_mark(mark);
        }
        self.control = None;
    }

    pub fn control(&self) -> Option<&SliderControl> {
        self.control.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.control.is_some()
    }
}

/// Decimal string form of a scrubbed value; whole numbers drop the point.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
