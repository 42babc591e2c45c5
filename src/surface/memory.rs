//! In-memory reference implementation of the editing surface.
//!
//! Backs the controller tests and any headless host. Geometry uses a fixed
//! character cell so pixel math stays deterministic.

use std::collections::HashMap;

use ropey::Rope;

use super::{History, HistoryEdit, MarkId, MarkStyle, Position, Span, Surface, Token, TokenKind};

pub const CHAR_WIDTH: f64 = 8.0;
pub const LINE_HEIGHT: f64 = 16.0;

const DEFAULT_VIEWPORT_WIDTH: f64 = 640.0;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 480.0;

struct MarkEntry {
    span: Span,
    #[allow(dead_code)]
    style: MarkStyle,
}

pub struct MemorySurface {
    text: Rope,
    cursor: Position,
    scroll_left: f64,
    scroll_top: f64,
    viewport_width: f64,
    viewport_height: f64,
    marks: HashMap<MarkId, MarkEntry>,
    next_mark: MarkId,
    history: History,
    changed: bool,
    focused: bool,
    widget_anchor: Option<Position>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
            cursor: Position::default(),
            scroll_left: 0.0,
            scroll_top: 0.0,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            marks: HashMap::new(),
            next_mark: 0,
            history: History::default(),
            changed: false,
            focused: false,
            widget_anchor: None,
        }
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn widget_anchor(&self) -> Option<Position> {
        self.widget_anchor
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Insert text at a position, as local typing would.
    pub fn insert(&mut self, pos: Position, text: &str) {
        self.replace_range(Span::new(pos, pos), text);
    }

    /// Revert the most recent edit in the log.
    pub fn undo(&mut self) {
        if let Some(edit) = self.history.pop() {
            let end = end_position(edit.at, &edit.inserted);
            let start_idx = self.char_index(edit.at);
            let end_idx = self.char_index(end);
            self.text.remove(start_idx..end_idx);
            self.text.insert(start_idx, &edit.removed);
            self.marks.clear();
            self.clamp_cursor();
            self.changed = true;
        }
    }

    fn char_index(&self, pos: Position) -> usize {
        self.text.line_to_char(pos.line) + pos.col
    }

    fn line_len(&self, idx: usize) -> usize {
        let line = self.text.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn clamp_cursor(&mut self) {
        let last = self.line_count().saturating_sub(1);
        if self.cursor.line > last {
            self.cursor.line = last;
        }
        let len = self.line_len(self.cursor.line);
        if self.cursor.col > len {
            self.cursor.col = len;
        }
    }

    /// Shift or drop marks after text in `span` was replaced, with the
    /// replacement ending at `new_end`.
    fn adjust_marks(&mut self, span: Span, new_end: Position) {
        let line_delta = new_end.line as isize - span.to.line as isize;
        let col_delta = new_end.col as isize - span.to.col as isize;
        self.marks.retain(|_, entry| {
            let mark = &mut entry.span;
            if mark.to <= span.from {
                return true;
            }
            if mark.from < span.to {
                // Span overlaps the edit; its tracked region is gone.
                return false;
            }
            for pos in [&mut mark.from, &mut mark.to] {
                if pos.line == span.to.line {
                    pos.col = (pos.col as isize + col_delta) as usize;
                }
                pos.line = (pos.line as isize + line_delta) as usize;
            }
            true
        });
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for MemorySurface {
    fn text(&self) -> String {
        self.text.to_string()
    }

    fn set_text(&mut self, text: &str) {
        let removed = self.text.to_string();
        self.history.push(HistoryEdit {
            at: Position::default(),
            removed,
            inserted: text.to_string(),
        });
        self.text = Rope::from_str(text);
        self.marks.clear();
        self.cursor = Position::default();
        self.changed = true;
    }

    fn refresh(&mut self) {}

    fn line(&self, index: usize) -> Option<String> {
        if index >= self.line_count() {
            return None;
        }
        let line = self.text.line(index).to_string();
        Some(line.trim_end_matches('\n').to_string())
    }

    fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    fn replace_range(&mut self, span: Span, text: &str) {
        let start_idx = self.char_index(span.from);
        let end_idx = self.char_index(span.to);
        let removed = self.text.slice(start_idx..end_idx).to_string();
        self.text.remove(start_idx..end_idx);
        self.text.insert(start_idx, text);
        self.history.push(HistoryEdit {
            at: span.from,
            removed,
            inserted: text.to_string(),
        });
        let new_end = end_position(span.from, text);
        self.adjust_marks(span, new_end);
        self.clamp_cursor();
        self.changed = true;
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
        self.clamp_cursor();
    }

    fn token_at(&self, pos: Position) -> Option<Token> {
        let line = self.line(pos.line)?;
        let col = pos.col.min(line.chars().count());
        scan_line(&line)
            .into_iter()
            .find(|t| t.start < col && col <= t.end)
    }

    fn mark_span(&mut self, span: Span, style: MarkStyle) -> MarkId {
        let id = self.next_mark;
        self.next_mark += 1;
        self.marks.insert(id, MarkEntry { span, style });
        id
    }

    fn find_mark(&self, id: MarkId) -> Option<Span> {
        self.marks.get(&id).map(|entry| entry.span)
    }

    fn clear_mark(&mut self, id: MarkId) {
        self.marks.remove(&id);
    }

    fn scroll_to(&mut self, left: f64, top: f64) {
        self.scroll_left = left.max(0.0);
        self.scroll_top = top.max(0.0);
    }

    fn scroll(&self) -> (f64, f64) {
        (self.scroll_left, self.scroll_top)
    }

    fn scroll_into_view(&mut self, pos: Position, margin: f64) {
        let (x, y) = self.coords_of(pos);
        if y < self.scroll_top + margin {
            self.scroll_top = (y - margin).max(0.0);
        } else if y + LINE_HEIGHT + margin > self.scroll_top + self.viewport_height {
            self.scroll_top = y + LINE_HEIGHT + margin - self.viewport_height;
        }
        if x < self.scroll_left + margin {
            self.scroll_left = (x - margin).max(0.0);
        }
    }

    fn history(&self) -> History {
        self.history.clone()
    }

    fn set_history(&mut self, history: History) {
        self.history = history;
    }

    fn clear_history(&mut self) {
        self.history = History::default();
    }

    fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn char_width(&self) -> f64 {
        CHAR_WIDTH
    }

    fn line_height(&self) -> f64 {
        LINE_HEIGHT
    }

    fn coords_of(&self, pos: Position) -> (f64, f64) {
        (pos.col as f64 * CHAR_WIDTH, pos.line as f64 * LINE_HEIGHT)
    }

    fn position_at(&self, x: f64, y: f64) -> Option<Position> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let line = (y / LINE_HEIGHT) as usize;
        if line >= self.line_count() {
            return None;
        }
        let col = ((x / CHAR_WIDTH) as usize).min(self.line_len(line));
        Some(Position::new(line, col))
    }

    fn place_widget(&mut self, pos: Position) {
        self.widget_anchor = Some(pos);
    }
}

/// Where `inserted` ends when placed at `start`.
fn end_position(start: Position, inserted: &str) -> Position {
    let newlines = inserted.matches('\n').count();
    if newlines == 0 {
        Position::new(start.line, start.col + inserted.chars().count())
    } else {
        let tail = inserted.rsplit('\n').next().unwrap_or("");
        Position::new(start.line + newlines, tail.chars().count())
    }
}

/// Split a line into lexical tokens. A `-` starts a number only when it
/// directly precedes a digit and does not follow a value (identifier, digit
/// or closing paren), so `a-5` stays an operator while `(-5` scrubs.
fn scan_line(line: &str) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let start = i;
        let c = chars[i];
        let kind = if c.is_whitespace() {
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            TokenKind::Whitespace
        } else if c.is_ascii_digit() || starts_negative_number(&chars, i) {
            if c == '-' {
                i += 1;
            }
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            TokenKind::Number
        } else if c.is_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            TokenKind::Word
        } else {
            i += 1;
            TokenKind::Symbol
        };
        tokens.push(Token {
            kind,
            start,
            end: i,
            text: chars[start..i].iter().collect(),
        });
    }
    tokens
}

fn starts_negative_number(chars: &[char], i: usize) -> bool {
    if chars[i] != '-' {
        return false;
    }
    let digit_follows = chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());
    let value_precedes = i > 0
        && (chars[i - 1].is_alphanumeric() || chars[i - 1] == '_' || chars[i - 1] == ')');
    digit_follows && !value_precedes
}
