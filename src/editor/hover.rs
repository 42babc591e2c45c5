//! Call-expression inspection under the mouse.
//!
//! While the hover modifier is held, every mouse move resolves the smallest
//! call expression enclosing the pointer, highlights it, and reports it to
//! the host for the call-graph panel. Anything that goes wrong degrades to
//! "no call under mouse".

use crate::surface::{MarkId, MarkStyle, Position, Span, Surface};
use crate::syntax::{ScriptParser, smallest_call_at};

use super::session::Host;
use super::tab::Tab;

/// At most one hover mark at a time.
pub struct HoverInspector {
    parser: Option<ScriptParser>,
    mark: Option<MarkId>,
}

impl HoverInspector {
    pub fn new() -> Self {
        // A grammar that fails to load leaves inspection permanently inert
        // rather than taking the session down.
        let parser = match ScriptParser::new() {
            Ok(parser) => Some(parser),
            Err(err) => {
                eprintln!("[syntax] {}", err);
                None
            }
        };
        Self { parser, mark: None }
    }

    /// A qualifying mouse move: the pointer is at content-space `(x, y)`
    /// and the modifier is held. Parses the tab's stored text, not the
    /// surface, so in-flight keystrokes cannot tear the tree.
    pub fn inspect<S: Surface, H: Host>(
        &mut self,
        surface: &mut S,
        host: &mut H,
        tab: &Tab,
        x: f64,
        y: f64,
    ) {
        let Some(pos) = surface.position_at(x, y) else {
            self.clear(surface);
            host.set_call_under_mouse(&tab.key, None);
            return;
        };

        let found = self
            .parser
            .as_mut()
            .and_then(|parser| parser.parse(&tab.text))
            .and_then(|tree| smallest_call_at(&tree, pos));

        self.clear(surface);
        if let Some(call) = &found {
            let span = Span::new(
                Position::new(call.start.line - 1, call.start.col),
                Position::new(call.end.line - 1, call.end.col),
            );
            self.mark = Some(surface.mark_span(span, MarkStyle::CallRange));
        }
        host.set_call_under_mouse(&tab.key, found);
    }

    /// A non-qualifying move (modifier not held): always clear, so a
    /// release mid-hold fails safe.
    pub fn dismiss<S: Surface, H: Host>(&mut self, surface: &mut S, host: &mut H, tab: &Tab) {
        self.clear(surface);
        host.set_call_under_mouse(&tab.key, None);
    }

    fn clear<S: Surface>(&mut self, surface: &mut S) {
        if let Some(id) = self.mark.take() {
            surface.clear_mark(id);
        }
    }

    pub fn has_mark(&self) -> bool {
        self.mark.is_some()
    }
}

impl Default for HoverInspector {
    fn default() -> Self {
        Self::new()
    }
}
