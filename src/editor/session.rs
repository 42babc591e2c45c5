//! Per-tab document sessions.
//!
//! The session keeps the editing surface's content, undo history and view
//! position in lock-step with the host's notion of "active tab". The host
//! owns the tab list; the session reads the active tab and pushes changes
//! back through the [`Host`] callbacks. Undo state must never leak between
//! tabs: switching installs the stored history for the incoming key or
//! clears it outright.

use crate::config::Settings;
use crate::surface::{History, Surface};
use crate::syntax::CallNode;

use super::highlight::{HighlightBox, HighlightRect, LineRange};
use super::hover::HoverInspector;
use super::lessons::Lessons;
use super::poller::{HighlightPoll, PollState};
use super::slider::{SliderControl, SliderEditor};
use super::tab::{HostState, ScrollData};

/// Marker text for a freshly created cartridge; loading it installs the
/// blank template instead.
pub const NEW_CART_SENTINEL: &str = "PERCH NEW";

/// Prefix marking lesson content pushed by the tutorial.
pub const LESSON_PREFIX: &str = "PERCH LESSON";

pub const BLANK_TEMPLATE: &str = "\
// new cartridge

init = () => {
}

update = () => {
}

draw = () => {
  clear()
}
";

/// Callbacks into the host application.
pub trait Host {
    /// A content change in the surface, carrying the full new text.
    fn update_content(&mut self, text: &str);
    /// Persist the outgoing tab's undo log.
    fn save_history(&mut self, key: &str, history: History);
    /// Persist the outgoing tab's scroll offsets and cursor.
    fn save_scroll(&mut self, key: &str, scroll: ScrollData);
    /// The call expression under the mouse changed, or left.
    fn set_call_under_mouse(&mut self, key: &str, call: Option<CallNode>);
}

pub struct Session<S: Surface, H: Host> {
    surface: S,
    host: H,
    state: HostState,
    settings: Settings,
    lessons: Lessons,
    slider: SliderEditor,
    hover: HoverInspector,
    highlight: HighlightBox,
    poll: HighlightPoll,
}

impl<S: Surface, H: Host> Session<S, H> {
    /// Initial activation: install the active tab's content, history and
    /// view position, then focus the surface. The install is not a local
    /// edit, so nothing is reported.
    pub fn mount(mut surface: S, host: H, state: HostState, settings: Settings) -> Self {
        let tab = state.active_tab();
        surface.set_text(&tab.text);
        surface.take_changed();
        match state.histories.get(&tab.key) {
            Some(history) => surface.set_history(history.clone()),
            None => surface.clear_history(),
        }
        if let Some(scroll) = &tab.scroll_data {
            surface.scroll_to(scroll.left, scroll.top);
            surface.set_cursor(scroll.cursor_position);
        } else {
            surface.scroll_to(0.0, 0.0);
        }
        surface.focus();

        Self {
            surface,
            host,
            state,
            settings,
            lessons: Lessons::bundled(),
            slider: SliderEditor::new(),
            hover: HoverInspector::new(),
            highlight: HighlightBox::new(),
            poll: HighlightPoll::new(),
        }
    }

    /// React to a host state change: special-content loads, tab switches,
    /// and error-line reports, in that order.
    pub fn update(&mut self, next: HostState) {
        let incoming = next.active_tab();
        if incoming.text == NEW_CART_SENTINEL {
            self.set_contents(BLANK_TEMPLATE);
            self.surface.clear_history();
        } else if let Some(lesson) = incoming.text.strip_prefix(LESSON_PREFIX) {
            self.set_contents(lesson);
            if let Some(tutorial) = &next.tutorial {
                if let Some(range) = self.lessons.lines_to_highlight(tutorial) {
                    self.highlight.show(&mut self.surface, &range);
                }
            }
        } else if self.state.active_tab().key != incoming.key {
            // Save the outgoing tab before anything of the new tab lands,
            // or its initial scroll and history get attributed to the old
            // key.
            self.save_view_state();
            self.set_contents(&incoming.text);
            match next.histories.get(&incoming.key) {
                Some(history) => self.surface.set_history(history.clone()),
                None => self.surface.clear_history(),
            }
            if let Some(scroll) = &incoming.scroll_data {
                self.surface.scroll_to(scroll.left, scroll.top);
                self.surface.set_cursor(scroll.cursor_position);
            } else {
                // A tab with no stored view starts at the top left.
                self.surface.scroll_to(0.0, 0.0);
            }
            self.surface.focus();
        }

        if next.error_line != self.state.error_line {
            if let Some(error) = next.error_line {
                // The readiness check runs against the state the session
                // still holds; the poller's ticks see the updated state.
                if self.content_current() {
                    self.highlight_line(error.line);
                } else {
                    self.poll.begin(error.line);
                }
            }
        }

        self.state = next;
    }

    /// Final deactivation: persist the active tab's view state.
    pub fn unmount(&mut self) {
        self.save_view_state();
    }

    fn save_view_state(&mut self) {
        let key = self.state.active_tab().key.clone();
        self.host.save_history(&key, self.surface.history());
        let (left, top) = self.surface.scroll();
        self.host.save_scroll(
            &key,
            ScrollData {
                top,
                left,
                cursor_position: self.surface.cursor(),
            },
        );
    }

    /// Install content programmatically. Reports through the same change
    /// path as local typing, as the widget's change event would.
    pub fn set_contents(&mut self, text: &str) {
        self.surface.set_text(text);
        self.surface.refresh();
        self.pump();
    }

    /// Drain the surface's change flag: the single fan-out point for
    /// content changes. Editing invalidates the highlight's line mapping,
    /// so the overlay hides first.
    pub fn pump(&mut self) {
        if self.surface.take_changed() {
            self.highlight.hide();
            self.host.update_content(&self.surface.text());
        }
    }

    fn content_current(&self) -> bool {
        self.surface.text() == self.state.active_tab().text
    }

    /// One poller timer tick.
    pub fn poll_tick(&mut self) {
        if !self.poll.is_active() {
            return;
        }
        let ready = self.content_current();
        if let Some(line) = self.poll.tick(ready) {
            self.highlight_line(line);
        }
    }

    fn highlight_line(&mut self, line: usize) {
        self.highlight
            .show(&mut self.surface, &LineRange::single(line));
    }

    // Input-facing operations

    pub fn activate_slider(&mut self) {
        self.slider.activate(&mut self.surface);
    }

    pub fn slider_input(&mut self, value: f64) {
        self.slider.input(&mut self.surface, value);
        self.pump();
    }

    pub fn hide_slider(&mut self) {
        self.slider.hide(&mut self.surface);
    }

    /// Mouse moved to viewport pixel `(x, y)`. `modifier_held` is the hover
    /// modifier's state on this exact event, so releasing it mid-sequence
    /// clears on the next move.
    pub fn hover_at(&mut self, x: f64, y: f64, modifier_held: bool) {
        let tab = self.state.active_tab().clone();
        if modifier_held {
            let (left, top) = self.surface.scroll();
            self.hover
                .inspect(&mut self.surface, &mut self.host, &tab, x + left, y + top);
        } else {
            self.hover.dismiss(&mut self.surface, &mut self.host, &tab);
        }
    }

    // Accessors

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn slider_control(&self) -> Option<&SliderControl> {
        self.slider.control()
    }

    pub fn highlight_rect(&self) -> Option<HighlightRect> {
        self.highlight.rect()
    }

    pub fn poll_state(&self) -> PollState {
        self.poll.state()
    }
}
