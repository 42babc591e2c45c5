use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

use crate::editor::{Host, Session};
use crate::surface::Surface;

pub fn handle_event<S: Surface, H: Host>(session: &mut Session<S, H>, event: Event) {
    match event {
        Event::Key(key) => handle_key(session, key),
        Event::Mouse(mouse) => handle_mouse(session, mouse),
        _ => {}
    }
    // Whatever the event did to the surface, report it exactly once.
    session.pump();
}

fn handle_key<S: Surface, H: Host>(session: &mut Session<S, H>, key: KeyEvent) {
    let KeyCode::Modifier(code) = key.code else {
        return;
    };
    let slider = session.settings().slider_modifier;
    match key.kind {
        KeyEventKind::Press => {
            if slider.matches_key(code) {
                session.activate_slider();
            }
        }
        // Releases are routed globally, whether or not the surface has
        // focus, so the control cannot get stuck visible.
        KeyEventKind::Release => {
            if slider.matches_key(code) {
                session.hide_slider();
            }
        }
        KeyEventKind::Repeat => {}
    }
}

fn handle_mouse<S: Surface, H: Host>(session: &mut Session<S, H>, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Moved {
        return;
    }
    let x = mouse.column as f64 * session.surface().char_width();
    let y = mouse.row as f64 * session.surface().line_height();
    let held = session
        .settings()
        .hover_modifier
        .matches_flags(mouse.modifiers);
    session.hover_at(x, y, held);
}
