//! Async event loop driving a session.

use std::time::Duration;

use crossterm::event::Event;
use futures::{Stream, StreamExt};
use tokio::time;

use crate::input;
use crate::surface::Surface;

use super::poller::POLL_INTERVAL_MS;
use super::session::{Host, Session};

/// Drive a session until the event stream closes, then save its view state.
///
/// The poll interval keeps ticking whether or not a highlight is pending;
/// idle ticks are free. Ending the loop is the one place session state gets
/// torn down, so the global key-up routing cannot outlive the surface.
pub async fn run<S, H, E>(mut session: Session<S, H>, mut events: E) -> Session<S, H>
where
    S: Surface,
    H: Host,
    E: Stream<Item = Event> + Unpin,
{
    let mut poll = time::interval(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(event) => input::handle_event(&mut session, event),
                    None => break,
                }
            }
            _ = poll.tick() => {
                session.poll_tick();
            }
        }
    }

    session.unmount();
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};
    use futures::channel::mpsc;

    use crate::config::Settings;
    use crate::editor::testing::{HostEvent, RecordingHost};
    use crate::editor::{ErrorLine, HostState, PollState, Tab};
    use crate::surface::{MemorySurface, Position};

    fn one_tab(text: &str) -> HostState {
        HostState::new(vec![Tab::new("code", text)], 0)
    }

    fn mounted(state: HostState) -> Session<MemorySurface, RecordingHost> {
        Session::mount(
            MemorySurface::new(),
            RecordingHost::default(),
            state,
            Settings::default(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn highlights_once_content_becomes_current() {
        let mut session = mounted(one_tab("circle(64, 48, 12)"));
        session.surface_mut().insert(Position::new(0, 0), "// wip\n");
        session.pump();

        // The error report lands in the same update that acknowledges the
        // edit: stale at report time, current by the first tick.
        let mut next = one_tab("circle(64, 48, 12)");
        next.tabs[0].text = session.surface().text();
        next.error_line = Some(ErrorLine { line: 1 });
        session.update(next);
        assert!(matches!(session.poll_state(), PollState::Polling { .. }));

        let (tx, rx) = mpsc::unbounded();
        let handle = tokio::spawn(run(session, rx));
        time::advance(Duration::from_millis(300)).await;
        drop(tx);

        let session = handle.await.unwrap();
        assert!(session.highlight_rect().is_some());
        assert_eq!(session.poll_state(), PollState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_when_content_never_arrives() {
        let mut session = mounted(one_tab("circle(64, 48, 12)"));
        session.surface_mut().insert(Position::new(0, 0), "// wip\n");
        session.pump();

        // The host never acknowledges, so the surface stays ahead.
        let mut next = one_tab("circle(64, 48, 12)");
        next.error_line = Some(ErrorLine { line: 0 });
        session.update(next);

        let (tx, rx) = mpsc::unbounded();
        let handle = tokio::spawn(run(session, rx));
        time::advance(Duration::from_millis(2500)).await;
        drop(tx);

        let session = handle.await.unwrap();
        assert!(session.highlight_rect().is_none());
        assert_eq!(session.poll_state(), PollState::Idle);
    }

    #[tokio::test]
    async fn events_route_through_the_session() {
        let session = mounted(one_tab("f(g(1,2))"));
        let (tx, rx) = mpsc::unbounded();
        tx.unbounded_send(crossterm::event::Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 4,
            row: 0,
            modifiers: KeyModifiers::CONTROL,
        }))
        .unwrap();
        drop(tx);

        let session = run(session, rx).await;
        assert!(matches!(
            session.host().last_call(),
            Some(HostEvent::Call(_, Some(_)))
        ));
    }

    #[tokio::test]
    async fn stream_end_saves_view_state() {
        let (tx, rx) = mpsc::unbounded();
        drop(tx);
        let session = run(mounted(one_tab("beep(440)")), rx).await;
        assert!(session.host().saved_scroll("code").is_some());
        assert!(session.host().saved_history("code").is_some());
    }
}
