mod driver;
mod highlight;
mod hover;
mod lessons;
mod poller;
mod session;
mod slider;
mod tab;

pub use driver::run;
pub use highlight::{HighlightBox, HighlightRect, LineRange};
pub use hover::HoverInspector;
pub use lessons::{Lesson, Lessons, Slide};
pub use poller::{HighlightPoll, MAX_ATTEMPTS, POLL_INTERVAL_MS, PollState};
pub use session::{BLANK_TEMPLATE, Host, LESSON_PREFIX, NEW_CART_SENTINEL, Session};
pub use slider::{SliderControl, SliderEditor};
pub use tab::{DocHistories, ErrorLine, HostState, ScrollData, Tab, Tutorial};

#[cfg(test)]
pub(crate) use session::testing;
