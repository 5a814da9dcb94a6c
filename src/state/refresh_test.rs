use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;

use super::*;
use crate::state::pull::{PullController, PullEffect, PullEvent, Surface};

/// Records every sleep and every action call on one timeline.
#[derive(Default)]
struct Timeline {
    entries: RefCell<Vec<String>>,
}

impl Timeline {
    fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    fn snapshot(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

struct RecordingClock(Rc<Timeline>);

impl Clock for RecordingClock {
    async fn sleep(&self, ms: u32) {
        self.0.push(format!("sleep {ms}"));
    }
}

#[test]
fn cycle_holds_spinner_then_runs_action_then_settles() {
    let timeline = Rc::new(Timeline::default());
    let clock = RecordingClock(Rc::clone(&timeline));
    let action_log = Rc::clone(&timeline);

    let outcome = block_on(run_refresh_cycle(&clock, PullOptions::default(), move || async move {
        action_log.push("action");
        Ok(())
    }));

    assert_eq!(outcome, Ok(()));
    assert_eq!(timeline.snapshot(), vec!["sleep 800", "action", "sleep 200"]);
}

#[test]
fn failed_action_still_settles_and_reports_error() {
    let timeline = Rc::new(Timeline::default());
    let clock = RecordingClock(Rc::clone(&timeline));

    let outcome = block_on(run_refresh_cycle(&clock, PullOptions::default(), || async {
        Err(BehaviorError::Refresh("offline".into()))
    }));

    assert_eq!(outcome, Err(BehaviorError::Refresh("offline".into())));
    assert_eq!(timeline.snapshot(), vec!["sleep 800", "sleep 200"]);
}

#[test]
fn custom_timings_are_honored() {
    let timeline = Rc::new(Timeline::default());
    let clock = RecordingClock(Rc::clone(&timeline));
    let options = PullOptions { min_spinner_ms: 10, settle_ms: 0, ..PullOptions::default() };

    block_on(run_refresh_cycle(&clock, options, || async { Ok(()) })).expect("ok");
    assert_eq!(timeline.snapshot(), vec!["sleep 10", "sleep 0"]);
}

#[test]
fn controller_stays_refreshing_until_cycle_completes() {
    let timeline = Rc::new(Timeline::default());
    let clock = RecordingClock(Rc::clone(&timeline));
    let ctl = Rc::new(RefCell::new(PullController::new(PullOptions::default())));

    {
        let mut c = ctl.borrow_mut();
        c.dispatch(PullEvent::PointerDown { y: 0.0 }, Surface::at_top());
        c.dispatch(PullEvent::PointerMove { y: 400.0 }, Surface::at_top());
        let fx = c.dispatch(PullEvent::PointerUp, Surface::at_top());
        assert_eq!(fx.iter().filter(|e| **e == PullEffect::BeginRefresh).count(), 1);
    }

    let calls = Rc::new(RefCell::new(0_u32));
    let observed = Rc::clone(&ctl);
    let counter = Rc::clone(&calls);
    let outcome = block_on(run_refresh_cycle(&clock, PullOptions::default(), move || async move {
        *counter.borrow_mut() += 1;
        assert!(observed.borrow().is_refreshing());
        Err(BehaviorError::Refresh("boom".into()))
    }));

    assert!(outcome.is_err());
    assert!(ctl.borrow().is_refreshing());
    assert_eq!(ctl.borrow_mut().finish_refresh(), vec![PullEffect::Reset]);
    assert_eq!(*calls.borrow(), 1);
    assert!(!ctl.borrow().is_refreshing());
}
