use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use finger_dice::config::SessionConfig;
use finger_dice::error::TimerError;
use finger_dice::model::{Color, DrawResult, Mode, TouchId, TouchPoint};
use finger_dice::state::{ManualTimers, TouchSession};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Clone, Debug)]
enum Step {
    Down(i32),
    Move(i32),
    Up(i32),
    Wait(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..8i32).prop_map(Step::Down),
        (0..8i32).prop_map(Step::Move),
        (0..8i32).prop_map(Step::Up),
        (100..3000u64).prop_map(Step::Wait),
    ]
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::SinglePick), Just(Mode::GroupSplit)]
}

/// What one timer fire did to the countdown.
struct Fire {
    was_countdown: bool,
    before: u32,
    after: u32,
    drew: bool,
}

proptest! {
    #[test]
    fn random_input_keeps_session_invariants(
        mode in mode(),
        seed in any::<u64>(),
        steps in proptest::collection::vec(step(), 1..80),
    ) {
        let mut session = TouchSession::new(mode, SessionConfig::default(), StdRng::seed_from_u64(seed));
        let mut timers = ManualTimers::new();
        // fingers the session should be tracking while no result is up
        let mut down: BTreeSet<i32> = BTreeSet::new();
        let mut seen_colors: BTreeMap<TouchId, Color> = BTreeMap::new();

        for step in steps {
            let frozen = session.result().cloned();
            match step {
                Step::Down(id) => {
                    session.touch_start(&[TouchPoint::new(id, 1.0, 1.0)], &mut timers).unwrap();
                    if session.result().is_none() {
                        down.insert(id);
                    }
                }
                Step::Move(id) => session.touch_move(&[TouchPoint::new(id, 2.0, 2.0)]),
                Step::Up(id) => {
                    session.touch_end(&[TouchPoint::new(id, 0.0, 0.0)], &mut timers);
                    if session.result().is_none() {
                        down.remove(&id);
                    }
                }
                Step::Wait(ms) => {
                    let mut fires = Vec::new();
                    timers.advance(Duration::from_millis(ms), |t, id| {
                        let was_countdown = session.countdown_timer() == Some(id);
                        let before = session.countdown();
                        let had_result = session.result().is_some();
                        session.on_timer(id, t)?;
                        fires.push(Fire {
                            was_countdown,
                            before,
                            after: session.countdown(),
                            drew: !had_result && session.result().is_some(),
                        });
                        Ok::<(), TimerError>(())
                    }).unwrap();
                    for fire in fires {
                        if fire.was_countdown {
                            prop_assert!(fire.before >= 1);
                            prop_assert_eq!(fire.after, fire.before - 1);
                            prop_assert_eq!(fire.drew, fire.before == 1);
                        } else {
                            prop_assert!(!fire.drew);
                        }
                    }
                    // timers only ever take fingers away all at once
                    if session.touches().is_empty() {
                        down.clear();
                    }
                }
            }

            if let Some(result) = session.result() {
                prop_assert!(session.touches().is_empty());
                if let Some(frozen) = &frozen {
                    prop_assert_eq!(frozen, result);
                }
                down.clear();
                seen_colors.clear();
                continue;
            }

            let tracked: BTreeSet<i32> = session.touches().keys().map(|id| id.0).collect();
            prop_assert_eq!(&tracked, &down);
            for id in session.touches().keys() {
                let color = session.colors().get(id).cloned();
                prop_assert!(color.is_some());
                let first = seen_colors.entry(*id).or_insert_with(|| color.clone().unwrap_or_else(Color::fallback));
                prop_assert_eq!(Some(first.clone()), color);
            }
            seen_colors.retain(|id, _| session.touches().contains_key(id));
        }
    }

    #[test]
    fn draws_respect_membership_and_balance(
        mode in mode(),
        seed in any::<u64>(),
        ids in proptest::collection::btree_set(0..1000i32, 1..12),
    ) {
        let mut session = TouchSession::new(mode, SessionConfig::default(), StdRng::seed_from_u64(seed));
        let mut timers = ManualTimers::new();
        let points: Vec<TouchPoint> = ids.iter().map(|&id| TouchPoint::new(id, f64::from(id), 0.0)).collect();
        session.touch_start(&points, &mut timers).unwrap();
        let tick = session.countdown_timer().unwrap();
        timers.advance(Duration::from_secs(10), |t, id| session.on_timer(id, t)).unwrap();

        let result = session.result().cloned().unwrap();
        match &result {
            DrawResult::Single(winner) => {
                prop_assert!(ids.contains(&winner.id.0));
                prop_assert_eq!(winner.position.x, f64::from(winner.id.0));
                if ids.len() == 1 {
                    prop_assert_eq!(Some(&winner.id.0), ids.iter().next());
                }
            }
            DrawResult::Groups(members) => {
                let drawn: BTreeSet<i32> = members.keys().map(|id| id.0).collect();
                prop_assert_eq!(&drawn, &ids);
                for (id, member) in members {
                    prop_assert_eq!(member.position.x, f64::from(id.0));
                }
                let (a, b) = result.team_sizes();
                prop_assert_eq!(a + b, ids.len());
                prop_assert!(a.abs_diff(b) <= 1);
            }
        }

        // racing ticks from the finished countdown never draw again
        for _ in 0..3 {
            session.on_timer(tick, &mut timers).unwrap();
        }
        prop_assert_eq!(session.result().cloned(), Some(result));
        prop_assert_eq!(session.countdown(), 0);
    }
}
