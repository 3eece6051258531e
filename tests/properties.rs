//! Property tests for the pure building blocks

use blob_arena::input::{Direction, Intent};
use blob_arena::schedule::{Scheduler, Timer};
use blob_arena::sim::{Blob, Collision};
use blob_arena::Color;
use glam::Vec2;
use proptest::prelude::*;

fn blob(id: u32, x: f32, y: f32, radius: f32) -> Blob {
    Blob::new(id, Vec2::new(x, y), radius, Color::new(10, 20, 30))
}

fn coord() -> impl Strategy<Value = f32> {
    -2000.0f32..2000.0
}

fn radius() -> impl Strategy<Value = f32> {
    0.5f32..200.0
}

proptest! {
    #[test]
    fn overlap_is_symmetric(
        ax in coord(), ay in coord(), ar in radius(),
        bx in coord(), by in coord(), br in radius(),
    ) {
        let a = blob(1, ax, ay, ar);
        let b = blob(2, bx, by, br);
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn collision_has_one_winner_that_grows(ar in radius(), br in radius()) {
        let mut a = blob(1, 0.0, 0.0, ar);
        let mut b = blob(2, 1.0, 1.0, br);
        let outcome = a.collide_with(&mut b);

        prop_assert!(a.alive != b.alive);
        match outcome {
            Collision::Won => {
                prop_assert!(ar > br);
                prop_assert!(a.alive);
                prop_assert_eq!(a.radius, ar + 1.0);
                prop_assert_eq!(b.radius, br);
            }
            Collision::Lost => {
                prop_assert!(ar <= br);
                prop_assert!(b.alive);
                prop_assert_eq!(b.radius, br + 1.0);
                prop_assert_eq!(a.radius, ar);
            }
        }
    }

    #[test]
    fn speed_never_negative_and_never_grows_with_size(r1 in 0.0f32..1000.0, r2 in 0.0f32..1000.0) {
        let (small, big) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        prop_assert!(Blob::speed_for_radius(big) >= 0.0);
        prop_assert!(Blob::speed_for_radius(small) >= Blob::speed_for_radius(big));
    }

    #[test]
    fn intent_stays_inside_bounds(
        max in 1i32..12,
        presses in proptest::collection::vec(0usize..4, 0..200),
    ) {
        let mut intent = Intent::new(max);
        for index in presses {
            let before = (intent.x, intent.y);
            let changed = intent.apply(Direction::ALL[index]);
            prop_assert_eq!(changed, before != (intent.x, intent.y));
            prop_assert!(intent.x.abs() < max);
            prop_assert!(intent.y.abs() < max);
        }
    }

    #[test]
    fn clock_text_reads_back_as_seconds(seconds in 0u64..200_000) {
        let mut timer = Timer::default();
        for _ in 0..seconds {
            timer.tick();
        }
        let text = timer.time();
        let parts: Vec<u64> = text.split(':').map(|p| p.parse().unwrap()).collect();
        let total = parts.iter().fold(0, |acc, part| acc * 60 + part);
        prop_assert_eq!(total, seconds);

        if seconds < 3600 {
            prop_assert_eq!(parts.len(), 2);
        } else {
            prop_assert_eq!(parts.len(), 3);
            prop_assert!(parts[1] < 60);
        }
        prop_assert!(parts[parts.len() - 1] < 60);
    }

    #[test]
    fn scheduler_delivers_exact_count_at_integer_rates(rate in 1u32..=60, seconds in 1u64..=5) {
        let mut scheduler = Scheduler::new(0.0);
        scheduler.add("job", rate as f64, ());
        let until = seconds as f64 * 1000.0;

        let mut count = 0u64;
        let mut last = scheduler.now();
        while scheduler.next_due(until).is_some() {
            prop_assert!(scheduler.now() >= last);
            last = scheduler.now();
            count += 1;
        }
        prop_assert_eq!(count, seconds * rate as u64);
        prop_assert_eq!(scheduler.intervals()[0].rate(), rate);
        prop_assert_eq!(scheduler.now(), until);
    }

    #[test]
    fn stalled_ticks_are_dropped(rate in 1u32..=60, stall_ms in 0u32..5000) {
        let mut scheduler = Scheduler::new(0.0);
        scheduler.add("job", rate as f64, ());
        scheduler.stall_to(stall_ms as f64);

        let mut count = 0u64;
        while scheduler.next_due(stall_ms as f64).is_some() {
            count += 1;
        }
        prop_assert_eq!(count, 0);
        prop_assert!(scheduler.next_due(stall_ms as f64 + 1000.0).is_some());
    }
}
