// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_after_2020() {
    // 2020-01-01T00:00:00Z
    assert!(SystemClock.epoch_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_advances_shared_time() {
    let clock = FakeClock::at(5_000);
    let other = clock.clone();
    other.advance(Duration::from_secs(65));
    assert_eq!(clock.epoch_ms(), 70_000);
}

#[test]
fn elapsed_ms_measures_from_start() {
    let clock = FakeClock::at(10_000);
    let start = clock.epoch_ms();
    clock.advance(Duration::from_millis(3_700_000));
    assert_eq!(clock.elapsed_ms(start), 3_700_000);
}

#[test]
fn elapsed_ms_saturates_when_start_is_in_the_future() {
    let clock = FakeClock::at(1_000);
    assert_eq!(clock.elapsed_ms(2_000), 0);
}

#[test]
fn fake_clock_set_epoch_ms() {
    let clock = FakeClock::default();
    clock.set_epoch_ms(42);
    assert_eq!(clock.epoch_ms(), 42);
}
