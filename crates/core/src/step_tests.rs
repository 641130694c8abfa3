// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn default_progress_is_all_pending() {
    let progress = StepProgress::default();
    assert_eq!(progress.iter().count(), 4);
    assert!(progress.iter().all(|(_, state)| state == StepState::Pending));
}

#[test]
fn finalize_fails_everything_not_succeeded() {
    let mut progress = StepProgress::default();
    progress.succeed(StepName::StartJob);
    progress.succeed(StepName::BuildCode);
    progress.finalize();

    assert_eq!(progress.get(StepName::StartJob), StepState::Succeeded);
    assert_eq!(progress.get(StepName::BuildCode), StepState::Succeeded);
    assert_eq!(progress.get(StepName::GeneratePlan), StepState::Failed);
    assert_eq!(progress.get(StepName::TransformCode), StepState::Failed);
}

#[test]
fn finalize_keeps_all_succeeded() {
    let mut progress = StepProgress::default();
    for step in StepName::ALL {
        progress.succeed(step);
    }
    progress.finalize();
    assert!(progress.all_succeeded());
}

#[test]
fn reset_returns_to_pending() {
    let mut progress = StepProgress::default();
    progress.fail(StepName::TransformCode);
    progress.reset();
    assert_eq!(progress, StepProgress::default());
}

#[test]
fn progress_serializes_with_step_keys() {
    let mut progress = StepProgress::default();
    progress.succeed(StepName::GeneratePlan);
    let json = serde_json::to_value(&progress).unwrap();
    assert_eq!(json["generatePlan"], "succeeded");
    assert_eq!(json["startJob"], "pending");
}

#[yare::parameterized(
    start     = { StepName::StartJob, "startJob" },
    build     = { StepName::BuildCode, "buildCode" },
    plan      = { StepName::GeneratePlan, "generatePlan" },
    transform = { StepName::TransformCode, "transformCode" },
)]
fn step_name_display(step: StepName, expected: &str) {
    assert_eq!(step.to_string(), expected);
}
