// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coarse per-phase progress shown alongside the overall job status.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The four phases of a transformation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepName {
    StartJob,
    BuildCode,
    GeneratePlan,
    TransformCode,
}

impl StepName {
    pub const ALL: [StepName; 4] =
        [StepName::StartJob, StepName::BuildCode, StepName::GeneratePlan, StepName::TransformCode];
}

crate::simple_display! {
    StepName {
        StartJob => "startJob",
        BuildCode => "buildCode",
        GeneratePlan => "generatePlan",
        TransformCode => "transformCode",
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

crate::simple_display! {
    StepState {
        Pending => "pending",
        Succeeded => "succeeded",
        Failed => "failed",
    }
}

/// Progress of every step. Always holds exactly the four [`StepName`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepProgress(BTreeMap<StepName, StepState>);

impl Default for StepProgress {
    fn default() -> Self {
        Self(StepName::ALL.iter().map(|step| (*step, StepState::Pending)).collect())
    }
}

impl StepProgress {
    pub fn get(&self, step: StepName) -> StepState {
        self.0.get(&step).copied().unwrap_or_default()
    }

    pub fn mark(&mut self, step: StepName, state: StepState) {
        self.0.insert(step, state);
    }

    pub fn succeed(&mut self, step: StepName) {
        self.mark(step, StepState::Succeeded);
    }

    pub fn fail(&mut self, step: StepName) {
        self.mark(step, StepState::Failed);
    }

    /// Put every step back to `Pending`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Force every step not explicitly `Succeeded` to `Failed`.
    ///
    /// Called at the end of every run so no step is left `Pending`.
    pub fn finalize(&mut self) {
        for state in self.0.values_mut() {
            if *state != StepState::Succeeded {
                *state = StepState::Failed;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StepName, StepState)> + '_ {
        self.0.iter().map(|(step, state)| (*step, *state))
    }

    pub fn all_succeeded(&self) -> bool {
        self.0.values().all(|state| *state == StepState::Succeeded)
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
