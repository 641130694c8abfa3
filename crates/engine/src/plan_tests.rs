// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use xform_adapters::PlanStep;

fn step(id: &str, name: &str, description: &str) -> PlanStep {
    PlanStep { id: id.into(), name: name.into(), description: description.into(), status: None }
}

#[test]
fn renders_numbered_steps() {
    let plan = TransformationPlan {
        steps: vec![
            step("1", "Update dependencies", "Upgrade JUnit to 5"),
            step("2", "Replace deprecated APIs", ""),
        ],
    };

    let markdown = render_plan("demo", JavaVersion::Java8, JavaVersion::Java17, &plan);

    assert_eq!(
        markdown,
        "# Code Transformation Plan\n\n\
         Project: demo\n\
         Upgrade: JDK8 → JDK17\n\n\
         ## Steps\n\n\
         1. **Update dependencies**\n   Upgrade JUnit to 5\n\
         2. **Replace deprecated APIs**\n"
    );
}

#[test]
fn empty_plan_says_so() {
    let markdown = render_plan(
        "demo",
        JavaVersion::Java11,
        JavaVersion::Java17,
        &TransformationPlan::default(),
    );
    assert!(markdown.ends_with("The service proposed no changes.\n"));
}

#[tokio::test]
async fn write_plan_creates_work_dir() {
    let root = tempfile::tempdir().unwrap();
    let work = root.path().join("nested/work");

    let path = write_plan(&work, "# plan\n").await.unwrap();

    assert_eq!(path, work.join(PLAN_FILE_NAME));
    assert_eq!(std::fs::read_to_string(path).unwrap(), "# plan\n");
}
