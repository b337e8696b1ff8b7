use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};

fn survey_json() -> Value {
    json!({
        "id": "cli-survey",
        "title": "CLI",
        "pages": [
            { "questions": [
                { "id": "q1", "type": "single_choice", "required": true,
                  "options": [{ "id": "yes", "text": "Yes" }, { "id": "no", "text": "No" }],
                  "visibilityRules": [
                      { "questionId": "q1", "condition": { "operator": "equals", "value": "Yes" },
                        "action": { "type": "skip_to_page", "targetPageIndex": 2 } }
                  ] },
                { "id": "q2", "type": "text", "required": true,
                  "visibleWhen": [{ "questionId": "q1", "condition": { "operator": "equals", "value": "No" } }] }
            ] },
            { "questions": [{ "id": "q3", "type": "rating" }] },
            { "questions": [{ "id": "q4", "type": "email" }] }
        ]
    })
}

fn write(dir: &TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let file = dir.child(name);
    file.write_str(&value.to_string()).expect("write fixture");
    file.path().to_path_buf()
}

fn command(dir: &TempDir) -> Command {
    let config = dir.child("engine.toml");
    config
        .write_str("strategy = \"grouped_or\"\n")
        .expect("write config");
    let mut cmd = Command::cargo_bin("survey-engine").expect("binary built");
    cmd.arg("--config").arg(config.path());
    cmd.env_remove("SURVEY_ENGINE_LOG");
    cmd
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[test]
fn simulate_replays_branching_jump() {
    let dir = TempDir::new().expect("tempdir");
    let survey = write(&dir, "survey.json", &survey_json());
    let events = write(
        &dir,
        "events.json",
        &json!([{ "event": "answer", "questionId": "q1", "value": "Yes" }]),
    );

    let output = command(&dir)
        .args(["simulate", "--survey"])
        .arg(&survey)
        .arg("--events")
        .arg(&events)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report = stdout_json(&output);
    assert_eq!(report["steps"][0]["action"]["type"], "skip_to_page");
    assert_eq!(report["navigation"]["currentPageIndex"], 2);
    assert_eq!(report["navigation"]["visitedPageIndices"], json!([0, 2]));
    assert_eq!(report["canSubmit"], true);
}

#[test]
fn simulate_reports_blocked_advance() {
    let dir = TempDir::new().expect("tempdir");
    let survey = write(&dir, "survey.json", &survey_json());
    let events = write(
        &dir,
        "events.json",
        &json!([
            { "event": "answer", "questionId": "q1", "value": "No" },
            { "event": "next" }
        ]),
    );

    let output = command(&dir)
        .args(["simulate", "--strategy", "flat-sequential", "--survey"])
        .arg(&survey)
        .arg("--events")
        .arg(&events)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report = stdout_json(&output);
    assert_eq!(report["steps"][1]["outcome"]["outcome"], "blocked");
    assert_eq!(report["steps"][1]["outcome"]["missing"], json!(["q2"]));
    assert_eq!(report["navigation"]["currentPageIndex"], 0);
}

#[test]
fn visibility_lists_every_page() {
    let dir = TempDir::new().expect("tempdir");
    let survey = write(&dir, "survey.json", &survey_json());
    let responses = write(&dir, "responses.json", &json!({ "q1": "No" }));

    let output = command(&dir)
        .args(["visibility", "--survey"])
        .arg(&survey)
        .arg("--responses")
        .arg(&responses)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let pages = stdout_json(&output);
    assert_eq!(pages.as_array().map(Vec::len), Some(3));
    assert_eq!(pages[0]["visibility"]["q2"], true);
}

#[test]
fn progress_sorts_and_paginates() {
    let dir = TempDir::new().expect("tempdir");
    let survey = write(&dir, "survey.json", &survey_json());
    let records = write(
        &dir,
        "records.json",
        &json!([
            { "respondentEmail": "b@example.com", "status": "InProgress",
              "metadata": { "lastPageIndex": 0 }, "lastUpdated": "2026-05-01T10:00:00Z" },
            { "respondentEmail": "a@example.com", "status": "Completed",
              "lastUpdated": "2026-04-01T10:00:00Z" }
        ]),
    );
    let respondents = write(
        &dir,
        "respondents.json",
        &json!(["a@example.com", "b@example.com", "c@example.com"]),
    );

    let output = command(&dir)
        .args(["progress", "--survey"])
        .arg(&survey)
        .arg("--records")
        .arg(&records)
        .arg("--respondents")
        .arg(&respondents)
        .args(["--page", "1", "--per-page", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rows = stdout_json(&output);
    assert_eq!(rows.as_array().map(Vec::len), Some(2));
    assert_eq!(rows[0]["email"], "a@example.com");
    assert_eq!(rows[0]["completionPercentage"], 100);
    assert_eq!(rows[1]["email"], "b@example.com");
    assert_eq!(rows[1]["completionPercentage"], 33);
}

#[test]
fn lint_strict_fails_on_warnings() {
    let dir = TempDir::new().expect("tempdir");
    let mut broken = survey_json();
    broken["pages"][1]["questions"][0]["visibilityRules"] =
        json!([{ "questionId": "ghost", "condition": { "operator": "equals", "value": 1 } }]);
    let survey = write(&dir, "survey.json", &broken);

    command(&dir)
        .args(["lint", "--survey"])
        .arg(&survey)
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown_question"));

    command(&dir)
        .args(["lint", "--strict", "--survey"])
        .arg(&survey)
        .assert()
        .failure()
        .stderr(predicate::str::contains("treated as errors"));
}

#[test]
fn unreadable_survey_reports_path() {
    let dir = TempDir::new().expect("tempdir");
    command(&dir)
        .args(["lint", "--survey", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn schema_describes_pages() {
    let dir = TempDir::new().expect("tempdir");
    command(&dir)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("pages"));
}
