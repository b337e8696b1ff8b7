use serde_json::{Value, json};

use survey_engine::{
    BranchingRule, EvaluationStrategy, Logical, Operator, Page, Question, QuestionType,
    ResponseMap, RuleSource, is_visible, resolve_rules, resolve_visibility,
};

fn responses(value: Value) -> ResponseMap {
    value.as_object().cloned().expect("responses fixture")
}

fn question(value: Value) -> Question {
    serde_json::from_value(value).expect("question fixture")
}

const BOTH: [EvaluationStrategy; 2] = [
    EvaluationStrategy::FlatSequential,
    EvaluationStrategy::GroupedOr,
];

#[test]
fn question_without_rules_is_always_visible() {
    let plain = Question::new("q", QuestionType::Text);
    for strategy in BOTH {
        assert!(is_visible(&plain, &ResponseMap::new(), strategy));
    }
}

#[test]
fn question_is_hidden_until_a_dependency_is_answered() {
    for operator in [
        Operator::Equals,
        Operator::NotEquals,
        Operator::NotContains,
        Operator::CountLt,
    ] {
        let gated = Question::new("q2", QuestionType::Text)
            .with_rules(vec![BranchingRule::new("q1", operator, json!("x"))]);
        for strategy in BOTH {
            assert!(!is_visible(&gated, &ResponseMap::new(), strategy));
            assert!(!is_visible(
                &gated,
                &responses(json!({ "unrelated": "x" })),
                strategy
            ));
        }
    }
}

#[test]
fn null_answers_count_as_unanswered() {
    let gated = Question::new("q2", QuestionType::Text).with_rules(vec![BranchingRule::new(
        "q1",
        Operator::NotEquals,
        json!("x"),
    )]);
    assert!(!is_visible(
        &gated,
        &responses(json!({ "q1": null })),
        EvaluationStrategy::GroupedOr
    ));
}

#[test]
fn grouped_strategy_is_or_of_anded_groups() {
    // dep1's AND joins it to dep2.
    let gated = Question::new("target", QuestionType::Text).with_rules(vec![
        BranchingRule::new("dep1", Operator::Equals, json!("A"))
            .in_group(0)
            .with_logical(Logical::And),
        BranchingRule::new("dep2", Operator::Equals, json!("B"))
            .in_group(0),
        BranchingRule::new("dep3", Operator::Equals, json!("C"))
            .in_group(1),
    ]);
    let strategy = EvaluationStrategy::GroupedOr;

    // group 0 true, group 1 true
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "B", "dep3": "C" })),
        strategy
    ));
    // group 0 true, group 1 false
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "B", "dep3": "Z" })),
        strategy
    ));
    // group 0 false, group 1 true
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "Z", "dep3": "C" })),
        strategy
    ));
    // group 0 false, group 1 false
    assert!(!is_visible(
        &gated,
        &responses(json!({ "dep1": "Z", "dep2": "B", "dep3": "Z" })),
        strategy
    ));
}

#[test]
fn and_on_the_second_rule_joins_it_to_the_following_rule() {
    // dep1's default OR joins dep1 to dep2; dep2's AND would join it to the
    // next rule, which sits in another group.
    let gated = Question::new("target", QuestionType::Text).with_rules(vec![
        BranchingRule::new("dep1", Operator::Equals, json!("A"))
            .in_group(0),
        BranchingRule::new("dep2", Operator::Equals, json!("B"))
            .in_group(0)
            .with_logical(Logical::And),
        BranchingRule::new("dep3", Operator::Equals, json!("C"))
            .in_group(1),
    ]);
    let grouped = EvaluationStrategy::GroupedOr;

    // group 0 is dep1 OR dep2
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "Z", "dep3": "Z" })),
        grouped
    ));
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "Z", "dep2": "B", "dep3": "Z" })),
        grouped
    ));
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "Z", "dep2": "Z", "dep3": "C" })),
        grouped
    ));
    assert!(!is_visible(
        &gated,
        &responses(json!({ "dep1": "Z", "dep2": "Z", "dep3": "Z" })),
        grouped
    ));

    // flat: (dep1 OR dep2) AND dep3
    let flat = EvaluationStrategy::FlatSequential;
    assert!(!is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "Z", "dep3": "Z" })),
        flat
    ));
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "Z", "dep3": "C" })),
        flat
    ));
}

#[test]
fn flat_strategy_folds_left_with_previous_logical() {
    // (dep1 AND dep2) AND dep3: each rule's `logical` joins it to the next one.
    let gated = Question::new("target", QuestionType::Text).with_rules(vec![
        BranchingRule::new("dep1", Operator::Equals, json!("A"))
            .with_logical(Logical::And),
        BranchingRule::new("dep2", Operator::Equals, json!("B"))
            .with_logical(Logical::And),
        BranchingRule::new("dep3", Operator::Equals, json!("C")),
    ]);
    let answers = responses(json!({ "dep1": "A", "dep2": "B", "dep3": "Z" }));

    assert!(!is_visible(&gated, &answers, EvaluationStrategy::FlatSequential));
    assert!(is_visible(
        &gated,
        &responses(json!({ "dep1": "A", "dep2": "B", "dep3": "C" })),
        EvaluationStrategy::FlatSequential
    ));
}

#[test]
fn strategies_diverge_when_groups_are_used() {
    let gated = Question::new("target", QuestionType::Text).with_rules(vec![
        BranchingRule::new("dep1", Operator::Equals, json!("A"))
            .in_group(0)
            .with_logical(Logical::And),
        BranchingRule::new("dep2", Operator::Equals, json!("B"))
            .in_group(1),
    ]);
    let answers = responses(json!({ "dep1": "Z", "dep2": "B" }));

    assert!(!is_visible(&gated, &answers, EvaluationStrategy::FlatSequential));
    assert!(is_visible(&gated, &answers, EvaluationStrategy::GroupedOr));
}

#[test]
fn partially_answered_dependencies_evaluate_missing_rules_as_false() {
    let gated = Question::new("target", QuestionType::Text).with_rules(vec![
        BranchingRule::new("dep1", Operator::Equals, json!("A"))
            .with_logical(Logical::And),
        BranchingRule::new("dep2", Operator::NotEquals, json!("B")),
    ]);
    let answers = responses(json!({ "dep1": "A" }));
    for strategy in BOTH {
        assert!(!is_visible(&gated, &answers, strategy));
    }
}

#[test]
fn branching_rules_do_not_gate_visibility() {
    let q1 = Question::new("q1", QuestionType::SingleChoice)
        .with_options(["Yes", "No"])
        .with_rules(vec![
            BranchingRule::new("q1", Operator::Equals, json!("Yes"))
                .skip_to_page(2),
        ]);
    for strategy in BOTH {
        assert!(is_visible(&q1, &ResponseMap::new(), strategy));
    }
}

#[test]
fn first_non_empty_rule_source_wins() {
    let q = question(json!({
        "id": "q",
        "type": "text",
        "visibilityRules": [],
        "visibleWhen": [{ "questionId": "a", "condition": { "operator": "equals", "value": "1" } }],
        "settings": {
            "visibleWhen": [{ "questionId": "b", "condition": { "operator": "equals", "value": "1" } }],
            "visibility": { "rules": [{ "questionId": "c", "condition": { "operator": "equals", "value": "1" } }] }
        }
    }));
    let resolved = resolve_rules(&q);
    assert_eq!(resolved.source, Some(RuleSource::VisibleWhen));
    assert_eq!(resolved.rules.len(), 1);
    assert_eq!(resolved.rules[0].question_id, "a");

    // `b` and `c` are never merged in, so answering them alone keeps `q` hidden.
    let answers = responses(json!({ "b": "1", "c": "1" }));
    assert!(!is_visible(&q, &answers, EvaluationStrategy::GroupedOr));
    assert!(is_visible(&q, &responses(json!({ "a": 1 })), EvaluationStrategy::GroupedOr));
}

#[test]
fn each_rule_source_is_readable_in_isolation() {
    let q = question(json!({
        "id": "q",
        "type": "slider",
        "settings": {
            "visibility": { "rules": { "questionId": "c", "condition": { "operator": "greater_than", "value": 3 } } }
        }
    }));
    assert!(RuleSource::VisibilityRules.read(&q).is_empty());
    assert!(RuleSource::VisibleWhen.read(&q).is_empty());
    assert!(RuleSource::SettingsVisibleWhen.read(&q).is_empty());
    assert_eq!(RuleSource::SettingsVisibilityRules.read(&q).len(), 1);
    assert_eq!(resolve_rules(&q).source, Some(RuleSource::SettingsVisibilityRules));
}

#[test]
fn malformed_rules_are_skipped() {
    let q = question(json!({
        "id": "q",
        "type": "text",
        "visibilityRules": [
            { "condition": { "operator": "equals" } },
            "garbage",
            { "questionId": "dep", "condition": { "operator": "teleport", "value": 1 } },
            { "questionId": "dep", "logical": "AND", "condition": { "operator": "equals", "value": "ok" } }
        ],
        "settings": null
    }));
    let resolved = resolve_rules(&q);
    assert_eq!(resolved.rules.len(), 2);
    // unknown operator evaluates false; the OR'd second rule decides
    assert!(is_visible(
        &q,
        &responses(json!({ "dep": "ok" })),
        EvaluationStrategy::FlatSequential
    ));
}

#[test]
fn resolve_visibility_covers_every_question_on_a_page() {
    let page = Page::new(vec![
        Question::new("q1", QuestionType::SingleChoice).with_options(["Yes", "No"]),
        Question::new("q2", QuestionType::Text)
            .with_rules(vec![BranchingRule::new("q1", Operator::Equals, json!("No"))]),
    ]);
    let map = resolve_visibility(
        &page,
        &responses(json!({ "q1": "No" })),
        EvaluationStrategy::GroupedOr,
    );
    assert_eq!(map.get("q1"), Some(&true));
    assert_eq!(map.get("q2"), Some(&true));

    let map = resolve_visibility(&page, &ResponseMap::new(), EvaluationStrategy::GroupedOr);
    assert_eq!(map.get("q2"), Some(&false));
}
