//! Property tests for plan composition invariants

use bipcore::{
    AntecedentCategory, BehaviorFunction, Category, EngineOptions, IntakeRecord, Intensity, Observed,
    ReplacementBehavior, TargetBehavior, generate_on, render_text, section_count,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn function_strategy() -> impl Strategy<Value = BehaviorFunction> {
    proptest::sample::select(BehaviorFunction::ALL.to_vec())
}

fn antecedent_strategy() -> impl Strategy<Value = AntecedentCategory> {
    proptest::sample::select(AntecedentCategory::ALL.to_vec())
}

fn intensity_strategy() -> impl Strategy<Value = Intensity> {
    proptest::sample::select(Intensity::ALL.to_vec())
}

prop_compose! {
    fn arb_intake()(
        functions in proptest::collection::vec(function_strategy(), 1..4),
        antecedents in proptest::collection::vec(antecedent_strategy(), 0..4),
        custom in "[a-z ]{0,12}",
        intensities in proptest::collection::vec(intensity_strategy(), 1..3),
        replacements in proptest::collection::vec("[A-Za-z ]{1,20}", 1..3),
        flagged in any::<bool>(),
        details in "[a-z ]{0,16}",
    ) -> IntakeRecord {
        let mut intake = IntakeRecord::default();
        intake.functions = functions;
        intake.antecedents = Observed::new(antecedents, custom);
        intake.target_behaviors = intensities
            .into_iter()
            .enumerate()
            .map(|(i, intensity)| TargetBehavior::new(format!("Behavior {i}"), "Defined behavior", intensity))
            .collect();
        intake.replacement_behaviors = replacements
            .into_iter()
            .map(|r| ReplacementBehavior::new(format!("Use {r}"), "same function"))
            .collect();
        intake.safety.flagged = flagged;
        intake.safety.details = details;
        intake
    }
}

/// Free text that may carry line breaks and heading markers
fn free_text() -> impl Strategy<Value = String> {
    "[a-z §\n]{0,24}"
}

prop_compose! {
    fn arb_free_text_intake()(
        base in arb_intake(),
        name in free_text(),
        notes in free_text(),
        custom in free_text(),
        definition in free_text(),
        replacement in free_text(),
        rationale in free_text(),
        strengths in free_text(),
        communication in free_text(),
        details in free_text(),
    ) -> IntakeRecord {
        let mut intake = base;
        intake.student.name = name;
        intake.function_notes = notes;
        intake.antecedents.custom = custom;
        intake.target_behaviors[0].definition = definition;
        intake.replacement_behaviors[0] = ReplacementBehavior::new(replacement, rationale);
        intake.context.strengths = strengths;
        intake.context.communication_level = communication;
        intake.safety.details = details;
        intake
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

proptest! {
    #[test]
    fn prop_antecedent_strategies_never_empty(intake in arb_intake()) {
        let plan = generate_on(&intake, date(), &EngineOptions::default());
        prop_assert!(!plan.antecedent_strategies.is_empty());
    }

    #[test]
    fn prop_crisis_present_iff_flagged(intake in arb_intake()) {
        let plan = generate_on(&intake, date(), &EngineOptions::default());
        prop_assert_eq!(plan.crisis_plan.is_some(), intake.safety.flagged);
        let expected = if intake.safety.flagged { 10 } else { 9 };
        prop_assert_eq!(plan.sections().len(), expected);
        prop_assert_eq!(section_count(&render_text(&plan)), expected);
    }

    #[test]
    fn prop_free_text_never_adds_headings(intake in arb_free_text_intake()) {
        let plan = generate_on(&intake, date(), &EngineOptions::default());
        let text = render_text(&plan);
        prop_assert_eq!(section_count(&text), plan.sections().len());
    }

    #[test]
    fn prop_generation_is_deterministic(intake in arb_intake()) {
        let options = EngineOptions::default();
        prop_assert_eq!(generate_on(&intake, date(), &options), generate_on(&intake, date(), &options));
    }

    #[test]
    fn prop_strategy_lists_have_no_duplicates(intake in arb_intake()) {
        let plan = generate_on(&intake, date(), &EngineOptions::default());
        for list in [
            &plan.antecedent_strategies,
            &plan.teaching_strategies,
            &plan.reinforcement_strategies,
            &plan.response_strategies,
        ] {
            let mut sorted = list.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), list.len());
        }
    }

    #[test]
    fn prop_response_strategies_respect_cap(intake in arb_intake(), cap in 1usize..5) {
        let options = EngineOptions { strategies_per_key: cap, ..Default::default() };
        let plan = generate_on(&intake, date(), &options);
        let mut distinct = Vec::new();
        for f in &intake.functions {
            if !distinct.contains(f) {
                distinct.push(*f);
            }
        }
        prop_assert!(plan.response_strategies.len() <= cap * distinct.len());
    }
}
