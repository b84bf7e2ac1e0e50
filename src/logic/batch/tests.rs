//! Integration Tests for the batch pipeline
//!
//! Records + classifier outputs + attribution tensor through runner and report.

#[cfg(test)]
mod integration_tests {
    use ndarray::Array3;

    use crate::error::EngineError;
    use crate::logic::batch::{BatchReport, BatchRunner};
    use crate::logic::config::EngineConfig;
    use crate::logic::decision::{ClassList, ClassifierOutput, DecisionSource};
    use crate::logic::explain::{AttributionTensor, DecodeWarning, FeatureLayout};
    use crate::logic::record::StudentRecord;
    use crate::logic::rules::{Category, RuleId};
    use crate::logic::urgency::{Status, UrgencyLevel};

    const CLASSES: [&str; 7] = ["MT", "LFI", "LFR", "LAC", "NC", "NF", "CAC"];

    fn classes() -> ClassList {
        ClassList::new(&CLASSES).unwrap()
    }

    fn layout() -> FeatureLayout {
        FeatureLayout::new([
            "consecutive_absences",
            "pending_installments",
            "academic_pendency",
            "current_module",
        ])
    }

    fn student(absences: f64, installments: &str) -> StudentRecord {
        StudentRecord::new()
            .with("consecutive_absences", absences)
            .with("pending_installments", installments)
    }

    /// One record per rule path, two model fallbacks
    fn records() -> Vec<StudentRecord> {
        vec![
            student(1.0, "PC"),                                  // MT
            student(0.0, "3"),                                   // LFI
            student(6.0, "1"),                                   // model
            student(5.0, "0").with("first_unit", true),          // NC
            student(13.0, "0"),                                  // LFR (heavy absence)
            student(6.0, "0").with("academic_pendency", "PR"),   // LAC
            student(0.0, "1").with("course_completed", true),    // NF
            student(12.0, "1"),                                  // LFR
            student(13.0, "2").with("first_unit", true),         // NC before LFR
            student(0.0, "1"),                                   // model
        ]
    }

    fn outputs(n: usize) -> Vec<ClassifierOutput> {
        (0..n)
            .map(|i| {
                let predicted = i % CLASSES.len();
                let probabilities = (0..CLASSES.len())
                    .map(|c| if c == predicted { 0.7 } else { 0.05 })
                    .collect();
                ClassifierOutput::new(CLASSES[predicted], probabilities)
            })
            .collect()
    }

    fn tensor(samples: usize) -> AttributionTensor {
        AttributionTensor::stacked(Array3::from_shape_fn((samples, 4, CLASSES.len()), |(s, f, c)| {
            ((s + f + c) % 5) as f64 - 2.0
        }))
    }

    fn runner() -> BatchRunner {
        BatchRunner::new(classes(), &EngineConfig::default())
    }

    #[test]
    fn test_batch_categories_in_input_order() {
        let output = runner().run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();

        let categories: Vec<Category> = output.decisions.iter().map(|d| d.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::MT,
                Category::LFI,
                Category::LFR,
                Category::NC,
                Category::LFR,
                Category::LAC,
                Category::NF,
                Category::LFR,
                Category::NC,
                Category::LFR,
            ]
        );
        assert_eq!(output.decisions[2].source, DecisionSource::Model);
        assert_eq!(output.decisions[9].source, DecisionSource::Model);
        assert_eq!(output.decisions[8].source, DecisionSource::Rule(RuleId::NC));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_counters_sum_to_total() {
        let output = runner().run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        let c = &output.counters;

        assert_eq!(c.get(RuleId::MT), 1);
        assert_eq!(c.get(RuleId::LFI), 1);
        assert_eq!(c.get(RuleId::LFR), 2);
        assert_eq!(c.get(RuleId::NC), 2);
        assert_eq!(c.get(RuleId::LAC), 1);
        assert_eq!(c.get(RuleId::NF), 1);
        assert_eq!(c.get(RuleId::Model), 2);
        assert_eq!(c.total(), 10);
    }

    #[test]
    fn test_counters_reset_between_runs() {
        let mut runner = runner();
        runner.run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        let second = runner.run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        assert_eq!(second.counters.total(), 10);
        assert_eq!(runner.counters().total(), 10);
    }

    #[test]
    fn test_decision_invariants_hold_for_every_sample() {
        let output = runner().run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();

        for d in &output.decisions {
            assert!((0.0..=1.0).contains(&d.probability));
            let is_mt = d.category == Category::MT;
            assert_eq!(d.status == Status::Enrolled, is_mt);
            assert_eq!(d.urgency == UrgencyLevel::None, is_mt);
            assert_eq!(d.top_positive_features.len(), 3);
            assert_eq!(d.top_negative_features.len(), 3);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let seq = runner().run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        let par = runner().run_parallel(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_execute_uses_configured_mode() {
        let config = EngineConfig {
            parallel: true,
            ..Default::default()
        };
        let mut runner = BatchRunner::new(classes(), &config);
        let output = runner.execute(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        assert_eq!(output.decisions.len(), 10);
        assert_eq!(runner.counters().total(), 10);
    }

    #[test]
    fn test_output_length_mismatch_is_fatal() {
        let result = runner().run(&records(), &outputs(9), &tensor(10), &layout());
        match result {
            Err(EngineError::ShapeMismatch { array, expected, actual }) => {
                assert_eq!(array, "classifier_outputs");
                assert_eq!(expected, 10);
                assert_eq!(actual, 9);
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_attribution_length_mismatch_is_fatal() {
        let mut runner = runner();
        let result = runner.run_parallel(&records(), &outputs(10), &tensor(9), &layout());
        assert!(matches!(
            result,
            Err(EngineError::ShapeMismatch { array: "attributions", expected: 10, actual: 9 })
        ));
        assert_eq!(runner.counters().total(), 0);
    }

    #[test]
    fn test_feature_name_mismatch_degrades_but_completes() {
        let short = FeatureLayout::new(["consecutive_absences", "pending_installments", "academic_pendency"]);
        let output = runner().run(&records(), &outputs(10), &tensor(10), &short).unwrap();

        assert_eq!(output.decisions.len(), 10);
        assert_eq!(output.warnings.len(), 10);
        assert!(output.warnings.iter().enumerate().all(|(i, w)| {
            w.sample == i
                && w.warning == DecodeWarning::FeatureCountMismatch { slice: 4, names: 3, used: 3 }
        }));
    }

    #[test]
    fn test_empty_batch() {
        let output = runner().run(&[], &[], &tensor(0), &layout()).unwrap();
        assert!(output.decisions.is_empty());
        assert_eq!(output.counters.total(), 0);

        let report = BatchReport::new(output, &layout());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.at_risk_pct, 0.0);
    }

    #[test]
    fn test_report_summary() {
        let output = runner().run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        let report = BatchReport::new(output, &layout());
        let s = &report.summary;

        assert_eq!(s.total, 10);
        assert_eq!(s.enrolled, 1);
        assert_eq!(s.at_risk, 9);
        assert!((s.at_risk_pct - 90.0).abs() < 1e-9);
        assert_eq!(s.by_category[&Category::LFR], 4);
        assert_eq!(s.by_urgency[&UrgencyLevel::None], 1);
        assert_eq!(s.by_urgency.values().sum::<usize>(), 10);
        assert_eq!(s.degraded_samples, 0);
        assert_eq!(s.layout_hash, layout().hash());
        assert!((s.model_confidence.mean - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_report_json_shape() {
        let output = runner().run(&records(), &outputs(10), &tensor(10), &layout()).unwrap();
        let report = BatchReport::new(output, &layout());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["decisions"][0]["status"], "ENROLLED");
        assert_eq!(json["decisions"][0]["urgency"], "NONE");
        assert_eq!(json["decisions"][1]["source"], "RULE:LFI");
        assert_eq!(json["decisions"][2]["source"], "MODEL");
        assert_eq!(json["counters"]["total"], 10);
        assert_eq!(json["summary"]["by_category"]["NC"], 2);
        assert!(json["run_id"].is_string());
    }
}
