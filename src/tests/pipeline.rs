use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    AnalysisResult, AssessmentDisplay, ClauseRecord, DashboardSummary, FixedNoise, NoiseSource,
    RiskCategory, RiskLevel, RiskPipeline, ScoreSource, ScoringConfig,
};

/// Hands out noise-floor values in order, one per zero-hit category.
struct SequenceNoise(Vec<u32>);

impl NoiseSource for SequenceNoise {
    fn noise_floor(&mut self, low: u32, high: u32) -> u32 {
        self.0.remove(0).clamp(low, high)
    }
}

const VENDOR_CONTRACT: &str = "The Vendor shall pay a penalty of 10% for late delivery. \
The Vendor shall indemnify the Company against all claims. \
Any dispute shall be settled by arbitration in Mumbai courts. \
The Company may terminate this agreement with immediate effect.";

// Contains none of the trigger terms.
const QUIET_CONTRACT: &str = "Payment is due monthly.";

fn vendor_analysis() -> AnalysisResult {
    AnalysisResult {
        summary: Some("One-sided vendor agreement.".to_string()),
        risk_score: Some(78),
        clauses: Some(vec![
            ClauseRecord::new("Penalty", RiskLevel::High),
            ClauseRecord::new("Indemnity", RiskLevel::High),
            ClauseRecord::new("Jurisdiction", RiskLevel::Medium),
            ClauseRecord::new("Termination", RiskLevel::Low),
            ClauseRecord::new("Confidentiality", RiskLevel::Medium),
        ]),
        missing_clauses: vec!["Force Majeure".to_string()],
    }
}

fn render(text: &str, analysis: Option<&AnalysisResult>, noise: &mut dyn NoiseSource) -> String {
    let config = ScoringConfig::default();
    let assessment = RiskPipeline::new(&config).assess(text, analysis, noise);
    let dashboard = DashboardSummary::build(text, analysis, &config);
    AssessmentDisplay::new(&assessment)
        .with_dashboard(&dashboard)
        .with_trace()
        .to_string()
}

// ============ No Analysis ============

#[test]
fn no_analysis_gives_five_ordered_baseline_entries() {
    let pipeline = RiskPipeline::default();
    let mut rng = StdRng::seed_from_u64(7);

    for text in ["", QUIET_CONTRACT, VENDOR_CONTRACT] {
        let assessment = pipeline.assess(text, None, &mut rng);
        let labels: Vec<_> = assessment.radar.labels().to_vec();
        assert_eq!(
            labels,
            vec!["Financial", "Legal", "Operational", "Compliance", "Termination"]
        );
        for value in assessment.radar.values() {
            assert!((5..=50).contains(value), "{} out of baseline band", value);
        }
        assert!(assessment.boosts.is_empty());
        assert!(assessment.sync.is_none());
    }
}

#[test]
fn keyword_categories_repeat_exactly_across_runs() {
    let pipeline = RiskPipeline::default();
    let first = pipeline.assess(VENDOR_CONTRACT, None, &mut StdRng::seed_from_u64(1));
    let second = pipeline.assess(VENDOR_CONTRACT, None, &mut StdRng::seed_from_u64(2));

    for category in RiskCategory::ALL {
        let scored = first.category(category);
        match scored.source {
            ScoreSource::KeywordBaseline { .. } => {
                assert_eq!(scored.value, second.category(category).value)
            }
            _ => assert!((5..=20).contains(&second.category(category).value)),
        }
    }
}

#[test]
fn no_analysis_dashboard_is_zero_and_safe() {
    insta::assert_snapshot!(render(VENDOR_CONTRACT, None, &mut FixedNoise(14)), @r###"
    overall: 0/100 Safe
    clauses (approx): 2
    Financial    ##..................   10  keywords
    Legal        ###.................   15  keywords
    Operational  ##..................   14  noise floor
    Compliance   ##..................   14  noise floor
    Termination  ##..................   10  keywords
    "###);
}

// ============ Full Analysis ============

#[test]
fn vendor_contract_with_analysis() {
    let report = render(VENDOR_CONTRACT, Some(&vendor_analysis()), &mut FixedNoise(8));
    insta::assert_snapshot!(report, @r###"
    overall: 78/100 High Risk
    clauses (approx): 2
    summary: One-sided vendor agreement.
    missing: Force Majeure
    Financial    #################...   85  clause analysis
    Legal        ############........   60  clause analysis
    Operational  #...................    8  noise floor
    Compliance   #...................    8  noise floor
    Termination  ##..................   10  keywords
    boost: clause 1 "Penalty" (High) Financial 10 -> 85
    boost: clause 3 "Jurisdiction" (Medium) Legal 15 -> 60
    "###);
}

#[test]
fn headline_below_peak_leaves_radar_alone() {
    let assessment = RiskPipeline::default().assess(
        VENDOR_CONTRACT,
        Some(&vendor_analysis()),
        &mut FixedNoise(8),
    );
    assert!(assessment.sync.is_none());
    assert_eq!(assessment.peak(), 85);
}

// ============ Global Sync Scenarios ============

#[test]
fn quiet_contract_pins_noise_floor_peak_to_headline() {
    let analysis = AnalysisResult {
        risk_score: Some(85),
        clauses: Some(Vec::new()),
        ..AnalysisResult::default()
    };
    let mut noise = SequenceNoise(vec![18, 7, 12, 5, 20]);

    let assessment = RiskPipeline::default().assess(QUIET_CONTRACT, Some(&analysis), &mut noise);

    insta::assert_debug_snapshot!(assessment.categories, @r###"
    [
        Financial(18, noise floor),
        Legal(7, noise floor),
        Operational(12, noise floor),
        Compliance(5, noise floor),
        Termination(85, global sync),
    ]
    "###);
}

#[test]
fn noise_floor_above_threshold_is_also_pushed() {
    let config = ScoringConfig {
        noise_floor_max: 40,
        ..ScoringConfig::default()
    };
    let analysis = AnalysisResult {
        risk_score: Some(85),
        clauses: Some(Vec::new()),
        ..AnalysisResult::default()
    };
    let mut noise = SequenceNoise(vec![35, 10, 40, 8, 12]);

    let assessment = RiskPipeline::new(&config).assess(QUIET_CONTRACT, Some(&analysis), &mut noise);

    // diff = 85 - 40 = 45
    assert_eq!(assessment.scores.get(RiskCategory::Operational), 85);
    assert_eq!(assessment.scores.get(RiskCategory::Financial), 80);
    assert_eq!(assessment.scores.get(RiskCategory::Legal), 10);
    let sync = assessment.sync.unwrap();
    assert_eq!(sync.pinned, vec![RiskCategory::Operational]);
    assert_eq!(sync.boosted, vec![RiskCategory::Financial]);
}

#[test]
fn sync_runs_after_overlay() {
    // Overlay lifts Legal to 60 first; sync then pins Legal and pushes
    // nothing else because every other category is at or below 30.
    let analysis = AnalysisResult {
        risk_score: Some(92),
        clauses: Some(vec![ClauseRecord::new("Arbitration", RiskLevel::Medium)]),
        ..AnalysisResult::default()
    };

    let assessment =
        RiskPipeline::default().assess(QUIET_CONTRACT, Some(&analysis), &mut FixedNoise(9));

    insta::assert_debug_snapshot!(assessment.categories, @r###"
    [
        Financial(9, noise floor),
        Legal(92, global sync),
        Operational(9, noise floor),
        Compliance(9, noise floor),
        Termination(9, noise floor),
    ]
    "###);
    assert_eq!(assessment.boosts.len(), 1);
}

// ============ Ingestion to Radar ============

#[test]
fn unreadable_model_reply_still_produces_radar() {
    let analysis = AnalysisResult::parse_or_fallback("Sorry, I cannot help with that.");
    let assessment =
        RiskPipeline::default().assess(QUIET_CONTRACT, Some(&analysis), &mut FixedNoise(11));

    // Fallback headline of 60 pins every tied noise-floor category.
    assert!(assessment.radar.values().iter().all(|v| *v == 60));
}

#[test]
fn model_reply_wrapped_in_prose() {
    let reply = r#"Sure! Here is the JSON:
{"summary": "Lease", "risk_score": 40,
 "clauses": [{"type": "Non-Compete", "risk_level": "HIGH", "text": "..."}]}
Hope this helps."#;
    let analysis = AnalysisResult::parse_or_fallback(reply);
    let assessment =
        RiskPipeline::default().assess(QUIET_CONTRACT, Some(&analysis), &mut FixedNoise(10));

    assert_eq!(assessment.scores.get(RiskCategory::Operational), 85);
    assert!(assessment.sync.is_none());
}

#[test]
fn pipeline_is_shareable_across_threads() {
    let pipeline = RiskPipeline::default();
    let analysis = vendor_analysis();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let pipeline = &pipeline;
                let analysis = &analysis;
                scope.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    pipeline
                        .assess(VENDOR_CONTRACT, Some(analysis), &mut rng)
                        .scores
                        .get(RiskCategory::Financial)
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 85);
        }
    });
}

#[test]
fn configured_keywords_reach_the_baseline_index() {
    let config =
        ScoringConfig::from_toml_str("[extra_keywords]\nCompliance = [\"HIPAA\"]").unwrap();
    let pipeline = RiskPipeline::new(&config);

    let terms = pipeline.baseline().index().keywords(RiskCategory::Compliance);
    assert_eq!(terms.first().map(String::as_str), Some("audit"));
    assert_eq!(terms.last().map(String::as_str), Some("hipaa"));

    let assessment = pipeline.assess("HIPAA applies.", None, &mut FixedNoise(7));
    assert_eq!(assessment.scores.get(RiskCategory::Compliance), 5);
}
