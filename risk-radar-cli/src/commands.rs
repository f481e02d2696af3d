use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use risk_radar::{
    AnalysisResult, AssessmentDisplay, DashboardSummary, RiskAssessment, RiskCategory,
    RiskPipeline, ScoringConfig,
};

use crate::cli::OutputFormat;

#[derive(Serialize)]
struct AssessOutput<'a> {
    dashboard: &'a DashboardSummary,
    assessment: &'a RiskAssessment,
}

pub fn load_config(path: Option<&Path>) -> Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ScoringConfig::default()),
    }
}

fn load_analysis(path: &Path, strict: bool) -> Result<AnalysisResult> {
    let reply = fs::read_to_string(path)
        .with_context(|| format!("reading analysis {}", path.display()))?;
    if strict {
        return AnalysisResult::from_model_reply(&reply)
            .with_context(|| format!("parsing analysis {}", path.display()));
    }
    Ok(AnalysisResult::parse_or_fallback(&reply))
}

pub fn assess(
    config: &ScoringConfig,
    contract: &Path,
    analysis: Option<&Path>,
    strict: bool,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<String> {
    let text = fs::read_to_string(contract)
        .with_context(|| format!("reading contract {}", contract.display()))?;
    if text.trim().is_empty() {
        warn!(
            path = %contract.display(),
            "contract text is empty; radar will show noise floor only"
        );
    }

    let analysis = analysis
        .map(|path| load_analysis(path, strict))
        .transpose()?;

    let pipeline = RiskPipeline::new(config);
    let assessment = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            pipeline.assess(&text, analysis.as_ref(), &mut rng)
        }
        None => pipeline.assess_with_thread_rng(&text, analysis.as_ref()),
    };
    let dashboard = DashboardSummary::build(&text, analysis.as_ref(), config);
    info!(
        headline = dashboard.headline_score,
        peak = assessment.peak(),
        "contract assessed"
    );

    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&AssessOutput {
            dashboard: &dashboard,
            assessment: &assessment,
        })?,
        OutputFormat::Text => AssessmentDisplay::new(&assessment)
            .with_dashboard(&dashboard)
            .with_trace()
            .to_string(),
    };
    Ok(rendered)
}

pub fn keywords(config: &ScoringConfig, category: Option<&str>) -> Result<String> {
    let only = match category {
        Some(name) => match RiskCategory::from_name(name) {
            Some(category) => Some(category),
            None => bail!("unknown risk category: {}", name),
        },
        None => None,
    };

    let pipeline = RiskPipeline::new(config);
    let mut out = String::new();
    for (category, terms) in pipeline.baseline().index().iter() {
        if only.map_or(false, |only| only != category) {
            continue;
        }
        out.push_str(&format!("{}: {}\n", category, terms.join(", ")));
    }
    Ok(out)
}
