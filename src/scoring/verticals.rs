//! Vertical rubric registry.
//!
//! Each vertical (a hiring track such as software engineering or sales) carries
//! its own dimension weights and rubric text. Legacy vertical names resolve to
//! canonical ones through an alias table. Lookups fail open: an unknown vertical
//! gets uniform weights and an empty rubric.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

use super::dimensions::DimensionWeights;

/// Weights and rubric for one canonical vertical
#[derive(Debug, Clone, Serialize)]
pub struct VerticalConfig {
    pub name: &'static str,
    pub display_name: &'static str,
    pub weights: DimensionWeights,
    pub rubric: &'static str,
}

static VERTICALS: Lazy<BTreeMap<&'static str, VerticalConfig>> = Lazy::new(|| {
    [
        VerticalConfig {
            name: "software_engineering",
            display_name: "Software Engineering",
            weights: DimensionWeights::new(0.20, 0.30, 0.25, 0.15, 0.10),
            rubric: "Reward precise technical reasoning: decomposing the problem, naming \
                     trade-offs (complexity, reliability, maintainability) and grounding claims \
                     in concrete systems the candidate has built. Penalise buzzwords without \
                     mechanism. Clear explanation of code and design counts toward communication.",
        },
        VerticalConfig {
            name: "systems_engineering",
            display_name: "Systems & Infrastructure Engineering",
            weights: DimensionWeights::new(0.15, 0.30, 0.30, 0.15, 0.10),
            rubric: "Look for operational depth: failure modes, observability, capacity \
                     planning, incident response and automation. Strong answers describe how a \
                     system behaves under load or partial failure and how they verified it.",
        },
        VerticalConfig {
            name: "data_science",
            display_name: "Data Science & Analytics",
            weights: DimensionWeights::new(0.20, 0.30, 0.30, 0.10, 0.10),
            rubric: "Reward sound statistical reasoning, awareness of data quality and bias, \
                     appropriate model or metric choice, and the ability to translate findings \
                     into decisions for non-technical stakeholders.",
        },
        VerticalConfig {
            name: "product_management",
            display_name: "Product Management",
            weights: DimensionWeights::new(0.25, 0.25, 0.20, 0.15, 0.15),
            rubric: "Assess customer empathy, prioritisation frameworks, use of evidence, \
                     stakeholder alignment and clarity about outcomes versus output.",
        },
        VerticalConfig {
            name: "design",
            display_name: "Design",
            weights: DimensionWeights::new(0.25, 0.20, 0.25, 0.15, 0.15),
            rubric: "Look for user-centred process, research-backed decisions, articulation of \
                     design rationale and collaboration with engineering and product.",
        },
        VerticalConfig {
            name: "sales",
            display_name: "Sales",
            weights: DimensionWeights::new(0.35, 0.15, 0.15, 0.20, 0.15),
            rubric: "Reward discovery questions, objection handling, quantified results \
                     (quota attainment, pipeline) and resilience. Persuasive, structured \
                     communication is the primary signal.",
        },
        VerticalConfig {
            name: "marketing",
            display_name: "Marketing",
            weights: DimensionWeights::new(0.30, 0.20, 0.20, 0.15, 0.15),
            rubric: "Assess audience understanding, channel strategy, measurement of campaign \
                     impact and creative clarity of messaging.",
        },
        VerticalConfig {
            name: "customer_success",
            display_name: "Customer Success & Support",
            weights: DimensionWeights::new(0.35, 0.20, 0.10, 0.15, 0.20),
            rubric: "Reward empathy, de-escalation, ownership of outcomes and clear written and \
                     verbal explanations. Look for retention or satisfaction results.",
        },
        VerticalConfig {
            name: "healthcare",
            display_name: "Healthcare",
            weights: DimensionWeights::new(0.25, 0.20, 0.30, 0.15, 0.10),
            rubric: "Assess clinical or regulatory knowledge, patient safety awareness, \
                     adherence to protocol and compassionate communication.",
        },
    ]
    .into_iter()
    .map(|config| (config.name, config))
    .collect()
});

static ALIASES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("engineering", "software_engineering"),
        ("swe", "software_engineering"),
        ("software", "software_engineering"),
        ("backend", "software_engineering"),
        ("frontend", "software_engineering"),
        ("fullstack", "software_engineering"),
        ("full_stack", "software_engineering"),
        ("infrastructure", "systems_engineering"),
        ("devops", "systems_engineering"),
        ("sre", "systems_engineering"),
        ("embedded", "systems_engineering"),
        ("data", "data_science"),
        ("ml", "data_science"),
        ("analytics", "data_science"),
        ("product", "product_management"),
        ("pm", "product_management"),
        ("ux", "design"),
        ("ui", "design"),
        ("account_executive", "sales"),
        ("bdr", "sales"),
        ("sdr", "sales"),
        ("growth", "marketing"),
        ("support", "customer_success"),
        ("customer_support", "customer_success"),
        ("clinical", "healthcare"),
        ("nursing", "healthcare"),
    ]
    .into_iter()
    .collect()
});

/// Fold case, whitespace and hyphens so "Software-Engineering " matches
pub fn normalize_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Canonical vertical name for `name`, following legacy aliases
pub fn canonical_name(name: &str) -> Option<&'static str> {
    let key = normalize_key(name);
    if let Some((canonical, _)) = VERTICALS.get_key_value(key.as_str()) {
        return Some(*canonical);
    }
    ALIASES.get(key.as_str()).copied()
}

/// Look up a vertical by canonical or legacy name
pub fn resolve(name: &str) -> Option<&'static VerticalConfig> {
    canonical_name(name).and_then(|canonical| VERTICALS.get(canonical))
}

/// Weights for an optional vertical; unknown or absent gets uniform weights
pub fn weights_for(vertical: Option<&str>) -> DimensionWeights {
    vertical
        .and_then(resolve)
        .map(|config| config.weights)
        .unwrap_or_default()
}

/// Rubric text for an optional vertical; unknown or absent gets ""
pub fn rubric_for(vertical: Option<&str>) -> &'static str {
    vertical.and_then(resolve).map_or("", |config| config.rubric)
}

/// All canonical verticals, ordered by name
pub fn verticals() -> impl Iterator<Item = &'static VerticalConfig> {
    VERTICALS.values()
}

/// Check every registered weight map sums to 1.0
pub fn validate_all() -> Result<(), String> {
    verticals().try_for_each(|config| config.weights.validate(config.name))
}
