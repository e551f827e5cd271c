//! Prompt rendering for the scoring and summary oracle calls.

use std::fmt::Write as _;

use super::{OraclePrompt, OracleSettings};
use crate::scoring::dimensions::Dimension;
use crate::scoring::response::ScoringRequest;
use crate::scoring::summary::{JobContext, ScoredResponse};
use crate::scoring::verticals;

const SCORING_SYSTEM: &str = "You are an experienced interviewer evaluating one recorded \
interview answer. Judge only what the candidate actually said. Respond with a single JSON \
object and nothing else.";

const SUMMARY_SYSTEM: &str = "You are a hiring panel lead writing the final assessment of a \
recorded interview. Weigh every answer and its scores. Respond with a single JSON object and \
nothing else.";

/// Render the per-answer scoring prompt, including the vertical rubric
pub fn scoring_prompt(request: &ScoringRequest, settings: &OracleSettings) -> OraclePrompt {
    let mut user = String::new();
    let _ = writeln!(user, "Role: {}", request.job_title);
    push_requirements(&mut user, &request.job_requirements);

    let rubric = verticals::rubric_for(request.vertical.as_deref());
    if !rubric.is_empty() {
        let _ = writeln!(user, "\nEvaluation rubric:\n{}", rubric);
    }

    let _ = writeln!(user, "\nQuestion:\n{}", request.question.trim());
    let _ = writeln!(user, "\nCandidate answer (transcript):\n{}", request.transcript.trim());

    user.push_str("\nScore each dimension from 0 to 100:\n");
    for dimension in Dimension::ALL {
        let _ = writeln!(user, "- {} ({})", dimension.key(), dimension.label());
    }
    user.push_str(
        "\nReturn JSON with this shape:\n\
         {\"scores\": {\"communication\": 0-100, \"problem_solving\": 0-100, \
         \"domain_knowledge\": 0-100, \"motivation\": 0-100, \"culture_fit\": 0-100}, \
         \"overall_score\": 0-100, \"analysis\": \"...\", \"strengths\": [\"...\"], \
         \"concerns\": [\"...\"], \"highlight_quotes\": [\"exact quote\"]}\n",
    );

    OraclePrompt {
        system: SCORING_SYSTEM.to_string(),
        user,
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}

/// Render the interview summary prompt embedding every scored response
pub fn summary_prompt(
    responses: &[ScoredResponse],
    job: &JobContext,
    settings: &OracleSettings,
) -> OraclePrompt {
    let mut user = String::new();
    let _ = writeln!(user, "Role: {}", job.job_title);
    push_requirements(&mut user, &job.job_requirements);

    for (idx, response) in responses.iter().enumerate() {
        let score = &response.score;
        let _ = writeln!(user, "\n### Question {}\n{}", idx + 1, response.question.trim());
        let _ = writeln!(user, "Answer:\n{}", response.transcript.trim());
        let _ = write!(user, "Scores (0-10):");
        for (dimension, value) in score.dimensions.iter() {
            let _ = write!(user, " {}={:.1}", dimension.key(), value);
        }
        let _ = writeln!(user, " overall={:.1}", score.overall);
        if !score.analysis.is_empty() {
            let _ = writeln!(user, "Analysis: {}", score.analysis);
        }
    }

    user.push_str(
        "\nReturn JSON with this shape:\n\
         {\"total_score\": 0-100, \"summary\": \"...\", \"overall_strengths\": [\"...\"], \
         \"overall_concerns\": [\"...\"], \"recommendation\": \"advance\" | \"maybe\" | \"reject\"}\n",
    );

    OraclePrompt {
        system: SUMMARY_SYSTEM.to_string(),
        user,
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}

fn push_requirements(out: &mut String, requirements: &[String]) {
    if requirements.is_empty() {
        return;
    }
    out.push_str("Requirements:\n");
    for requirement in requirements {
        let _ = writeln!(out, "- {}", requirement);
    }
}
