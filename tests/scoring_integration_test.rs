//! Scoring pipeline driven through the in-memory oracle

use candidate_scoring::scoring::persona;
use candidate_scoring::scoring::verticals;
use candidate_scoring::testkit::helpers::{scoring_payload, scoring_request};
use candidate_scoring::testkit::MockOracle;
use candidate_scoring::{
    calculate_overall_score, Error, JobContext, OracleSettings, Recommendation, ResponseScorer,
    ScoredResponse, SummaryAggregator,
};
use serde_json::json;
use std::sync::Arc;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn job() -> JobContext {
    JobContext {
        job_title: "Backend Engineer".to_string(),
        job_requirements: vec!["Rust".to_string()],
        vertical: Some("engineering".to_string()),
    }
}

#[tokio::test]
async fn test_out_of_range_scores_are_clamped() {
    let oracle = MockOracle::new().with_json(json!({
        "scores": {"communication": 150, "problem_solving": -20},
        "overall_score": 200
    }));
    let scorer = ResponseScorer::new(oracle);

    let score = scorer.score(&scoring_request(None)).await.unwrap();
    assert_eq!(score.dimensions.communication, 10.0);
    assert_eq!(score.dimensions.problem_solving, 0.0);
    assert_eq!(score.overall, 10.0);
    assert!(score.is_bounded());
}

#[tokio::test]
async fn test_missing_dimensions_default_to_midpoint() {
    let oracle = MockOracle::new().with_response(r#"{"analysis": "short answer"}"#);
    let scorer = ResponseScorer::new(oracle);

    let score = scorer.score(&scoring_request(Some("sales"))).await.unwrap();
    for (_, value) in score.dimensions.iter() {
        assert_eq!(value, 5.0);
    }
    assert!(approx(score.overall, 5.0));
    assert_eq!(score.analysis, "short answer");
}

#[tokio::test]
async fn test_vertical_weights_shape_the_overall() {
    let payload = scoring_payload([40.0, 90.0, 90.0, 40.0, 40.0]);
    let oracle = MockOracle::new().with_json(payload.clone()).with_json(payload);
    let scorer = ResponseScorer::new(oracle);

    let engineering = scorer.score(&scoring_request(Some("swe"))).await.unwrap();
    let sales = scorer.score(&scoring_request(Some("sales"))).await.unwrap();
    assert_eq!(engineering.vertical.as_deref(), Some("software_engineering"));
    assert!(engineering.overall > sales.overall);
}

#[tokio::test]
async fn test_prompt_carries_rubric_and_settings() {
    let oracle = MockOracle::new().with_json(scoring_payload([70.0; 5]));
    let settings = OracleSettings {
        max_tokens: 600,
        ..OracleSettings::default()
    };
    let scorer = ResponseScorer::with_settings(oracle.clone(), settings);

    scorer.score(&scoring_request(Some("healthcare"))).await.unwrap();
    let prompts = oracle.prompts();
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].max_tokens, 600);
    assert!(prompts[0].user.contains(verticals::rubric_for(Some("healthcare"))));
    assert!(prompts[0].user.contains("Tell me about a system you designed."));
}

#[tokio::test]
async fn test_prose_wrapped_json_is_recovered() {
    let oracle = MockOracle::new().with_response(
        "Here is my evaluation:\n```json\n{\"scores\": {\"communication\": 90}}\n```",
    );
    let score = ResponseScorer::new(oracle)
        .score(&scoring_request(None))
        .await
        .unwrap();
    assert_eq!(score.dimensions.communication, 9.0);
}

#[tokio::test]
async fn test_unparseable_reply_fails_loudly() {
    let oracle = MockOracle::new().with_response("I cannot score this answer.");
    let err = ResponseScorer::new(oracle)
        .score(&scoring_request(None))
        .await
        .unwrap_err();
    assert!(err.is_unparseable());
    assert!(matches!(err, Error::OracleUnparseable { .. }));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let oracle = MockOracle::new().with_failure("connection reset");
    let err = ResponseScorer::new(oracle)
        .score(&scoring_request(None))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Oracle(ref message) if message == "connection reset"));
}

#[tokio::test]
async fn test_concurrent_scoring_then_summary() {
    let oracle = Arc::new(MockOracle::new().with_fallback(scoring_payload([80.0; 5]).to_string()));
    let scorer = Arc::new(ResponseScorer::new(Arc::clone(&oracle)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scorer = Arc::clone(&scorer);
            tokio::spawn(async move { scorer.score(&scoring_request(Some("engineering"))).await })
        })
        .collect();

    let mut responses = Vec::new();
    for handle in handles {
        let score = handle.await.unwrap().unwrap();
        responses.push(ScoredResponse {
            question: "Q".to_string(),
            transcript: "A".to_string(),
            score,
        });
    }
    assert_eq!(oracle.call_count(), 4);

    let scores: Vec<_> = responses.iter().map(|r| r.score.clone()).collect();
    assert!(approx(calculate_overall_score(&scores), 8.0));

    let summarizer = SummaryAggregator::new(
        MockOracle::new().with_json(json!({
            "total_score": 78,
            "summary": "Consistent, well-structured answers.",
            "overall_strengths": ["system design"],
            "overall_concerns": [],
            "recommendation": " ADVANCE "
        })),
    );
    let summary = summarizer.summarize(&responses, &job()).await.unwrap();
    assert!(approx(summary.total_score, 7.8));
    assert_eq!(summary.recommendation, Recommendation::Advance);
    assert_eq!(summary.strengths, vec!["system design".to_string()]);
}

#[tokio::test]
async fn test_unknown_recommendation_is_maybe() {
    let responses = vec![ScoredResponse {
        question: "Q".to_string(),
        transcript: "A".to_string(),
        score: ResponseScorer::new(MockOracle::new().with_json(scoring_payload([60.0; 5])))
            .score(&scoring_request(None))
            .await
            .unwrap(),
    }];
    let summarizer = SummaryAggregator::new(
        MockOracle::new().with_json(json!({"summary": "ok", "recommendation": "nonsense"})),
    );
    let summary = summarizer.summarize(&responses, &job()).await.unwrap();
    assert_eq!(summary.recommendation, Recommendation::Maybe);
    // No total_score: falls back to the mean of the answers
    assert!(approx(summary.total_score, 6.0));
}

#[tokio::test]
async fn test_empty_interview_skips_oracle() {
    let oracle = MockOracle::new();
    let summary = SummaryAggregator::new(oracle.clone())
        .summarize(&[], &job())
        .await
        .unwrap();
    assert_eq!(summary.total_score, 0.0);
    assert_eq!(summary.recommendation, Recommendation::Maybe);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_personas_over_a_scored_answer() {
    let score = ResponseScorer::new(MockOracle::new().with_json(scoring_payload([90.0, 50.0, 50.0, 90.0, 90.0])))
        .score(&scoring_request(Some("software_engineering")))
        .await
        .unwrap();

    let views = persona::simulate_all(&score, Some("software_engineering"));
    assert_eq!(views.len(), persona::personas().count());
    for view in &views {
        assert!((0.0..=10.0).contains(&view.overall));
        assert!(approx(view.weights.sum(), 1.0));
    }
    // The technical lead weighs problem solving up, so this candidate drops
    let lead = views.iter().find(|v| v.persona == "technical_lead").unwrap();
    assert!(lead.delta_from_baseline < 0.0);
}
