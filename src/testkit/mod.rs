//! Testing infrastructure for candidate-scoring.
//!
//! - **[`MockOracle`]**: scripted, in-memory [`Oracle`](crate::oracle::Oracle)
//!   that records the prompts it receives
//! - **Helpers**: builders for transcripts, oracle payloads and scoring requests
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use candidate_scoring::scoring::ResponseScorer;
//! use candidate_scoring::testkit::{helpers, MockOracle};
//!
//! #[tokio::test]
//! async fn scores_an_answer() {
//!     let oracle = MockOracle::new().with_json(helpers::scoring_payload([80.0; 5]));
//!     let scorer = ResponseScorer::new(oracle.clone());
//!     let score = scorer.score(&helpers::scoring_request(None)).await.unwrap();
//!     assert!((score.overall - 8.0).abs() < 1e-9);
//!     assert_eq!(oracle.call_count(), 1);
//! }
//! ```

pub mod helpers;
pub mod mock_oracle;

pub use helpers::{reference_date, TranscriptBuilder};
pub use mock_oracle::MockOracle;
