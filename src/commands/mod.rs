//! CLI command implementations.
//!
//! Available commands:
//! - **verify**: Run the transcript authenticity checks
//! - **calibrate**: Place a raw score within its cohort
//! - **personas**: Re-weight a score through each interviewer persona
//! - **verticals**: List canonical verticals and their weights
//! - **init**: Write a default configuration file
//!
//! Handlers write to any `io::Write` so they can be exercised without a terminal.

pub mod calibrate;
pub mod init;
pub mod personas;
pub mod verify;
pub mod verticals;

pub use calibrate::{calibrate_score, CalibrateConfig};
pub use init::init_config;
pub use personas::{simulate_personas, PersonasConfig};
pub use verify::{verify_transcript, VerifyConfig};
pub use verticals::list_verticals;
