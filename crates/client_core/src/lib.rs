//! Client side of the ESG disclosure generator: transport, form view-model and
//! the submission state machine shared by the CLI and desktop front ends.

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod transport;

pub use config::{load_settings, normalize_base_url, ClientSettings};
pub use controller::{FormController, SubmitPhase};
pub use error::{ClientError, ValidationError, GENERATE_FAILED_MESSAGE, VALIDATION_MESSAGE};
pub use form::{DisclosureForm, FrameworkSelection, MetricRow};
pub use transport::{DisclosureApi, HttpDisclosureClient, DEFAULT_HISTORY_LIMIT};
