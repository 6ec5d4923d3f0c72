pub mod core;
pub mod orchestration;
pub mod publish;
pub mod security;
pub mod validation;

pub use self::core::*;
pub use orchestration::{DeployReport, DeploySequencer, StepOutcome};
pub use publish::{FileSet, GitPagesPublisher};
pub use security::{CommandError, SafeCommandExecutor};
pub use validation::SiteValidator;
