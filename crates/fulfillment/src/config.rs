//! Service configuration loaded from environment variables.

use std::time::Duration;

/// Order service tuning with sensible defaults.
///
/// Reads from environment variables:
/// - `FLOW_DEADLINE_SECS` — upper bound on one order flow run, in seconds
///   (default: `30`). A stalled collaborator call cannot hold a placement
///   transaction open past this deadline.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub flow_deadline: Duration,
}

impl ServiceConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// An unset variable is silent; a set-but-unparsable one is logged
    /// before the default takes over.
    pub fn from_env() -> Self {
        let default = Self::default();
        let flow_deadline = match std::env::var("FLOW_DEADLINE_SECS") {
            Ok(raw) => match raw.parse() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        default_secs = default.flow_deadline.as_secs(),
                        "invalid FLOW_DEADLINE_SECS, using default"
                    );
                    default.flow_deadline
                }
            },
            Err(_) => default.flow_deadline,
        };
        Self { flow_deadline }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            flow_deadline: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deadline() {
        let config = ServiceConfig::default();
        assert_eq!(config.flow_deadline, Duration::from_secs(30));
    }

    // One test owns the variable end to end so parallel runs cannot race.
    #[test]
    fn from_env_parses_and_falls_back() {
        unsafe { std::env::set_var("FLOW_DEADLINE_SECS", "5") };
        assert_eq!(
            ServiceConfig::from_env().flow_deadline,
            Duration::from_secs(5)
        );

        unsafe { std::env::set_var("FLOW_DEADLINE_SECS", "not-a-number") };
        assert_eq!(
            ServiceConfig::from_env().flow_deadline,
            Duration::from_secs(30)
        );

        unsafe { std::env::remove_var("FLOW_DEADLINE_SECS") };
        assert_eq!(
            ServiceConfig::from_env().flow_deadline,
            Duration::from_secs(30)
        );
    }
}
