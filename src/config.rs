use crate::error::{ParseEnvFlagSnafu, ParseEnvNumberSnafu, RosterError, RosterResult};
use dotenvy::var;
use snafu::ResultExt;
use std::env::VarError;

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: String,
    max_upload_bytes: usize,
    seed_demo_students: bool,
}

impl Default for RuntimeConfiguration {
    fn default() -> Self {
        Self {
            server_ip: DEFAULT_SERVER_IP.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            seed_demo_students: true,
        }
    }
}

impl RuntimeConfiguration {
    ///reads `ROSTER_*` variables, falling back to the defaults for anything unset
    pub fn new() -> RosterResult<Self> {
        let defaults = Self::default();

        Ok(Self {
            server_ip: optional_env_var("ROSTER_SERVER_IP")?.unwrap_or(defaults.server_ip),
            max_upload_bytes: optional_env_var("ROSTER_MAX_UPLOAD_BYTES")?
                .map(|raw| parse_number("ROSTER_MAX_UPLOAD_BYTES", &raw))
                .transpose()?
                .unwrap_or(defaults.max_upload_bytes),
            seed_demo_students: optional_env_var("ROSTER_SEED_DEMO_STUDENTS")?
                .map(|raw| parse_flag("ROSTER_SEED_DEMO_STUDENTS", &raw))
                .transpose()?
                .unwrap_or(defaults.seed_demo_students),
        })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub const fn seed_demo_students(&self) -> bool {
        self.seed_demo_students
    }
}

fn optional_env_var(name: &'static str) -> RosterResult<Option<String>> {
    match var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(source) => Err(RosterError::BadEnvVar { source, name }),
    }
}

fn parse_number(name: &'static str, raw: &str) -> RosterResult<usize> {
    raw.trim().parse().context(ParseEnvNumberSnafu { name })
}

fn parse_flag(name: &'static str, raw: &str) -> RosterResult<bool> {
    raw.trim().to_lowercase().parse().context(ParseEnvFlagSnafu { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally_and_seed() {
        let config = RuntimeConfiguration::default();
        assert_eq!(config.server_ip(), "127.0.0.1:8080");
        assert_eq!(config.max_upload_bytes(), 10 * 1024 * 1024);
        assert!(config.seed_demo_students());
    }

    #[test]
    fn numbers_tolerate_whitespace() {
        assert_eq!(parse_number("TEST", " 2048 ").unwrap(), 2048);
        assert!(matches!(
            parse_number("TEST", "lots"),
            Err(RosterError::ParseEnvNumber { name: "TEST", .. })
        ));
    }

    #[test]
    fn flags_are_case_insensitive() {
        assert!(parse_flag("TEST", "TRUE").unwrap());
        assert!(!parse_flag("TEST", "false").unwrap());
        assert!(matches!(
            parse_flag("TEST", "yes"),
            Err(RosterError::ParseEnvFlag { name: "TEST", .. })
        ));
    }
}
