//! Runtime settings merged from CLI arguments and the config file.

use super::args::Args;
use crate::ascii::CharacterRamp;
use crate::config::{Config, ConfigError};

/// Options for a single run, resolved once at startup.
///
/// Precedence: CLI args > config file > built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ramp: CharacterRamp,
    pub invert: bool,
    pub header: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ramp: CharacterRamp::default(),
            invert: false,
            header: false,
        }
    }
}

impl Settings {
    pub fn resolve(args: &Args, config: &Config) -> Result<Self, ConfigError> {
        let ramp = match &args.charset {
            Some(ramp) => ramp.clone(),
            None => config.ramp()?.unwrap_or_default(),
        };

        Ok(Self {
            ramp,
            invert: !args.no_invert && (args.invert || config.ascii.invert),
            header: !args.no_header && (args.header || config.output.header),
        })
    }
}
