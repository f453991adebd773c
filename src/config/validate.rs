//! Configuration validation.

use crate::config::Config;
use crate::constants::MAX_WAVEFORM_WIDTH;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_waveform(config)?;
    Ok(())
}

fn validate_waveform(config: &Config) -> Result<()> {
    let width = config.waveform.width;
    if !(1..=MAX_WAVEFORM_WIDTH).contains(&width) {
        return Err(Error::ConfigValidation {
            message: format!(
                "waveform.width must be between 1 and {MAX_WAVEFORM_WIDTH}, got {width}"
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_width() {
        let mut config = Config::default();
        config.waveform.width = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_validate_width_bounds() {
        let mut config = Config::default();
        config.waveform.width = MAX_WAVEFORM_WIDTH;
        assert!(validate_config(&config).is_ok());
        config.waveform.width = MAX_WAVEFORM_WIDTH + 1;
        assert!(validate_config(&config).is_err());
    }
}
