//! MIDI link configuration
//!
//! Configuration can come from two places:
//!
//! - A TOML file, parsed by a minimal `no_std` line parser. Only the
//!   subset below is understood:
//!
//!   ```toml
//!   [midi]
//!   baudrate = 31250
//!   running_status = true
//!   rx_channel = "omni"   # or 1-16
//!   tx_channel = 1        # 1-16
//!   thru = false
//!   ```
//!
//!   Integers may use `_` separators and `0x`/`0o`/`0b` prefixes. Strings
//!   may be basic (`"omni"`) or literal (`'omni'`).
//!
//! - A postcard binary blob (with the `serde` feature), for storing the
//!   active settings in flash.
//!
//! Channels are written one-based (as printed on instruments) and stored
//! zero-based (as sent on the wire).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoder::Encoder;
use crate::parser::MidiParser;

/// Current binary config version
pub const CONFIG_VERSION: u8 = 1;

/// Standard MIDI line rate
pub const DEFAULT_BAUDRATE: u32 = 31_250;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key not recognized
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Channel outside 1-16
    InvalidChannel,
    /// Binary encoding failed (buffer too small)
    Serialize,
    /// Binary decoding failed
    Deserialize,
    /// Binary config written by an incompatible version
    VersionMismatch,
}

/// Serial MIDI settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MidiConfig {
    /// Config format version
    pub version: u8,
    /// Line rate in bits per second
    pub baudrate: u32,
    /// Elide repeated status bytes on transmit
    pub running_status: bool,
    /// Receive channel filter, zero-based (`None` = omni)
    pub rx_channel: Option<u8>,
    /// Transmit channel for re-sent events, zero-based
    pub tx_channel: u8,
    /// Echo received events back out (software MIDI thru)
    pub thru: bool,
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            baudrate: DEFAULT_BAUDRATE,
            running_status: true,
            rx_channel: None,
            tx_channel: 0,
            thru: false,
        }
    }
}

impl MidiConfig {
    /// Build an encoder honoring `running_status`
    pub fn encoder(&self) -> Encoder {
        if self.running_status {
            Encoder::new()
        } else {
            Encoder::without_running_status()
        }
    }

    /// Build a parser honoring `rx_channel`
    pub fn parser(&self) -> MidiParser {
        match self.rx_channel {
            Some(channel) => MidiParser::with_channel(channel),
            None => MidiParser::new(),
        }
    }

    /// Parse the TOML subset described in the module docs
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in input.lines() {
            let line = strip_comment(line).trim();

            // Skip empty lines and comments
            if line.is_empty() {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                if line[1..line.len() - 1].trim() != "midi" {
                    return Err(ConfigError::InvalidSection);
                }
                continue;
            }

            let (key, value) = line.split_once('=').ok_or(ConfigError::InvalidLine)?;
            config.apply(key.trim(), value.trim())?;
        }

        Ok(config)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "baudrate" => {
                let baudrate = parse_u32(value)?;
                if baudrate == 0 {
                    return Err(ConfigError::InvalidValue);
                }
                self.baudrate = baudrate;
            }
            "running_status" => self.running_status = parse_bool(value)?,
            "rx_channel" => {
                self.rx_channel = match parse_string(value) {
                    Some("omni") => None,
                    Some(_) => return Err(ConfigError::InvalidChannel),
                    None => Some(parse_channel(value)?),
                }
            }
            "tx_channel" => self.tx_channel = parse_channel(value)?,
            "thru" => self.thru = parse_bool(value)?,
            _ => return Err(ConfigError::UnknownKey),
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Deserialize from a postcard blob
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        if config.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch);
        }
        Ok(config)
    }
}

/// Drop a trailing `# comment`, ignoring `#` inside quotes
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (i, c) in line.char_indices() {
        match (c, quote) {
            ('"' | '\'', None) => quote = Some(c),
            (c, Some(q)) if c == q => quote = None,
            ('#', None) => return &line[..i],
            _ => {}
        }
    }
    line
}

/// TOML integer: optional `+`, radix prefix, `_` between digits
fn parse_integer(value: &str) -> Option<u32> {
    let value = value.strip_prefix('+').unwrap_or(value);
    let (digits, radix) = match value.get(..2) {
        Some("0x") => (&value[2..], 16),
        Some("0o") => (&value[2..], 8),
        Some("0b") => (&value[2..], 2),
        _ => (value, 10),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }

    let mut result: u32 = 0;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(radix)?;
        result = result.checked_mul(radix)?.checked_add(digit)?;
    }
    Some(result)
}

fn parse_u32(value: &str) -> Result<u32, ConfigError> {
    parse_integer(value).ok_or(ConfigError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}

/// Contents of a basic or literal string, or `None` if not quoted
fn parse_string(value: &str) -> Option<&str> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'')?.strip_suffix('\''))
}

/// One-based channel number to zero-based wire channel
fn parse_channel(value: &str) -> Result<u8, ConfigError> {
    match parse_integer(value) {
        Some(channel @ 1..=16) => Ok(channel as u8 - 1),
        _ => Err(ConfigError::InvalidChannel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MidiConfig::default();
        assert_eq!(config.baudrate, 31_250);
        assert!(config.running_status);
        assert_eq!(config.rx_channel, None);
        assert!(!config.thru);
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
            # Tactus MIDI link
            [midi]
            baudrate = 38400
            running_status = false   # some old synths choke on it
            rx_channel = 10
            tx_channel = 2
            thru = true
        "#;
        let config = MidiConfig::from_toml(toml).unwrap();
        assert_eq!(config.baudrate, 38_400);
        assert!(!config.running_status);
        assert_eq!(config.rx_channel, Some(9));
        assert_eq!(config.tx_channel, 1);
        assert!(config.thru);
    }

    #[test]
    fn test_parse_omni() {
        let config = MidiConfig::from_toml("rx_channel = \"omni\"").unwrap();
        assert_eq!(config.rx_channel, None);
    }

    #[test]
    fn test_empty_keeps_defaults() {
        assert_eq!(MidiConfig::from_toml("").unwrap(), MidiConfig::default());
    }

    #[test]
    fn test_invalid_channel() {
        assert_eq!(
            MidiConfig::from_toml("rx_channel = 0"),
            Err(ConfigError::InvalidChannel)
        );
        assert_eq!(
            MidiConfig::from_toml("tx_channel = 17"),
            Err(ConfigError::InvalidChannel)
        );
        assert_eq!(
            MidiConfig::from_toml("rx_channel = \"all\""),
            Err(ConfigError::InvalidChannel)
        );
    }

    #[test]
    fn test_invalid_lines() {
        assert_eq!(
            MidiConfig::from_toml("[stepper]"),
            Err(ConfigError::InvalidSection)
        );
        assert_eq!(
            MidiConfig::from_toml("baudrate"),
            Err(ConfigError::InvalidLine)
        );
        assert_eq!(
            MidiConfig::from_toml("tempo = 120"),
            Err(ConfigError::UnknownKey)
        );
        assert_eq!(
            MidiConfig::from_toml("thru = yes"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            MidiConfig::from_toml("baudrate = 0"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_integer_forms() {
        let config = MidiConfig::from_toml("[midi]\nbaudrate = 31_250\nthru = true").unwrap();
        assert_eq!(config.baudrate, 31_250);
        assert!(config.thru);

        assert_eq!(MidiConfig::from_toml("tx_channel = 0x02").unwrap().tx_channel, 1);
        assert_eq!(MidiConfig::from_toml("tx_channel = 0o20").unwrap().tx_channel, 15);
        assert_eq!(MidiConfig::from_toml("rx_channel = 0b11").unwrap().rx_channel, Some(2));
        assert_eq!(MidiConfig::from_toml("baudrate = +38400").unwrap().baudrate, 38_400);
    }

    #[test]
    fn test_invalid_integer_forms() {
        for input in ["baudrate = _31250", "baudrate = 31250_", "baudrate = 0x", "baudrate = 0xZZ"] {
            assert_eq!(MidiConfig::from_toml(input), Err(ConfigError::InvalidValue));
        }
        assert_eq!(
            MidiConfig::from_toml("baudrate = 99999999999"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            MidiConfig::from_toml("tx_channel = -1"),
            Err(ConfigError::InvalidChannel)
        );
    }

    #[test]
    fn test_literal_strings() {
        let config = MidiConfig::from_toml("rx_channel = 'omni'  # all channels").unwrap();
        assert_eq!(config.rx_channel, None);
        assert_eq!(
            MidiConfig::from_toml("rx_channel = 'omni\""),
            Err(ConfigError::InvalidChannel)
        );
    }

    #[test]
    fn test_embedded_firmware_config() {
        let config = MidiConfig::from_toml(include_str!("../../tactus-firmware/midi.toml")).unwrap();
        assert_eq!(config.baudrate, 31_250);
        assert_eq!(config.rx_channel, None);
        assert!(config.thru);
    }

    #[test]
    fn test_builds_codec() {
        let config = MidiConfig::from_toml("running_status = false\nrx_channel = 3").unwrap();
        assert!(!config.encoder().elides());
        assert_eq!(config.parser().rx_channel(), Some(2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_roundtrip() {
        let config = MidiConfig {
            rx_channel: Some(4),
            thru: true,
            ..MidiConfig::default()
        };
        let mut buf = [0u8; 32];
        let len = config.to_slice(&mut buf).unwrap().len();
        assert_eq!(MidiConfig::from_bytes(&buf[..len]), Ok(config));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_version_mismatch() {
        let config = MidiConfig {
            version: CONFIG_VERSION + 1,
            ..MidiConfig::default()
        };
        let mut buf = [0u8; 32];
        let len = config.to_slice(&mut buf).unwrap().len();
        assert_eq!(
            MidiConfig::from_bytes(&buf[..len]),
            Err(ConfigError::VersionMismatch)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_buffer_too_small() {
        let mut buf = [0u8; 2];
        assert_eq!(
            MidiConfig::default().to_slice(&mut buf).map(|s| s.len()),
            Err(ConfigError::Serialize)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_garbage() {
        assert_eq!(MidiConfig::from_bytes(&[]), Err(ConfigError::Deserialize));
    }
}
