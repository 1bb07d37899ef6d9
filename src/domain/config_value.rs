// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with permissive conversions.
//!
//! Every backend stores text. `ConfigValue` carries that text and knows how
//! to read it as a number or boolean, and how numbers and booleans are written
//! back. Reading never fails: text that is not a number reads as zero and
//! anything other than `TRUE` reads as `false`.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::numeric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text written for a `true` boolean.
pub const TRUE_LITERAL: &str = "TRUE";

/// Text written for a `false` boolean.
pub const FALSE_LITERAL: &str = "FALSE";

/// A configuration value as stored by a backend.
///
/// # Examples
///
/// ```
/// use mcs::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from("100");
/// assert_eq!(value.as_int(), 100);
///
/// let value = ConfigValue::from(true);
/// assert_eq!(value.as_str(), "TRUE");
/// assert!(value.as_bool());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the value into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Reads the value as a base-10 integer.
    ///
    /// Only the leading numeric part is used, so `"42px"` reads as `42`;
    /// text without a leading number reads as `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcs::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("42px").as_int(), 42);
    /// assert_eq!(ConfigValue::from("loud").as_int(), 0);
    /// ```
    pub fn as_int(&self) -> i32 {
        numeric::parse_leading_int(&self.0)
    }

    /// Reads the value as a boolean.
    ///
    /// Only `TRUE`, compared ignoring ASCII case, is true. Everything else,
    /// including `yes` and `1`, is false.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcs::domain::config_value::ConfigValue;
    ///
    /// assert!(ConfigValue::from("true").as_bool());
    /// assert!(!ConfigValue::from("yes").as_bool());
    /// ```
    pub fn as_bool(&self) -> bool {
        self.0.eq_ignore_ascii_case(TRUE_LITERAL)
    }

    /// Reads the value as a single precision float.
    pub fn as_f32(&self) -> f32 {
        numeric::parse_leading_float(&self.0) as f32
    }

    /// Reads the value as a double precision float.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcs::domain::config_value::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("0.75").as_f64(), 0.75);
    /// assert_eq!(ConfigValue::from("n/a").as_f64(), 0.0);
    /// ```
    pub fn as_f64(&self) -> f64 {
        numeric::parse_leading_float(&self.0)
    }

    /// Strictly parses the value into any type that implements `FromStr`.
    ///
    /// Unlike the `as_*` readers this reports malformed text. `section` and
    /// `key` only label the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcs::domain::config_value::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("server", "address").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, section: &str, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.0
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                section: section.to_string(),
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue(value.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        let literal = if value { TRUE_LITERAL } else { FALSE_LITERAL };
        ConfigValue(literal.to_string())
    }
}

impl From<f32> for ConfigValue {
    fn from(value: f32) -> Self {
        ConfigValue(numeric::format_general(f64::from(value)))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue(numeric::format_exact(value))
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    #[test]
    fn test_config_value_new() {
        let value = ConfigValue::new("test".to_string());
        assert_eq!(value.as_str(), "test");
    }

    #[test]
    fn test_config_value_into_string() {
        let value = ConfigValue::from("test");
        assert_eq!(value.into_string(), "test");
    }

    #[test]
    fn test_config_value_display() {
        let value = ConfigValue::from("test");
        assert_eq!(format!("{}", value), "test");
    }

    #[test]
    fn test_as_bool_true_variants() {
        for val in ["TRUE", "true", "True", "tRuE"] {
            assert!(ConfigValue::from(val).as_bool(), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_as_bool_everything_else_is_false() {
        for val in ["FALSE", "yes", "1", "on", "", " TRUE", "TRUE ", "garbage"] {
            assert!(!ConfigValue::from(val).as_bool(), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_as_int() {
        assert_eq!(ConfigValue::from("100").as_int(), 100);
        assert_eq!(ConfigValue::from("-42").as_int(), -42);
        assert_eq!(ConfigValue::from("12 monkeys").as_int(), 12);
    }

    #[test]
    fn test_as_int_garbage_reads_zero() {
        assert_eq!(ConfigValue::from("not_a_number").as_int(), 0);
        assert_eq!(ConfigValue::from("").as_int(), 0);
    }

    #[test]
    fn test_as_floats() {
        assert_eq!(ConfigValue::from("3.5").as_f32(), 3.5);
        assert_eq!(ConfigValue::from("-3.25").as_f64(), -3.25);
        assert_eq!(ConfigValue::from("garbage").as_f64(), 0.0);
    }

    #[test]
    fn test_from_bool_literals() {
        assert_eq!(ConfigValue::from(true).as_str(), "TRUE");
        assert_eq!(ConfigValue::from(false).as_str(), "FALSE");
    }

    #[test]
    fn test_from_numbers() {
        assert_eq!(ConfigValue::from(100).as_str(), "100");
        assert_eq!(ConfigValue::from(-5).as_str(), "-5");
        assert_eq!(ConfigValue::from(0.5f32).as_str(), "0.5");
        assert_eq!(ConfigValue::from(0.1f64).as_str(), "0.1");
        assert_eq!(ConfigValue::from(1.0e7f32).as_str(), "1e+07");
    }

    #[test]
    fn test_numbers_read_back() {
        assert_eq!(ConfigValue::from(i32::MIN).as_int(), i32::MIN);
        assert_eq!(ConfigValue::from(0.1f32).as_f32(), 0.1f32);
        let third = 1.0f64 / 3.0;
        assert_eq!(ConfigValue::from(third).as_f64(), third);
    }

    #[test]
    fn test_parse_custom_type() {
        let value = ConfigValue::from("127.0.0.1");
        let ip: IpAddr = value.parse("server", "address").unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_parse_invalid() {
        let value = ConfigValue::from("not_an_ip");
        let result: Result<IpAddr> = value.parse("server", "address");
        assert!(matches!(
            result,
            Err(ConfigError::TypeConversionError { .. })
        ));
    }

    #[test]
    fn test_string_from_config_value() {
        let value = ConfigValue::from("test");
        let s: String = value.into();
        assert_eq!(s, "test");
    }

    #[test]
    fn test_whitespace_preserved() {
        let value = ConfigValue::from("  spaces  ");
        assert_eq!(value.as_str(), "  spaces  ");
        assert_eq!(value.as_ref(), "  spaces  ");
    }
}
