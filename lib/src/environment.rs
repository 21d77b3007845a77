use crate::error::NotifierError;
use std::env;
use std::str::FromStr;

pub struct Environment;

impl Environment {
    pub fn string(
        env_name: &str,
        default: &str,
    ) -> String {
        Self::optional_string(env_name).unwrap_or(default.to_string())
    }

    /// Unset and blank variables are both treated as absent.
    pub fn optional_string(env_name: &str) -> Option<String> {
        env::var(env_name).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
    }

    pub fn required_string(env_name: &str) -> Result<String, NotifierError> {
        Self::optional_string(env_name).ok_or_else(|| NotifierError::new(&format!("{env_name} is not set"), "Missing required configuration"))
    }

    pub fn u16(
        env_name: &str,
        default: u16,
    ) -> Result<u16, NotifierError> {
        Self::parse(env_name, default)
    }

    pub fn i32(
        env_name: &str,
        default: i32,
    ) -> Result<i32, NotifierError> {
        Self::parse(env_name, default)
    }

    pub fn u64(
        env_name: &str,
        default: u64,
    ) -> Result<u64, NotifierError> {
        Self::parse(env_name, default)
    }

    fn parse<T>(
        env_name: &str,
        default: T,
    ) -> Result<T, NotifierError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::optional_string(env_name) {
            None => Ok(default),
            Some(value) => value
                .parse::<T>()
                .map_err(|error| NotifierError::new(&format!("{env_name}={value}: {error}"), "Failed to parse configuration value")),
        }
    }
}
