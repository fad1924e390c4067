//! Backend dispatch kinds and their type-specific targets.

use super::{BackendDomainError, ParseBackendTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse backend type label, used for filtered lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// Remote HTTP API.
    Api,
    /// Local script fed over standard input.
    Bot,
    /// Local command-line model.
    LocalAi,
    /// User-supplied script or command.
    CustomAi,
}

impl BackendType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Bot => "bot",
            Self::LocalAi => "local_ai",
            Self::CustomAi => "custom_ai",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for BackendType {
    type Error = ParseBackendTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "api" => Ok(Self::Api),
            "bot" => Ok(Self::Bot),
            "local_ai" => Ok(Self::LocalAi),
            "custom_ai" => Ok(Self::CustomAi),
            _ => Err(ParseBackendTypeError(value.to_owned())),
        }
    }
}

impl FromStr for BackendType {
    type Err = ParseBackendTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

fn required(value: impl Into<String>, err: BackendDomainError) -> Result<String, BackendDomainError> {
    let normalized = value.into().trim().to_owned();
    if normalized.is_empty() {
        return Err(err);
    }
    Ok(normalized)
}

/// HTTP endpoint and bearer credential for an `api` backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiTarget {
    #[serde(rename = "api-endpoint")]
    endpoint: String,
    #[serde(rename = "api-key")]
    credential: String,
}

impl ApiTarget {
    /// Creates a validated API target.
    ///
    /// # Errors
    ///
    /// Returns [`BackendDomainError`] when the endpoint is empty or lacks an
    /// `http://`/`https://` prefix, or when the credential is empty.
    pub fn new(
        endpoint: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, BackendDomainError> {
        let normalized_endpoint = required(endpoint, BackendDomainError::EmptyEndpoint)?;
        let has_valid_prefix = normalized_endpoint.starts_with("http://")
            || normalized_endpoint.starts_with("https://");
        if !has_valid_prefix {
            return Err(BackendDomainError::InvalidEndpoint(normalized_endpoint));
        }

        Ok(Self {
            endpoint: normalized_endpoint,
            credential: required(credential, BackendDomainError::EmptyCredential)?,
        })
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the bearer credential.
    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

/// Script path for a `bot` backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptTarget {
    #[serde(rename = "ai-file")]
    script_path: String,
}

impl ScriptTarget {
    /// Creates a validated script target.
    ///
    /// # Errors
    ///
    /// Returns [`BackendDomainError::EmptyScriptPath`] when the path is blank.
    pub fn new(script_path: impl Into<String>) -> Result<Self, BackendDomainError> {
        Ok(Self {
            script_path: required(script_path, BackendDomainError::EmptyScriptPath)?,
        })
    }

    /// Returns the script path.
    #[must_use]
    pub fn script_path(&self) -> &str {
        &self.script_path
    }
}

/// Command line for a `local_ai` backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandTarget {
    #[serde(rename = "ai-command")]
    command_line: String,
}

impl CommandTarget {
    /// Creates a validated command target.
    ///
    /// # Errors
    ///
    /// Returns [`BackendDomainError::EmptyCommandLine`] when the command line
    /// is blank.
    pub fn new(command_line: impl Into<String>) -> Result<Self, BackendDomainError> {
        Ok(Self {
            command_line: required(command_line, BackendDomainError::EmptyCommandLine)?,
        })
    }

    /// Returns the raw command line.
    #[must_use]
    pub fn command_line(&self) -> &str {
        &self.command_line
    }
}

/// Script path and/or command line for a `custom_ai` backend.
///
/// At least one of the two is always present; the command line takes
/// precedence at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCustomTarget")]
pub struct CustomTarget {
    #[serde(rename = "ai-file", skip_serializing_if = "Option::is_none")]
    script_path: Option<String>,
    #[serde(rename = "ai-command", skip_serializing_if = "Option::is_none")]
    command_line: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCustomTarget {
    #[serde(rename = "ai-file", default)]
    script_path: Option<String>,
    #[serde(rename = "ai-command", default)]
    command_line: Option<String>,
}

impl TryFrom<RawCustomTarget> for CustomTarget {
    type Error = BackendDomainError;

    fn try_from(raw: RawCustomTarget) -> Result<Self, Self::Error> {
        Self::new(raw.script_path, raw.command_line)
    }
}

impl CustomTarget {
    /// Creates a validated custom target.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`BackendDomainError::MissingCustomTarget`] when neither a
    /// script path nor a command line remains after trimming.
    pub fn new(
        script_path: Option<String>,
        command_line: Option<String>,
    ) -> Result<Self, BackendDomainError> {
        let normalize = |value: Option<String>| {
            value
                .map(|raw| raw.trim().to_owned())
                .filter(|trimmed| !trimmed.is_empty())
        };
        let target = Self {
            script_path: normalize(script_path),
            command_line: normalize(command_line),
        };
        if target.script_path.is_none() && target.command_line.is_none() {
            return Err(BackendDomainError::MissingCustomTarget);
        }
        Ok(target)
    }

    /// Returns the optional script path.
    #[must_use]
    pub fn script_path(&self) -> Option<&str> {
        self.script_path.as_deref()
    }

    /// Returns the optional command line.
    #[must_use]
    pub fn command_line(&self) -> Option<&str> {
        self.command_line.as_deref()
    }
}

/// Closed set of backend kinds, each with its dispatch target.
///
/// Records carrying keys that belong to another kind are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackendKind {
    /// Remote HTTP API.
    Api(ApiTarget),
    /// Local script fed over standard input.
    Bot(ScriptTarget),
    /// Local command-line model.
    LocalAi(CommandTarget),
    /// User-supplied script or command.
    CustomAi(CustomTarget),
}

impl BackendKind {
    /// Creates an `api` kind.
    ///
    /// # Errors
    ///
    /// Returns validation errors from [`ApiTarget::new`].
    pub fn api(
        endpoint: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, BackendDomainError> {
        Ok(Self::Api(ApiTarget::new(endpoint, credential)?))
    }

    /// Creates a `bot` kind.
    ///
    /// # Errors
    ///
    /// Returns validation errors from [`ScriptTarget::new`].
    pub fn bot(script_path: impl Into<String>) -> Result<Self, BackendDomainError> {
        Ok(Self::Bot(ScriptTarget::new(script_path)?))
    }

    /// Creates a `local_ai` kind.
    ///
    /// # Errors
    ///
    /// Returns validation errors from [`CommandTarget::new`].
    pub fn local_ai(command_line: impl Into<String>) -> Result<Self, BackendDomainError> {
        Ok(Self::LocalAi(CommandTarget::new(command_line)?))
    }

    /// Creates a `custom_ai` kind.
    ///
    /// # Errors
    ///
    /// Returns validation errors from [`CustomTarget::new`].
    pub fn custom_ai(
        script_path: Option<String>,
        command_line: Option<String>,
    ) -> Result<Self, BackendDomainError> {
        Ok(Self::CustomAi(CustomTarget::new(script_path, command_line)?))
    }

    /// Returns the coarse type label.
    #[must_use]
    pub const fn backend_type(&self) -> BackendType {
        match self {
            Self::Api(_) => BackendType::Api,
            Self::Bot(_) => BackendType::Bot,
            Self::LocalAi(_) => BackendType::LocalAi,
            Self::CustomAi(_) => BackendType::CustomAi,
        }
    }
}
