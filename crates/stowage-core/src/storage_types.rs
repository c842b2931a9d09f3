//! Storage backend and credential provider identifiers.

use serde::{Deserialize, Serialize};

/// Which storage backend the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

/// A credential provider kind the resolver chain may try, in configured order.
///
/// Each kind maps to one SDK provider with the single capability "attempt to
/// produce credentials". The selection and order are configuration
/// (`CREDENTIAL_PROVIDERS`), not structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialProvider {
    /// AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY environment variables.
    Environment,
    /// Shared config/credentials profile files (developer and IDE sessions).
    Profile,
    /// Web identity token file (OIDC federation).
    WebIdentity,
    /// ECS/Fargate container credential endpoint.
    EcsContainer,
    /// EC2 instance metadata service (managed identity).
    InstanceMetadata,
}

impl CredentialProvider {
    /// Parse one entry of the `CREDENTIAL_PROVIDERS` list. Unknown names are
    /// rejected rather than ignored so a typo cannot silently disable a
    /// provider.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "environment" | "env" => Some(Self::Environment),
            "profile" => Some(Self::Profile),
            "web-identity" => Some(Self::WebIdentity),
            "ecs-container" | "ecs" => Some(Self::EcsContainer),
            "instance-metadata" | "imds" => Some(Self::InstanceMetadata),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::Profile => "profile",
            Self::WebIdentity => "web-identity",
            Self::EcsContainer => "ecs-container",
            Self::InstanceMetadata => "instance-metadata",
        }
    }
}

impl std::fmt::Display for CredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_providers() {
        assert_eq!(
            CredentialProvider::parse("profile"),
            Some(CredentialProvider::Profile)
        );
        assert_eq!(
            CredentialProvider::parse(" instance-metadata "),
            Some(CredentialProvider::InstanceMetadata)
        );
        assert_eq!(
            CredentialProvider::parse("IMDS"),
            Some(CredentialProvider::InstanceMetadata)
        );
        assert_eq!(
            CredentialProvider::parse("env"),
            Some(CredentialProvider::Environment)
        );
    }

    #[test]
    fn test_parse_unknown_provider() {
        assert_eq!(CredentialProvider::parse("azure-cli"), None);
        assert_eq!(CredentialProvider::parse(""), None);
    }
}
