//! Credential resolution for the S3 backend.
//!
//! The resolver turns the configured ordered list of provider kinds into a
//! single fallback chain. Each kind wraps one SDK provider behind the
//! `ProvideCredentials` capability; resolution tries the chain in order and
//! stops at the first provider that yields credentials. The chain is built
//! once per facade instance and handed to the client, which caches and
//! refreshes tokens internally.

use aws_config::ecs::EcsCredentialsProvider;
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::meta::credentials::CredentialsProviderChain;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_config::web_identity_token::WebIdentityTokenCredentialsProvider;
use aws_credential_types::provider::SharedCredentialsProvider;
use stowage_core::CredentialProvider;

use crate::traits::{StorageError, StorageResult};

fn instantiate(kind: CredentialProvider) -> SharedCredentialsProvider {
    match kind {
        CredentialProvider::Environment => {
            SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new())
        }
        CredentialProvider::Profile => {
            SharedCredentialsProvider::new(ProfileFileCredentialsProvider::builder().build())
        }
        CredentialProvider::WebIdentity => {
            SharedCredentialsProvider::new(WebIdentityTokenCredentialsProvider::builder().build())
        }
        CredentialProvider::EcsContainer => {
            SharedCredentialsProvider::new(EcsCredentialsProvider::builder().build())
        }
        CredentialProvider::InstanceMetadata => {
            SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build())
        }
    }
}

/// Build the ordered credential fallback chain.
///
/// Fails with `NoCredentialAvailable` when every provider kind is disabled.
/// A chain whose providers all fail at resolve time surfaces on the first
/// remote call instead, wrapped like any other operation cause.
pub fn build_credential_chain(
    providers: &[CredentialProvider],
) -> StorageResult<CredentialsProviderChain> {
    let mut kinds = providers.iter().copied();
    let first = kinds.next().ok_or_else(|| {
        StorageError::NoCredentialAvailable(
            "no credential providers are enabled (CREDENTIAL_PROVIDERS is empty)".to_string(),
        )
    })?;

    let mut chain = CredentialsProviderChain::first_try(first.as_str(), instantiate(first));
    for kind in kinds {
        chain = chain.or_else(kind.as_str(), instantiate(kind));
    }

    tracing::debug!(
        providers = %providers
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(","),
        "Credential provider chain configured"
    );

    Ok(chain)
}
