// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Caller identity resolution.
//!
//! The host runtime hands every invocation the creator of the transaction as an opaque blob. The
//! blob has already been authenticated by the host; this module only parses it. The principal is
//! the subject common name of the embedded X.509 certificate and the organization is the first
//! organization entry of the certificate issuer. The short organization tag (the part before the
//! first `.`) is what authorization policies are written against.

mod organization;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::error::Error;
use std::fmt;

use openssl::nid::Nid;
use openssl::x509::{X509NameRef, X509};

pub use organization::{Caller, OrganizationDirectory, Role};

const PEM_DELIMITER: &[u8] = b"-----";

/// The principal and organization extracted from a caller certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    principal: String,
    organization: String,
    organization_tag: String,
}

impl Identity {
    /// The certificate subject's common name; empty when the subject carries none.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// The issuer organization as written in the certificate, e.g. `customer.example.com`.
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The issuer organization up to its first `.`, e.g. `customer`.
    pub fn organization_tag(&self) -> &str {
        &self.organization_tag
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdentityError {
    /// The blob does not contain a `-----` delimited PEM span
    MissingPemBlock,
    /// The PEM span could not be decoded as an X.509 certificate
    InvalidCertificate(String),
    /// The certificate issuer has no organization entry, or it is empty
    MissingOrganization,
    /// A name entry is not valid UTF-8 or contains a NUL byte
    InvalidUtf8(String),
}

impl Error for IdentityError {}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdentityError::MissingPemBlock => {
                write!(f, "Caller identity does not contain a PEM encoded certificate")
            }
            IdentityError::InvalidCertificate(msg) => {
                write!(f, "Caller certificate cannot be decoded: {}", msg)
            }
            IdentityError::MissingOrganization => {
                write!(f, "Caller certificate issuer has no organization")
            }
            IdentityError::InvalidUtf8(field) => {
                write!(f, "Caller certificate {} is not valid UTF-8", field)
            }
        }
    }
}

/// Resolves the principal and organization of the certificate embedded in `creator`.
///
/// The certificate is located by taking everything between the first and the last `-----`
/// delimiter of the blob, so serialized identities that prefix the PEM text with binary framing
/// are accepted.
pub fn resolve_identity(creator: &[u8]) -> Result<Identity, IdentityError> {
    let mut pem = find_pem_block(creator)
        .ok_or(IdentityError::MissingPemBlock)?
        .to_vec();
    // the span ends on the closing delimiter; openssl expects a terminated line
    pem.push(b'\n');
    let cert = X509::from_pem(&pem)
        .map_err(|err| IdentityError::InvalidCertificate(err.to_string()))?;

    let subject = cert.subject_name();
    let issuer = cert.issuer_name();
    let principal = first_entry(subject, Nid::COMMONNAME, "subject common name")?
        .unwrap_or_default();
    let organization = first_entry(issuer, Nid::ORGANIZATIONNAME, "issuer organization")?
        .ok_or(IdentityError::MissingOrganization)?;

    let organization_tag = organization.split('.').next().unwrap_or("").to_string();
    if organization_tag.is_empty() {
        return Err(IdentityError::MissingOrganization);
    }

    debug!("commonName: {}, organization: {}", principal, organization);

    Ok(Identity {
        principal,
        organization,
        organization_tag,
    })
}

fn find_pem_block(blob: &[u8]) -> Option<&[u8]> {
    let start = blob
        .windows(PEM_DELIMITER.len())
        .position(|window| window == PEM_DELIMITER)?;
    let end = blob
        .windows(PEM_DELIMITER.len())
        .rposition(|window| window == PEM_DELIMITER)?
        + PEM_DELIMITER.len();

    if end - start <= PEM_DELIMITER.len() {
        return None;
    }

    Some(&blob[start..end])
}

fn first_entry(
    name: &X509NameRef,
    nid: Nid,
    field: &str,
) -> Result<Option<String>, IdentityError> {
    let entry = match name.entries_by_nid(nid).next() {
        Some(entry) => entry,
        None => return Ok(None),
    };

    // an embedded NUL would let one name masquerade as its prefix
    let bytes = entry.data().as_slice();
    if bytes.contains(&0) {
        return Err(IdentityError::InvalidUtf8(field.to_string()));
    }

    std::str::from_utf8(bytes)
        .map(|value| Some(value.to_string()))
        .map_err(|_| IdentityError::InvalidUtf8(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::test_support::{make_certificate, wrap_serialized_identity};
    use super::*;

    #[test]
    fn test_resolve_plain_pem() {
        let pem = make_certificate(Some("User1@customer.example.com"), Some("customer.example.com"))
            .expect("Unable to make certificate");

        let identity = resolve_identity(&pem).expect("Unable to resolve identity");

        assert_eq!(identity.principal(), "User1@customer.example.com");
        assert_eq!(identity.organization(), "customer.example.com");
        assert_eq!(identity.organization_tag(), "customer");
    }

    #[test]
    fn test_resolve_serialized_identity_with_binary_prefix() {
        let pem = make_certificate(Some("Admin@walx.example.com"), Some("walx.example.com"))
            .expect("Unable to make certificate");
        let creator = wrap_serialized_identity("WalxMSP", &pem);

        let identity = resolve_identity(&creator).expect("Unable to resolve identity");

        assert_eq!(identity.principal(), "Admin@walx.example.com");
        assert_eq!(identity.organization_tag(), "walx");
    }

    #[test]
    fn test_organization_without_dot_is_its_own_tag() {
        let pem = make_certificate(Some("auditor"), Some("banker"))
            .expect("Unable to make certificate");

        let identity = resolve_identity(&pem).expect("Unable to resolve identity");

        assert_eq!(identity.organization_tag(), "banker");
    }

    #[test]
    fn test_missing_common_name_resolves_to_empty_principal() {
        let pem = make_certificate(None, Some("customer.example.com"))
            .expect("Unable to make certificate");

        let identity = resolve_identity(&pem).expect("Unable to resolve identity");

        assert_eq!(identity.principal(), "");
    }

    #[test]
    fn test_missing_issuer_organization() {
        let pem = make_certificate(Some("User1"), None).expect("Unable to make certificate");

        assert_eq!(
            resolve_identity(&pem),
            Err(IdentityError::MissingOrganization)
        );
    }

    #[test]
    fn test_issuer_organization_starting_with_dot() {
        let pem = make_certificate(Some("User1"), Some(".example.com"))
            .expect("Unable to make certificate");

        assert_eq!(
            resolve_identity(&pem),
            Err(IdentityError::MissingOrganization)
        );
    }

    #[test]
    fn test_common_name_with_embedded_nul_is_rejected() {
        let pem = make_certificate(
            Some("Admin\u{0}@customer.example.com"),
            Some("walx.example.com"),
        )
        .expect("Unable to make certificate");

        assert_eq!(
            resolve_identity(&pem),
            Err(IdentityError::InvalidUtf8("subject common name".to_string()))
        );
    }

    #[test]
    fn test_issuer_organization_with_embedded_nul_is_rejected() {
        let pem = make_certificate(Some("User1"), Some("walx\u{0}.customer.example.com"))
            .expect("Unable to make certificate");

        assert_eq!(
            resolve_identity(&pem),
            Err(IdentityError::InvalidUtf8("issuer organization".to_string()))
        );
    }

    #[test]
    fn test_blob_without_pem_block() {
        assert_eq!(
            resolve_identity(b"\x0a\x07SomeMSP\x12\x00"),
            Err(IdentityError::MissingPemBlock)
        );
        assert_eq!(resolve_identity(b""), Err(IdentityError::MissingPemBlock));
        assert_eq!(
            resolve_identity(b"only one ----- delimiter"),
            Err(IdentityError::MissingPemBlock)
        );
    }

    #[test]
    fn test_corrupted_certificate_body() {
        let creator = b"-----BEGIN CERTIFICATE-----\nbm90IGEgY2VydA==\n-----END CERTIFICATE-----";

        match resolve_identity(creator) {
            Err(IdentityError::InvalidCertificate(_)) => (),
            other => panic!("Expected InvalidCertificate, got {:?}", other),
        }
    }
}
