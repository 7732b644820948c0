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

//! Certificate helpers for tests that need a caller identity.

use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{EcGroup, EcKey};
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::PKey;
use openssl::x509::{X509NameBuilder, X509};

/// Makes a PEM encoded certificate with the given subject common name and issuer organization.
pub fn make_certificate(
    common_name: Option<&str>,
    issuer_organization: Option<&str>,
) -> Result<Vec<u8>, ErrorStack> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1)?;
    let privkey = PKey::from_ec_key(EcKey::generate(&group)?)?;

    let mut subject = X509NameBuilder::new()?;
    if let Some(common_name) = common_name {
        subject.append_entry_by_nid(Nid::COMMONNAME, common_name)?;
    }
    subject.append_entry_by_nid(Nid::COUNTRYNAME, "US")?;
    let subject = subject.build();

    let mut issuer = X509NameBuilder::new()?;
    if let Some(organization) = issuer_organization {
        issuer.append_entry_by_nid(Nid::ORGANIZATIONNAME, organization)?;
    }
    issuer.append_entry_by_nid(Nid::COMMONNAME, "ca")?;
    let issuer = issuer.build();

    let mut cert_builder = X509::builder()?;
    cert_builder.set_version(2)?;
    let serial_number = {
        let mut serial = BigNum::new()?;
        serial.rand(159, MsbOption::MAYBE_ZERO, false)?;
        serial.to_asn1_integer()?
    };
    cert_builder.set_serial_number(&serial_number)?;
    cert_builder.set_subject_name(&subject)?;
    cert_builder.set_issuer_name(&issuer)?;
    cert_builder.set_pubkey(&privkey)?;
    let not_before: Asn1Time = Asn1Time::days_from_now(0)?;
    let not_after: Asn1Time = Asn1Time::days_from_now(365)?;
    cert_builder.set_not_before(&not_before)?;
    cert_builder.set_not_after(&not_after)?;
    cert_builder.sign(&privkey, MessageDigest::sha256())?;

    cert_builder.build().to_pem()
}

/// Frames a PEM certificate the way a host runtime serializes a creator: a membership service
/// id, then the certificate bytes.
pub fn wrap_serialized_identity(msp_id: &str, pem: &[u8]) -> Vec<u8> {
    let mut creator = vec![0x0a, msp_id.len() as u8];
    creator.extend_from_slice(msp_id.as_bytes());
    creator.extend_from_slice(&[0x12, 0xc2, 0xff]);
    creator.extend_from_slice(pem);
    creator
}

/// A serialized creator for `common_name` issued by `organization`, ready to put in an
/// invocation.
///
/// # Panics
///
/// Panics if openssl cannot generate the certificate.
pub fn creator_for(common_name: &str, organization: &str) -> Vec<u8> {
    let pem = make_certificate(Some(common_name), Some(organization))
        .expect("Unable to generate test certificate");
    let msp_id = format!("{}MSP", organization.split('.').next().unwrap_or(organization));
    wrap_serialized_identity(&msp_id, &pem)
}
