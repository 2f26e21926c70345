// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Signet Contributors

//! Signed-link authority.
//!
//! Mints and verifies the short-lived signed URLs that grant access to a
//! single resource without a session (calendar feeds, report downloads).
//! A link signature is `base64(sha256(fullName + minuteBucket + secret))`
//! with every character outside `[A-Za-z0-9\s]` stripped, which keeps the
//! value URL-safe without percent-encoding. Derivation is deterministic:
//! reissuing within the same minute yields the identical signature, and a
//! verifier can independently re-derive and compare.

use std::sync::Arc;

use base64ct::{Base64, Encoding};
use chrono::{Duration, NaiveDateTime};
use sha2::{Digest, Sha256};

use crate::clock::{Clock, SystemClock};
use crate::config::SecretConfig;

/// Minute-granularity timestamp bucket pattern.
const BUCKET_FORMAT: &str = "%Y%m%d%H%M";

/// Links are valid for one hour from their bucket.
const VALIDITY_HOURS: i64 = 1;

/// A minted link credential: the sanitized signature and the timestamp
/// bucket it was derived from. Both travel as URL query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedLink {
    pub signature: String,
    pub time: String,
}

/// Mints and verifies time-windowed signed links.
///
/// Stateless and immutable after construction; no record of issued links is
/// kept anywhere. Independent of the token authority.
pub struct SignedLinkAuthority {
    secret: String,
    clock: Arc<dyn Clock>,
}

impl SignedLinkAuthority {
    pub fn new(config: &SecretConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &SecretConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: config.link_secret().to_string(),
            clock,
        }
    }

    /// Mint a link credential for the subject's display name at the current
    /// minute bucket.
    pub fn issue(&self, full_name: &str) -> SignedLink {
        let time = self.clock.now().format(BUCKET_FORMAT).to_string();
        let signature = self.derive(full_name, &time);
        SignedLink { signature, time }
    }

    /// Render the full signed path segment for a subject:
    /// `<subjectId>?token=<signature>&time=<bucket>`.
    pub fn link_path(&self, subject_id: &str, full_name: &str) -> String {
        let link = self.issue(full_name);
        format!("{subject_id}?token={}&time={}", link.signature, link.time)
    }

    /// Verify a presented signature against a presented bucket.
    ///
    /// Returns `false` for an unparsable bucket, a bucket more than one hour
    /// in the past, or a signature that does not match the re-derivation.
    /// Callers map `false` to a generic not-found/unauthorized response
    /// without revealing which check failed.
    pub fn verify(&self, signature: &str, time: &str, full_name: &str) -> bool {
        let Ok(created) = NaiveDateTime::parse_from_str(time, BUCKET_FORMAT) else {
            return false;
        };

        // Truncate "now" to the same granularity as the bucket before the
        // window comparison.
        let now_bucket = self.clock.now().format(BUCKET_FORMAT).to_string();
        let Ok(now) = NaiveDateTime::parse_from_str(&now_bucket, BUCKET_FORMAT) else {
            return false;
        };

        if now > created + Duration::hours(VALIDITY_HOURS) {
            return false;
        }

        let expected = self.derive(full_name, time);
        ring::constant_time::verify_slices_are_equal(expected.as_bytes(), signature.as_bytes())
            .is_ok()
    }

    fn derive(&self, full_name: &str, time: &str) -> String {
        let material = format!("{full_name}{time}{}", self.secret);
        let digest = Sha256::digest(material.as_bytes());
        let mut encoded = Base64::encode_string(digest.as_slice());
        encoded.retain(|c| c.is_ascii_alphanumeric() || c.is_whitespace());
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    const BOB: &str = "Bob Smith";

    fn authority_at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> (SignedLinkAuthority, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap());
        let config = SecretConfig::new("token-test-secret", "link-test-secret").unwrap();
        let authority = SignedLinkAuthority::with_clock(&config, Arc::new(clock.clone()));
        (authority, clock)
    }

    #[test]
    fn issue_uses_minute_bucket() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);
        assert_eq!(link.time, "202401010800");
    }

    #[test]
    fn signature_contains_only_urlsafe_characters() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);
        assert!(!link.signature.is_empty());
        assert!(link
            .signature
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace()));
    }

    #[test]
    fn reissue_within_the_same_minute_is_identical() {
        let (authority, clock) = authority_at(2024, 1, 1, 8, 0);
        let first = authority.issue(BOB);
        clock.advance(Duration::seconds(30));
        let second = authority.issue(BOB);
        assert_eq!(first, second);
    }

    #[test]
    fn different_minutes_produce_different_signatures() {
        let (authority, clock) = authority_at(2024, 1, 1, 8, 0);
        let first = authority.issue(BOB);
        clock.advance(Duration::minutes(1));
        let second = authority.issue(BOB);
        assert_ne!(first.signature, second.signature);
    }

    #[test]
    fn verify_accepts_within_the_hour() {
        let (authority, clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);

        clock.set(Utc.with_ymd_and_hms(2024, 1, 1, 8, 59, 0).unwrap());
        assert!(authority.verify(&link.signature, &link.time, BOB));

        // The window is measured at bucket granularity, so the full hour
        // boundary still passes.
        clock.set(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        assert!(authority.verify(&link.signature, &link.time, BOB));
    }

    #[test]
    fn verify_rejects_after_the_hour() {
        let (authority, clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);

        clock.set(Utc.with_ymd_and_hms(2024, 1, 1, 9, 1, 0).unwrap());
        assert!(!authority.verify(&link.signature, &link.time, BOB));
    }

    #[test]
    fn verify_rejects_unparsable_bucket() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);
        assert!(!authority.verify(&link.signature, "not-a-bucket", BOB));
        assert!(!authority.verify(&link.signature, "", BOB));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);

        let mut tampered = link.signature.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'a' { 'b' } else { 'a' });
        assert!(!authority.verify(&tampered, &link.time, BOB));

        assert!(!authority.verify("", &link.time, BOB));
    }

    #[test]
    fn verify_rejects_wrong_subject() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let link = authority.issue(BOB);
        assert!(!authority.verify(&link.signature, &link.time, "Someone Else"));
    }

    #[test]
    fn different_secrets_produce_different_signatures() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let other_config = SecretConfig::new("token-test-secret", "another-secret").unwrap();
        let other = SignedLinkAuthority::with_clock(
            &other_config,
            Arc::new(ManualClock::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
            )),
        );
        assert_ne!(authority.issue(BOB).signature, other.issue(BOB).signature);
    }

    #[test]
    fn link_path_matches_url_shape() {
        let (authority, _clock) = authority_at(2024, 1, 1, 8, 0);
        let path = authority.link_path("42", BOB);
        let link = authority.issue(BOB);
        assert_eq!(
            path,
            format!("42?token={}&time=202401010800", link.signature)
        );
    }
}
