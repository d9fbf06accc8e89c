//! Administration view: users, feature flags and licence.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::labels::{letter, suffix, LabelTable};
use crate::types::{serialize_iso, RealtimeRecord};
use crate::window::last;

pub const WINDOW: usize = 8;

pub const ROLES: LabelTable<4> = LabelTable::new(["Admin", "Approver", "Operator", "Viewer"]);

/// Every fifth user is still an open invitation.
pub const INVITE_STRIDE: usize = 5;

pub const LICENSE_PLAN: &str = "Enterprise";
pub const LICENSE_SEATS: usize = 25;
pub const LICENSE_TERM_DAYS: i64 = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub users: Vec<User>,
    pub feature_flags: Vec<FeatureFlag>,
    pub license: License,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub role: &'static str,
    pub email: String,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub key: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub plan: &'static str,
    pub seats: usize,
    pub in_use: usize,
    #[serde(serialize_with = "serialize_iso")]
    pub expiry: Option<DateTime<Utc>>,
}

/// `now` stamps the licence expiry; nothing else reads the clock.
pub fn derive(records: &[RealtimeRecord], now: DateTime<Utc>) -> Admin {
    let users = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| User {
            name: format!("User {}.{}", letter(i), suffix(&record.sequence, 2)),
            role: ROLES.for_index(i),
            email: format!("user{i}@example.io"),
            status: if i % INVITE_STRIDE == 0 {
                "Pending Invite"
            } else {
                "Active"
            },
        })
        .collect();

    let feature_flags = vec![
        FeatureFlag {
            key: "mass_concrete_module",
            description: "Enable mass concrete dashboards",
            enabled: true,
        },
        FeatureFlag {
            key: "ota_beta",
            description: "Access to OTA canary features",
            enabled: true,
        },
        FeatureFlag {
            key: "document_ai",
            description: "Document AI ingestion",
            enabled: records.len() % 2 == 0,
        },
    ];

    let license = License {
        plan: LICENSE_PLAN,
        seats: LICENSE_SEATS,
        in_use: 18 + records.len() % 4,
        expiry: Duration::try_days(LICENSE_TERM_DAYS).and_then(|term| now.checked_add_signed(term)),
    };

    Admin {
        users,
        feature_flags,
        license,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn users_flags_and_license() {
        let records: Vec<_> = (0..9)
            .map(|i| parse_line(&format!("3C8A{i:02} 05-03-25 10:00:00 20 0")).unwrap())
            .collect();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let admin = derive(&records, now);

        assert_eq!(admin.users.len(), WINDOW);
        assert_eq!(admin.users[0].name, "User A.01");
        assert_eq!(admin.users[0].status, "Pending Invite");
        assert_eq!(admin.users[1].role, "Approver");
        assert_eq!(admin.users[5].status, "Pending Invite");
        assert_eq!(admin.users[7].email, "user7@example.io");

        assert!(!admin.feature_flags[2].enabled);
        assert_eq!(admin.license.in_use, 19);
        assert_eq!(
            admin.license.expiry,
            Some(Utc.with_ymd_and_hms(2025, 5, 31, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn empty_input() {
        let admin = derive(&[], Utc::now());
        assert!(admin.users.is_empty());
        assert!(admin.feature_flags[2].enabled);
        assert_eq!(admin.license.in_use, 18);
    }
}
