use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(NcoId);

/// Selectable operator account, fetched after the system password gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NcoUser {
    pub id: NcoId,
    pub rank: String,
    pub full_name: String,
}

impl NcoUser {
    /// Option text shown in the user-selection list.
    pub fn display_label(&self) -> String {
        format!("{} {}", self.rank, self.full_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignoutStatus {
    Out,
    In,
}

impl SignoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignoutStatus::Out => "OUT",
            SignoutStatus::In => "IN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OUT" => Some(SignoutStatus::Out),
            "IN" => Some(SignoutStatus::In),
            _ => None,
        }
    }
}

/// One row of the sign-out log. Identity and commander fields are
/// denormalized snapshots taken at write time; there is no soldier table to
/// join back to. `status` is derived from `sign_in_time` presence when the
/// record is created and is never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignoutRecord {
    pub signout_id: String,
    pub soldier_rank: String,
    pub soldier_first_name: String,
    pub soldier_last_name: String,
    pub soldier_dod_id: String,
    pub location: String,
    pub sign_out_time: DateTime<Utc>,
    pub sign_in_time: Option<DateTime<Utc>>,
    pub signed_out_by_id: NcoId,
    pub signed_out_by_name: String,
    pub signed_in_by_id: Option<NcoId>,
    pub signed_in_by_name: Option<String>,
    pub status: SignoutStatus,
    pub notes: String,
}

impl SignoutRecord {
    /// An OUT record carries no sign-in data; an IN record carries all of it
    /// with the sign-in at or after the sign-out.
    pub fn is_consistent(&self) -> bool {
        match self.status {
            SignoutStatus::Out => {
                self.sign_in_time.is_none()
                    && self.signed_in_by_id.is_none()
                    && self.signed_in_by_name.is_none()
            }
            SignoutStatus::In => match self.sign_in_time {
                Some(sign_in) => {
                    sign_in >= self.sign_out_time
                        && self.signed_in_by_id.is_some()
                        && self.signed_in_by_name.is_some()
                }
                None => false,
            },
        }
    }
}
