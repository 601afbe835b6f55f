use chrono::{DateTime, Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use shared::domain::{SignoutRecord, SignoutStatus};

use crate::roster::{COMMANDERS, LOCATIONS, SOLDIERS, SYNTHETIC_NOTES};

const MIN_GROUP_SIZE: usize = 2;
const MAX_GROUP_SIZE: usize = 4;
const SEQUENCE_BASE: usize = 1000;
const STILL_OUT_WINDOW_SECS: i64 = 8 * 3600;
const COMPLETED_WINDOW_SECS: i64 = 72 * 3600;
const MAX_TRIP_SECS: i64 = 4 * 3600;

/// Builds `groups` randomized sign-out groups relative to `now`.
///
/// Every third group is left signed out; the rest are completed trips with a
/// sign-in commander and timestamp. Records within a group share the group
/// identifier, location, timestamps, and commanders. The identifier sequence
/// restarts at the same base every run, so runs on the same calendar day
/// produce colliding identifiers.
pub fn generate(rng: &mut impl Rng, now: DateTime<Utc>, groups: usize) -> Vec<SignoutRecord> {
    let date_tag = now.format("%y%m%d").to_string();
    let mut records = Vec::new();

    for group_index in 0..groups {
        let signout_id = format!("SO{date_tag}-{}", SEQUENCE_BASE + group_index);
        let still_out = group_index % 3 == 0;

        let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
        let signed_out_by = COMMANDERS[rng.gen_range(0..COMMANDERS.len())];

        let window = if still_out {
            STILL_OUT_WINDOW_SECS
        } else {
            COMPLETED_WINDOW_SECS
        };
        let sign_out_time = now - Duration::seconds(rng.gen_range(0..window));

        let (sign_in_time, signed_in_by) = if still_out {
            (None, None)
        } else {
            let trip = Duration::seconds(rng.gen_range(0..=MAX_TRIP_SECS));
            let commander = COMMANDERS[rng.gen_range(0..COMMANDERS.len())];
            (Some(sign_out_time + trip), Some(commander))
        };
        let status = if still_out {
            SignoutStatus::Out
        } else {
            SignoutStatus::In
        };

        let size = rng.gen_range(MIN_GROUP_SIZE..=MAX_GROUP_SIZE);
        for member in SOLDIERS.choose_multiple(rng, size) {
            records.push(SignoutRecord {
                signout_id: signout_id.clone(),
                soldier_rank: member.rank.to_string(),
                soldier_first_name: member.first_name.to_string(),
                soldier_last_name: member.last_name.to_string(),
                soldier_dod_id: member.dod_id.to_string(),
                location: location.to_string(),
                sign_out_time,
                sign_in_time,
                signed_out_by_id: signed_out_by.id,
                signed_out_by_name: signed_out_by.name.to_string(),
                signed_in_by_id: signed_in_by.map(|commander| commander.id),
                signed_in_by_name: signed_in_by.map(|commander| commander.name.to_string()),
                status,
                notes: SYNTHETIC_NOTES.to_string(),
            });
        }
    }

    records
}

#[cfg(test)]
#[path = "tests/gen_tests.rs"]
mod tests;
