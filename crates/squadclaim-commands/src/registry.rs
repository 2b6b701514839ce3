//! In-memory registry of claimed (custom named) squads per team.

use crate::host::LiveSquad;
use parking_lot::RwLock;
use regex::Regex;
use squadclaim_common::{PlayerId, SquadId, TeamId, Timestamp};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Names the server generates for squads nobody renamed.
static DEFAULT_SQUAD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Squad\s+\d+$").expect("Invalid default squad name pattern"));

/// Whether `name` is a server-generated squad name.
pub fn is_default_squad_name(name: &str) -> bool {
    DEFAULT_SQUAD_NAME.is_match(name)
}

/// A squad created with a custom name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadRecord {
    /// Name the squad was created with.
    pub squad_name: String,
    /// Team owning the squad.
    pub team_id: TeamId,
    /// Squad number within the team.
    pub squad_id: SquadId,
    /// Player who created the squad.
    pub owner_id: PlayerId,
    /// Server time of creation.
    pub created_at: Timestamp,
}

/// What a creation event did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new claim was stored.
    Claimed,
    /// An existing claim at the same key was overwritten.
    Replaced,
    /// A default-named squad released an existing claim.
    Released,
    /// A default-named squad with nothing to release.
    Ignored,
}

type TeamSlots = [HashMap<SquadId, SquadRecord>; 2];

/// Claimed squads of both teams.
///
/// One lock guards both team slots, so round-end resets serialize with every
/// read and write.
#[derive(Debug, Default)]
pub struct SquadRegistry {
    teams: RwLock<TeamSlots>,
}

fn is_live(live_squads: &[LiveSquad], team_id: TeamId, squad_id: SquadId) -> bool {
    live_squads
        .iter()
        .any(|squad| squad.team_id == team_id && squad.squad_id == squad_id)
}

fn by_creation_time(records: &mut [SquadRecord]) {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.squad_id.cmp(&b.squad_id)));
}

impl SquadRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a squad creation to the registry.
    ///
    /// Default names delete whatever was claimed at the key; any other name
    /// overwrites it (last write wins).
    pub fn record(
        &self,
        team_id: TeamId,
        squad_id: SquadId,
        squad_name: &str,
        owner_id: PlayerId,
        created_at: Timestamp,
    ) -> RecordOutcome {
        let mut teams = self.teams.write();
        let slot = &mut teams[team_id.index()];

        if is_default_squad_name(squad_name) {
            return match slot.remove(&squad_id) {
                Some(previous) => {
                    debug!(
                        team = %team_id,
                        squad = %squad_id,
                        previous = %previous.squad_name,
                        "Released squad claim"
                    );
                    RecordOutcome::Released
                }
                None => RecordOutcome::Ignored,
            };
        }

        let record = SquadRecord {
            squad_name: squad_name.to_string(),
            team_id,
            squad_id,
            owner_id,
            created_at,
        };

        debug!(team = %team_id, squad = %squad_id, name = %squad_name, "Recorded squad claim");

        match slot.insert(squad_id, record) {
            Some(_) => RecordOutcome::Replaced,
            None => RecordOutcome::Claimed,
        }
    }

    /// Look up the claim at a key.
    pub fn get(&self, team_id: TeamId, squad_id: SquadId) -> Option<SquadRecord> {
        self.teams.read()[team_id.index()].get(&squad_id).cloned()
    }

    /// All claims of a team, oldest first.
    ///
    /// With `live_squads`, claims whose squad is no longer on the server are
    /// deleted before listing. `None` skips that check.
    pub fn list_team(&self, team_id: TeamId, live_squads: Option<&[LiveSquad]>) -> Vec<SquadRecord> {
        let mut teams = self.teams.write();
        let slot = &mut teams[team_id.index()];

        if let Some(live) = live_squads {
            let before = slot.len();
            slot.retain(|squad_id, _| is_live(live, team_id, *squad_id));
            let pruned = before - slot.len();
            if pruned > 0 {
                debug!(team = %team_id, pruned, "Pruned stale squad claims");
            }
        }

        let mut records: Vec<SquadRecord> = slot.values().cloned().collect();
        by_creation_time(&mut records);
        records
    }

    /// The claims at `squad_ids` that exist, oldest first.
    ///
    /// Stale claims among the requested ids are deleted and left out, like in
    /// [`Self::list_team`].
    pub fn select(
        &self,
        team_id: TeamId,
        squad_ids: &[SquadId],
        live_squads: Option<&[LiveSquad]>,
    ) -> Vec<SquadRecord> {
        let mut teams = self.teams.write();
        let slot = &mut teams[team_id.index()];
        let mut records = Vec::with_capacity(squad_ids.len());

        for squad_id in squad_ids {
            let stale = match (slot.get(squad_id), live_squads) {
                (None, _) => continue,
                (Some(_), Some(live)) => !is_live(live, team_id, *squad_id),
                (Some(_), None) => false,
            };

            if stale {
                slot.remove(squad_id);
                debug!(team = %team_id, squad = %squad_id, "Pruned stale squad claim");
            } else if let Some(record) = slot.get(squad_id) {
                if !records.iter().any(|r: &SquadRecord| r.squad_id == *squad_id) {
                    records.push(record.clone());
                }
            }
        }

        by_creation_time(&mut records);
        records
    }

    /// Number of claims currently held for a team.
    pub fn team_len(&self, team_id: TeamId) -> usize {
        self.teams.read()[team_id.index()].len()
    }

    /// Forget every claim of both teams.
    pub fn reset(&self) {
        let mut teams = self.teams.write();
        for slot in teams.iter_mut() {
            slot.clear();
        }
    }
}
