//! Claim command engine: cooldown, parsing, team resolution, lookup and reply.

use crate::cooldown::CooldownGate;
use crate::formatter::{paginate, OutputFormatter};
use crate::host::{ChatCommandEvent, LiveSquad, ReplyTransport, RosterProvider, SquadCreatedEvent};
use crate::messages::{help_messages, missing_ids_message, Rejection};
use crate::parser::{CommandKind, CommandParser, ParseError, ParsedCommand};
use crate::registry::{RecordOutcome, SquadRegistry};
use crate::resolver::{ResolveError, TeamResolver};
use squadclaim_common::{PlayerId, SquadId, TeamId};
use squadclaim_config::{ClaimConfig, ConfigCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

/// How a chat command invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The caller got a single warning explaining the refusal.
    Rejected(Rejection),
    /// Help was shown.
    Help,
    /// A team's claims were listed.
    Listed {
        /// Listed team.
        team_id: TeamId,
        /// Number of claims shown.
        shown: usize,
    },
    /// Specific claims were compared.
    Compared {
        /// Team the ids were looked up in.
        team_id: TeamId,
        /// Number of claims shown.
        shown: usize,
        /// Requested ids without a claim, in request order.
        missing: Vec<String>,
    },
}

/// Handles squad creation, round end and claim commands.
///
/// Cloning is cheap; clones share the registry, cooldowns and collaborators.
#[derive(Clone)]
pub struct CommandEngine {
    config: Arc<ConfigCache>,
    registry: Arc<SquadRegistry>,
    cooldowns: Arc<CooldownGate>,
    roster: Arc<dyn RosterProvider>,
    transport: Arc<dyn ReplyTransport>,
}

impl CommandEngine {
    /// Create an engine with an empty registry.
    pub fn new(config: Arc<ConfigCache>, roster: Arc<dyn RosterProvider>, transport: Arc<dyn ReplyTransport>) -> Self {
        Self {
            config,
            registry: Arc::new(SquadRegistry::new()),
            cooldowns: Arc::new(CooldownGate::new()),
            roster,
            transport,
        }
    }

    /// The claim registry.
    pub fn registry(&self) -> &SquadRegistry {
        &self.registry
    }

    /// The cooldown gate.
    pub fn cooldowns(&self) -> &CooldownGate {
        &self.cooldowns
    }

    /// Shared configuration cache.
    pub fn config(&self) -> &ConfigCache {
        &self.config
    }

    /// Record a squad creation. Returns `None` when the creator has no squad.
    pub fn on_squad_created(&self, event: &SquadCreatedEvent) -> Option<RecordOutcome> {
        let config = self.config.get();
        if config.claim.debug {
            debug!(?event, "Squad created");
        }

        let Some(squad) = event.player.squad else {
            debug!(player = %event.player.steam_id, "Squad created event without squad, ignoring");
            return None;
        };

        Some(self.registry.record(
            squad.team_id,
            squad.squad_id,
            &event.squad_name,
            event.player.steam_id.clone(),
            event.time,
        ))
    }

    /// Forget all claims and cooldowns.
    pub fn on_round_ended(&self) {
        self.registry.reset();
        self.cooldowns.reset();
        info!("Round ended, cleared squad claims and cooldowns");
    }

    /// Run one claim command to completion, replies included.
    #[instrument(skip(self, event), fields(player = %event.steam_id, chat = ?event.chat))]
    pub async fn on_chat_command(&self, event: &ChatCommandEvent) -> CommandOutcome {
        let config = self.config.get();
        let claim = &config.claim;
        let caller = &event.steam_id;
        let is_admin = event.chat.is_admin();

        if claim.debug {
            debug!(?event, "Claim command received");
        }

        if let Err(e) = self
            .cooldowns
            .try_acquire(caller, claim.cooldown_for(is_admin), Instant::now())
        {
            debug!("{}", e);
            return self
                .reject(
                    caller,
                    claim,
                    Rejection::OnCooldown {
                        remaining_seconds: e.remaining_seconds(),
                    },
                )
                .await;
        }

        if claim.only_squad_leader && !is_admin && !event.player.is_leader {
            return self.reject(caller, claim, Rejection::SquadLeaderOnly).await;
        }

        let parsed = CommandParser::parse(&event.message);
        let has_selector = match &parsed {
            Ok(command) => command.team_selector.is_some(),
            Err(ParseError::InvalidSquadId { team_selector, .. }) => team_selector.is_some(),
        };

        // admin check precedes squad id validation
        if has_selector && !is_admin {
            return self.reject(caller, claim, Rejection::AdminOnly).await;
        }

        let command = match parsed {
            Ok(command) => command,
            Err(e) => {
                debug!("{}", e);
                return self.reject(caller, claim, Rejection::InvalidSquadId).await;
            }
        };

        if command.kind == CommandKind::Help {
            let messages = help_messages(&claim.command_prefix, is_admin);
            self.deliver(caller, &messages, Duration::ZERO, claim).await;
            return CommandOutcome::Help;
        }

        if let Err(e) = self.roster.refresh_squads().await {
            warn!("Failed to refresh squad list, using last known squads: {}", e);
        }

        let team_id = match self.resolve_team(&command, event.player.team_id).await {
            Ok(team_id) => team_id,
            Err(rejection) => return self.reject(caller, claim, rejection).await,
        };

        let live_squads = if claim.debug { None } else { Some(self.roster.squads()) };
        let formatter = OutputFormatter::new(claim.clock_zone());

        match command.kind {
            CommandKind::Compare => {
                self.compare(caller, &command, team_id, live_squads.as_deref(), formatter, claim)
                    .await
            }
            CommandKind::List | CommandKind::Help => {
                let records = self.registry.list_team(team_id, live_squads.as_deref());
                let batches = paginate(&formatter.format_list(&records), claim.chunk_size);
                self.deliver(caller, &batches, claim.batch_delay(), claim).await;

                CommandOutcome::Listed {
                    team_id,
                    shown: records.len(),
                }
            }
        }
    }

    async fn resolve_team(&self, command: &ParsedCommand, caller_team: TeamId) -> Result<TeamId, Rejection> {
        let Some(selector) = command.team_selector.as_deref() else {
            return Ok(caller_team);
        };

        let players = if TeamResolver::needs_roster(selector) {
            if let Err(e) = self.roster.refresh_players().await {
                warn!("Failed to refresh player list, using last known players: {}", e);
            }
            self.roster.players()
        } else {
            Vec::new()
        };

        let team_id = TeamResolver::resolve(selector, caller_team, &players).map_err(|e| {
            debug!("{}", e);
            match e {
                ResolveError::FactionNotFound { prefix } => Rejection::FactionNotFound { prefix },
            }
        })?;

        debug!(selector, team = %team_id, "Resolved team selector");
        Ok(team_id)
    }

    async fn compare(
        &self,
        caller: &PlayerId,
        command: &ParsedCommand,
        team_id: TeamId,
        live_squads: Option<&[LiveSquad]>,
        formatter: OutputFormatter,
        claim: &ClaimConfig,
    ) -> CommandOutcome {
        let requested = command.unique_squad_ids();
        if requested.len() < 2 {
            return self.reject(caller, claim, Rejection::TooFewIds).await;
        }

        // tokens like "1e2" pass as numbers but never name a squad
        let squad_ids: Vec<SquadId> = requested.iter().filter_map(|token| SquadId::from_token(token)).collect();
        let records = self.registry.select(team_id, &squad_ids, live_squads);

        if records.len() < 2 {
            return self.reject(caller, claim, Rejection::TooFewExisting).await;
        }

        let batches = paginate(&formatter.format_list(&records), claim.chunk_size);
        self.deliver(caller, &batches, claim.batch_delay(), claim).await;

        let missing: Vec<String> = requested
            .iter()
            .filter(|token| {
                SquadId::from_token(token).map_or(true, |id| !records.iter().any(|r| r.squad_id == id))
            })
            .map(|token| (*token).to_string())
            .collect();

        if !missing.is_empty() {
            pause(claim.missing_report_delay()).await;
            let report = missing_ids_message(command.team_selector.as_deref(), &missing);
            self.send(caller, &report).await;
        }

        CommandOutcome::Compared {
            team_id,
            shown: records.len(),
            missing,
        }
    }

    /// Send `messages` in order, `repeat_count` times.
    ///
    /// `gap` separates messages within one repetition and the repeat delay
    /// separates repetitions; nothing waits after the final message.
    async fn deliver(&self, caller: &PlayerId, messages: &[String], gap: Duration, claim: &ClaimConfig) {
        let repeats = claim.repeat_count.max(1);

        for round in 0..repeats {
            for (index, message) in messages.iter().enumerate() {
                self.send(caller, message).await;
                if index + 1 < messages.len() {
                    pause(gap).await;
                }
            }

            if round + 1 < repeats {
                pause(claim.repeat_delay()).await;
            }
        }
    }

    async fn reject(&self, caller: &PlayerId, claim: &ClaimConfig, rejection: Rejection) -> CommandOutcome {
        debug!(?rejection, "Rejected claim command");
        self.send(caller, &rejection.message(&claim.command_prefix)).await;
        CommandOutcome::Rejected(rejection)
    }

    async fn send(&self, caller: &PlayerId, message: &str) {
        if let Err(e) = self.transport.warn(caller, message).await {
            warn!("Failed to warn player {}: {}", caller, e);
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}
