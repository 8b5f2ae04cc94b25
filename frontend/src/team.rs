use crate::api::{ApiResult, HeroApi};
use shared::models::{TeamQuery, TeamRecommendation};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum TeamStatus {
    #[default]
    Idle,
    Loading,
    Loaded(TeamRecommendation),
}

/// A recommendation request tagged with its sequence number
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamTicket {
    pub seq: u64,
    pub query: TeamQuery,
}

/// Request/response cycle of team recommendations.
///
/// Requests may overlap; only the response to the most recently issued one is
/// applied. A failure puts back whatever was settled before the request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TeamState {
    status: TeamStatus,
    settled: TeamStatus,
    latest_seq: u64,
    outbox: Option<TeamTicket>,
    last_error: Option<String>,
}

impl TeamState {
    pub fn status(&self) -> &TeamStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == TeamStatus::Loading
    }

    pub fn result(&self) -> Option<&TeamRecommendation> {
        match &self.status {
            TeamStatus::Loaded(rec) => Some(rec),
            _ => None,
        }
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn outbox(&self) -> Option<TeamTicket> {
        self.outbox
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Enters `Loading`, dropping the visible result, and returns the ticket to send.
    pub fn begin(&mut self, query: TeamQuery) -> TeamTicket {
        self.latest_seq += 1;
        self.status = TeamStatus::Loading;
        self.last_error = None;
        let ticket = TeamTicket {
            seq: self.latest_seq,
            query,
        };
        self.outbox = Some(ticket);
        ticket
    }

    pub fn mark_sent(&mut self, seq: u64) {
        if self.outbox.is_some_and(|t| t.seq == seq) {
            self.outbox = None;
        }
    }

    /// Applies a response if it answers the latest request. Returns whether it was applied.
    pub fn settle(&mut self, seq: u64, result: ApiResult<TeamRecommendation>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(
                "Dropping stale team response {} (latest {})",
                seq,
                self.latest_seq
            );
            return false;
        }
        self.mark_sent(seq);
        match result {
            Ok(rec) => {
                self.status = TeamStatus::Loaded(rec);
                self.settled = self.status.clone();
            }
            Err(e) => {
                tracing::warn!("Team recommendation failed: {}", e);
                self.status = self.settled.clone();
                self.last_error = Some(e.to_string());
            }
        }
        true
    }
}

pub async fn request_team<A: HeroApi>(
    api: &A,
    ticket: &TeamTicket,
) -> ApiResult<TeamRecommendation> {
    api.recommend_team(&ticket.query).await
}
