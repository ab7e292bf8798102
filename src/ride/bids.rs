//! Bid feed
//!
//! A ride's incoming driver bids arrive over a push channel with a polling
//! fallback. [`BidFeed`] is the single authority for that reconciliation: one
//! owner for every timer, an explicit phase machine (connecting, live,
//! degraded polling), and one bid list as the source of truth. The embedding
//! shell executes the returned [`FeedEffect`]s (opening the socket, firing a
//! poll request, arming timers) and feeds the results back in as
//! [`FeedEvent`]s.

use std::time::Duration;

use tracing::{debug, info};

use crate::ride::{Bid, RideId};

/// How long to wait for the socket before falling back to polling.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reconnection attempt cadence while degraded.
pub const RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

/// Poll cadence while degraded.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Feed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    /// Waiting for the push channel to come up.
    Connecting,

    /// Push channel established; bids arrive without polling.
    Live,

    /// Push channel unavailable; polling on a fixed cadence while retrying
    /// the connection.
    DegradedPolling,
}

/// Timers owned by the feed. Only the feed schedules or cancels them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Deadline for the initial connection attempt.
    ConnectTimeout,

    /// Next reconnection attempt while degraded.
    Reconnect,

    /// Next fallback poll while degraded.
    Poll,
}

/// Inputs to the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// The push channel connected.
    SocketUp,

    /// The push channel dropped.
    SocketDown,

    /// A bid arrived over the push channel.
    BidPushed(Bid),

    /// A fallback poll returned the full current bid list.
    PollCompleted(Vec<Bid>),

    /// A previously scheduled timer fired.
    Timer(TimerKind),
}

/// Side effects for the embedding shell to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEffect {
    /// Open (or re-open) the push channel.
    Connect,

    /// Fetch the current bid list from the bids endpoint.
    Poll,

    /// Arm a timer.
    Schedule(TimerKind, Duration),

    /// Disarm a timer.
    Cancel(TimerKind),

    /// The bid list changed; re-render.
    Publish,
}

/// The bid acquisition state machine for one ride.
#[derive(Debug)]
pub struct BidFeed {
    ride: RideId,
    phase: FeedPhase,
    bids: Vec<Bid>,
}

impl BidFeed {
    /// Creates a feed for the given ride. The returned effects open the push
    /// channel and arm the fallback deadline.
    #[must_use]
    pub fn start(ride: RideId) -> (Self, Vec<FeedEffect>) {
        let feed = BidFeed {
            ride,
            phase: FeedPhase::Connecting,
            bids: Vec::new(),
        };

        let effects = vec![
            FeedEffect::Connect,
            FeedEffect::Schedule(TimerKind::ConnectTimeout, CONNECT_TIMEOUT),
        ];

        (feed, effects)
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    /// The ride this feed tracks.
    #[must_use]
    pub fn ride(&self) -> &RideId {
        &self.ride
    }

    /// The current bid list, sorted by fare ascending.
    #[must_use]
    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    /// Applies one input and returns the effects to execute.
    pub fn handle(&mut self, event: FeedEvent) -> Vec<FeedEffect> {
        match event {
            FeedEvent::SocketUp => self.on_socket_up(),
            FeedEvent::SocketDown => self.on_socket_down(),
            FeedEvent::BidPushed(bid) => self.on_bid_pushed(bid),
            FeedEvent::PollCompleted(bids) => self.on_poll_completed(bids),
            FeedEvent::Timer(kind) => self.on_timer(kind),
        }
    }

    fn on_socket_up(&mut self) -> Vec<FeedEffect> {
        match self.phase {
            FeedPhase::Connecting => {
                self.transition(FeedPhase::Live);
                vec![FeedEffect::Cancel(TimerKind::ConnectTimeout)]
            }
            FeedPhase::DegradedPolling => {
                self.transition(FeedPhase::Live);
                vec![
                    FeedEffect::Cancel(TimerKind::Poll),
                    FeedEffect::Cancel(TimerKind::Reconnect),
                ]
            }
            FeedPhase::Live => Vec::new(),
        }
    }

    fn on_socket_down(&mut self) -> Vec<FeedEffect> {
        match self.phase {
            FeedPhase::Live => {
                self.transition(FeedPhase::DegradedPolling);
                self.degraded_effects()
            }
            // A drop while connecting is resolved by the connect deadline;
            // a drop while already degraded changes nothing.
            FeedPhase::Connecting | FeedPhase::DegradedPolling => Vec::new(),
        }
    }

    fn on_timer(&mut self, kind: TimerKind) -> Vec<FeedEffect> {
        match (self.phase, kind) {
            (FeedPhase::Connecting, TimerKind::ConnectTimeout) => {
                self.transition(FeedPhase::DegradedPolling);
                self.degraded_effects()
            }
            (FeedPhase::DegradedPolling, TimerKind::Poll) => vec![
                FeedEffect::Poll,
                FeedEffect::Schedule(TimerKind::Poll, POLL_INTERVAL),
            ],
            (FeedPhase::DegradedPolling, TimerKind::Reconnect) => vec![
                FeedEffect::Connect,
                FeedEffect::Schedule(TimerKind::Reconnect, RECONNECT_INTERVAL),
            ],
            // Stale timer for a phase we already left.
            (phase, kind) => {
                debug!(?phase, ?kind, "stale timer ignored");
                Vec::new()
            }
        }
    }

    fn on_bid_pushed(&mut self, bid: Bid) -> Vec<FeedEffect> {
        if bid.ride != self.ride {
            debug!(ride = %bid.ride, "bid for another ride ignored");
            return Vec::new();
        }

        if let Some(existing) = self.bids.iter_mut().find(|b| b.id == bid.id) {
            if *existing == bid {
                return Vec::new();
            }
            *existing = bid;
        } else {
            self.bids.push(bid);
        }

        self.sort_bids();

        vec![FeedEffect::Publish]
    }

    fn on_poll_completed(&mut self, mut bids: Vec<Bid>) -> Vec<FeedEffect> {
        if self.phase == FeedPhase::Live {
            // A fallback poll still in flight when the socket recovered must
            // not clobber bids that arrived by push since.
            debug!(ride = %self.ride, "poll result after recovery ignored");
            return Vec::new();
        }

        bids.retain(|bid| bid.ride == self.ride);
        bids.sort_by(|a, b| (a.fare, &a.id).cmp(&(b.fare, &b.id)));

        // Structural comparison of the full lists, not serialized strings.
        if bids == self.bids {
            return Vec::new();
        }

        self.bids = bids;

        vec![FeedEffect::Publish]
    }

    fn degraded_effects(&self) -> Vec<FeedEffect> {
        vec![
            FeedEffect::Poll,
            FeedEffect::Schedule(TimerKind::Poll, POLL_INTERVAL),
            FeedEffect::Schedule(TimerKind::Reconnect, RECONNECT_INTERVAL),
        ]
    }

    fn sort_bids(&mut self) {
        self.bids.sort_by(|a, b| (a.fare, &a.id).cmp(&(b.fare, &b.id)));
    }

    fn transition(&mut self, next: FeedPhase) {
        info!(ride = %self.ride, from = ?self.phase, to = ?next, "bid feed transition");
        self.phase = next;
    }
}
