// src/services/event_publisher.rs
use crate::models::TeamEvent;
use log::{debug, info};
use tokio::sync::broadcast;

/// Fan-out of resource mutations to every connected client.
///
/// Subscribers filter on `team_id` themselves; a lagging subscriber drops the
/// oldest events rather than slowing publishers down.
#[derive(Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<TeamEvent>,
}

impl EventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Returns how many subscribers received the event (0 when nobody listens).
    pub fn publish(&self, event: TeamEvent) -> usize {
        let team_id = event.team_id;
        let event_type = event.event_type;
        match self.sender.send(event) {
            Ok(receivers) => {
                info!(
                    "📣 {:?} event for team {} sent to {} subscribers",
                    event_type, team_id, receivers
                );
                receivers
            }
            Err(_) => {
                debug!("No subscribers for {:?} event on team {}", event_type, team_id);
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TeamEvent> {
        self.sender.subscribe()
    }
}
