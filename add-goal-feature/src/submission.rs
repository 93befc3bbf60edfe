//! Background goal submission
//!
//! egui's update loop is synchronous, so a submission runs on its own thread
//! and reports back through a one-slot channel that the UI polls every frame.

use crossbeam::channel::{bounded, Receiver, TryRecvError};
use log::{debug, warn};
use shared::{CreateGoalRequest, CreateGoalResponse};
use std::sync::Arc;
use std::thread;

use app_state::GoalService;

/// Outcome of a submission as seen by the UI thread
#[derive(Debug)]
pub(crate) enum SubmissionPoll {
    Pending,
    Finished(anyhow::Result<CreateGoalResponse>),
    /// The worker went away without reporting a result
    Lost,
}

/// A submission in flight
pub(crate) struct PendingSubmission {
    receiver: Receiver<anyhow::Result<CreateGoalResponse>>,
}

impl PendingSubmission {
    /// Start `create_goal` on a worker thread; returns immediately
    pub(crate) fn spawn(service: Arc<dyn GoalService>, request: CreateGoalRequest) -> Self {
        let (sender, receiver) = bounded(1);

        thread::spawn(move || {
            let result = service.create_goal(request);
            if sender.send(result).is_err() {
                // Receiver dropped: the screen stopped observing this submission
                debug!("Goal submission finished after its screen went away");
            }
        });

        Self { receiver }
    }

    pub(crate) fn try_recv(&self) -> SubmissionPoll {
        match self.receiver.try_recv() {
            Ok(result) => SubmissionPoll::Finished(result),
            Err(TryRecvError::Empty) => SubmissionPoll::Pending,
            Err(TryRecvError::Disconnected) => {
                warn!("Goal submission worker exited without a result");
                SubmissionPoll::Lost
            }
        }
    }
}
