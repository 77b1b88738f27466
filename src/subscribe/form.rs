use super::notify::SubscribeClient;
use super::timer::ResetTimer;
use crate::error::SubscribeError;
use derivative::Derivative;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug)]
enum FormEvent {
    /// Revert the confirmation scheduled by submission `seq`.
    Reset { seq: u64 },
    Notified {
        seq: u64,
        outcome: Result<(), SubscribeError>,
    },
}

/// Mailing-list signup: an email box and a short-lived "Subscribed!" state.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct SubscriptionForm {
    pub email: String,
    submitted: bool,
    error: Option<String>,
    reset_delay: Duration,
    seq: u64,
    notifier: Option<SubscribeClient>,
    #[derivative(Debug = "ignore")]
    events_sender: Sender<FormEvent>,
    #[derivative(Debug = "ignore")]
    events_receiver: Receiver<FormEvent>,
    reset_timer: Option<ResetTimer>,
    #[derivative(Debug = "ignore")]
    notify_task: Option<JoinHandle<()>>,
}

impl SubscriptionForm {
    /// Without a `notifier` nothing leaves the machine; submission is purely local.
    pub fn new(reset_delay: Duration, notifier: Option<SubscribeClient>) -> Self {
        let (events_sender, events_receiver) = channel();
        Self {
            email: String::new(),
            submitted: false,
            error: None,
            reset_delay,
            seq: 0,
            notifier,
            events_sender,
            events_receiver,
            reset_timer: None,
            notify_task: None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.reset_timer.is_some() || self.notify_task.is_some()
    }

    pub fn submit(&mut self, runtime: &Handle) -> Result<(), SubscribeError> {
        let email = self.email.trim().to_string();
        if !is_well_formed_email(&email) {
            let err = SubscribeError::InvalidEmail(email);
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.seq += 1;
        self.submitted = true;
        self.error = None;
        info!("Subscription submitted");
        debug!("Subscribing {}", email);

        if let Some(previous) = self.reset_timer.take() {
            previous.cancel();
        }
        self.reset_timer = Some(ResetTimer::schedule(
            runtime,
            self.reset_delay,
            self.events_sender.clone(),
            FormEvent::Reset { seq: self.seq },
        ));

        if let Some(notifier) = self.notifier.clone() {
            if let Some(task) = self.notify_task.take() {
                task.abort();
            }
            let sender = self.events_sender.clone();
            let seq = self.seq;
            self.notify_task = Some(runtime.spawn(async move {
                let outcome = notifier.subscribe(&email).await;
                let _ = sender.send(FormEvent::Notified { seq, outcome });
            }));
        }

        Ok(())
    }

    /// Apply fired timers and finished notifications. Returns `true` on change.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_receiver.try_recv() {
            match event {
                FormEvent::Reset { seq } if seq == self.seq => {
                    debug!("Subscription confirmation expired");
                    self.submitted = false;
                    self.reset_timer = None;
                    changed = true;
                }
                FormEvent::Notified { seq, outcome } if seq == self.seq => {
                    self.notify_task = None;
                    if let Err(e) = outcome {
                        warn!("{}", e);
                        self.error = Some(e.to_string());
                        self.submitted = false;
                        self.reset_timer = None;
                    }
                    changed = true;
                }
                stale => debug!("Ignoring stale form event: {:?}", stale),
            }
        }
        changed
    }
}

impl Drop for SubscriptionForm {
    fn drop(&mut self) {
        if let Some(task) = self.notify_task.take() {
            task.abort();
        }
        // `reset_timer` aborts itself when dropped.
    }
}

/// Roughly what an `<input type="email">` accepts: `local@domain.tld`, no whitespace.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
