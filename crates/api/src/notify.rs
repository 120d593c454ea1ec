// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification fan-out.
//!
//! Workflows return the notices their transition produced alongside the
//! response. Callers deliver them once the transaction has committed, and
//! a failed delivery is logged and dropped.

use shiftdesk::{Announcement, Audience};
use shiftdesk_domain::{RefType, Schedule, TimeWindow};
use shiftdesk_persistence::{PersistenceError, SqlitePersistence};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::directory::UserDirectory;

/// One message addressed to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// The recipient.
    pub user_id: i64,
    /// The headline.
    pub title: String,
    /// The message text.
    pub body: String,
    /// The kind of record the message refers to.
    pub ref_type: RefType,
    /// The referenced record.
    pub ref_id: Option<i64>,
    /// When the message was produced.
    pub created_at: OffsetDateTime,
}

/// Somewhere notices can be delivered.
pub trait NotificationSink {
    /// Delivers one notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the notice could not be stored.
    fn notify(&mut self, notice: &Notice) -> Result<(), PersistenceError>;
}

impl NotificationSink for SqlitePersistence {
    fn notify(&mut self, notice: &Notice) -> Result<(), PersistenceError> {
        self.create_notification(
            notice.user_id,
            &notice.title,
            &notice.body,
            notice.ref_type,
            notice.ref_id,
            notice.created_at,
        )
        .map(|_| ())
    }
}

/// Delivers every notice, logging and skipping failures.
///
/// # Returns
///
/// The number of notices delivered.
pub fn dispatch_notices<S: NotificationSink + ?Sized>(sink: &mut S, notices: &[Notice]) -> usize {
    let mut delivered: usize = 0;
    for notice in notices {
        match sink.notify(notice) {
            Ok(()) => delivered += 1,
            Err(e) => warn!(
                user_id = notice.user_id,
                ref_id = ?notice.ref_id,
                title = %notice.title,
                error = %e,
                "Failed to deliver notification"
            ),
        }
    }
    debug!(delivered, total = notices.len(), "Dispatched notifications");
    delivered
}

/// A workflow response plus the notices it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T> {
    /// The response to return to the caller.
    pub response: T,
    /// Notices to deliver after commit.
    pub notices: Vec<Notice>,
}

impl<T> Outcome<T> {
    /// Delivers the notices and returns the response.
    pub fn deliver<S: NotificationSink + ?Sized>(self, sink: &mut S) -> T {
        dispatch_notices(sink, &self.notices);
        self.response
    }
}

/// The users an announcement can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parties {
    /// Who opened the request.
    pub requester_id: i64,
    /// Who the request is addressed to, if anyone.
    pub target_user_id: Option<i64>,
    /// Who accepted the request, if anyone.
    pub counterparty_id: Option<i64>,
    /// The requested window, used to find channel mates.
    pub window: Option<TimeWindow>,
}

impl Parties {
    /// Parties of a request with only a requester.
    #[must_use]
    pub const fn requester(requester_id: i64) -> Self {
        Self {
            requester_id,
            target_user_id: None,
            counterparty_id: None,
            window: None,
        }
    }
}

/// Renders an announcement into one notice per distinct recipient.
///
/// Recipient resolution reads the directory and schedule store. A failed
/// lookup drops that audience and is logged, since the transition it
/// reports has already committed.
pub fn announce(
    persistence: &mut SqlitePersistence,
    announcement: Announcement,
    parties: &Parties,
    body: &str,
    ref_id: Option<i64>,
    now: OffsetDateTime,
) -> Vec<Notice> {
    let mut recipients: Vec<i64> = Vec::new();
    for audience in announcement.audiences() {
        match resolve_audience(persistence, *audience, parties) {
            Ok(ids) => {
                for id in ids {
                    if !recipients.contains(&id) {
                        recipients.push(id);
                    }
                }
            }
            Err(e) => warn!(
                audience = ?audience,
                error = %e,
                "Could not resolve notification audience"
            ),
        }
    }

    recipients
        .into_iter()
        .map(|user_id| Notice {
            user_id,
            title: announcement.title().to_string(),
            body: body.to_string(),
            ref_type: announcement.ref_type(),
            ref_id,
            created_at: now,
        })
        .collect()
}

fn resolve_audience(
    persistence: &mut SqlitePersistence,
    audience: Audience,
    parties: &Parties,
) -> Result<Vec<i64>, PersistenceError> {
    match audience {
        Audience::Requester => Ok(vec![parties.requester_id]),
        Audience::Target => Ok(parties.target_user_id.into_iter().collect()),
        Audience::Counterparty => Ok(parties.counterparty_id.into_iter().collect()),
        Audience::Backoffice => persistence.backoffice_ids(),
        Audience::ChannelMates => channel_mates(persistence, parties),
    }
}

/// Users on the requester's channel who work during the requested window.
fn channel_mates(
    persistence: &mut SqlitePersistence,
    parties: &Parties,
) -> Result<Vec<i64>, PersistenceError> {
    let Some(window) = parties.window else {
        return Ok(Vec::new());
    };
    let Some(own_shift) = persistence.find_overlapping(parties.requester_id, &window)? else {
        info!(
            requester_id = parties.requester_id,
            "No channel for broadcast swap; only the requester is notified"
        );
        return Ok(Vec::new());
    };

    let mates: Vec<Schedule> = persistence.list_on_channel(own_shift.channel, &window)?;
    let mut ids: Vec<i64> = Vec::new();
    for schedule in mates {
        if schedule.user_id != parties.requester_id && !ids.contains(&schedule.user_id) {
            ids.push(schedule.user_id);
        }
    }
    debug!(
        requester_id = parties.requester_id,
        channel = %own_shift.channel,
        recipients = ids.len(),
        "Resolved broadcast channel mates"
    );
    Ok(ids)
}
