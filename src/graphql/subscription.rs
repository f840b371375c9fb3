//! GraphQL Subscription resolvers.
//!
//! Every stream handed to the framework owns its resources. When a client
//! unsubscribes the stream is dropped, which stops its interval or closes its
//! broadcast receiver.

use async_graphql::{Context, Enum, Result, SimpleObject, Subscription, ID};
use futures_util::{future, stream, Stream, StreamExt};
use std::time::Duration;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use super::schema::{Comment, Post};
use crate::config::SubscriptionConfig;
use crate::store;

/// Kind of change carried by an event
#[derive(Enum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

/// Change notification published by mutations.
#[derive(Clone, Debug)]
pub enum BlogEvent {
    Post {
        mutation: MutationKind,
        post: store::Post,
    },
    Comment {
        mutation: MutationKind,
        comment: store::Comment,
    },
}

pub type EventSender = broadcast::Sender<BlogEvent>;

/// Create the broadcast channel shared by mutations and subscribers.
pub fn create_event_channel(capacity: usize) -> EventSender {
    let (sender, _receiver) = broadcast::channel(capacity);
    sender
}

#[derive(SimpleObject, Clone)]
pub struct PostEvent {
    pub mutation: MutationKind,
    pub data: Post,
}

#[derive(SimpleObject, Clone)]
pub struct CommentEvent {
    pub mutation: MutationKind,
    pub data: Comment,
}

/// Root subscription type
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Counts up from 1, one tick per configured interval
    async fn count(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = i32>> {
        let config = ctx.data::<SubscriptionConfig>()?;
        Ok(counter(Duration::from_millis(config.count_interval_ms)))
    }

    /// Post created, updated or deleted
    async fn post(&self, ctx: &Context<'_>) -> Result<impl Stream<Item = PostEvent>> {
        let receiver = ctx.data::<EventSender>()?.subscribe();
        Ok(events(receiver).filter_map(|event| {
            future::ready(match event {
                BlogEvent::Post { mutation, post } => Some(PostEvent {
                    mutation,
                    data: post.into(),
                }),
                BlogEvent::Comment { .. } => None,
            })
        }))
    }

    /// Comment created, updated or deleted on the given post
    async fn comment(
        &self,
        ctx: &Context<'_>,
        post_id: ID,
    ) -> Result<impl Stream<Item = CommentEvent>> {
        let receiver = ctx.data::<EventSender>()?.subscribe();
        let post_id = post_id.0;
        Ok(events(receiver).filter_map(move |event| {
            future::ready(match event {
                BlogEvent::Comment { mutation, comment } if comment.post == post_id => {
                    Some(CommentEvent {
                        mutation,
                        data: comment.into(),
                    })
                }
                _ => None,
            })
        }))
    }
}

/// Stream yielding 1, 2, 3, ... every `period`, starting one period from now.
pub fn counter(period: Duration) -> impl Stream<Item = i32> {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!(period_ms = period.as_millis() as u64, "count subscription started");

    stream::unfold((ticker, 0i32), |(mut ticker, count)| async move {
        ticker.tick().await;
        let next = count.saturating_add(1);
        Some((next, (ticker, next)))
    })
}

/// Adapt a broadcast receiver into a stream. Lagging receivers skip ahead.
fn events(receiver: broadcast::Receiver<BlogEvent>) -> impl Stream<Item = BlogEvent> {
    stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => return Some((event, receiver)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "subscriber lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counter_counts_up() {
        let values: Vec<i32> = counter(Duration::from_millis(5)).take(3).collect().await;
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_events_end_when_channel_closes() {
        let sender = create_event_channel(4);
        let receiver = sender.subscribe();
        let comment = store::Comment {
            id: "c1".into(),
            text: "hi".into(),
            author: "1".into(),
            post: "4".into(),
        };
        sender
            .send(BlogEvent::Comment {
                mutation: MutationKind::Created,
                comment,
            })
            .unwrap();
        drop(sender);

        let received: Vec<BlogEvent> = events(receiver).collect().await;
        assert_eq!(received.len(), 1);
        assert!(matches!(
            received[0],
            BlogEvent::Comment {
                mutation: MutationKind::Created,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_dropping_event_stream_releases_receiver() {
        let sender = create_event_channel(4);
        let stream = events(sender.subscribe());
        assert_eq!(sender.receiver_count(), 1);

        drop(stream);
        assert_eq!(sender.receiver_count(), 0);
        // Publishing with nobody listening is not a failure for mutations
        assert!(sender
            .send(BlogEvent::Post {
                mutation: MutationKind::Created,
                post: store::Post {
                    id: "p".into(),
                    title: String::new(),
                    body: String::new(),
                    author: "1".into(),
                    published: true,
                },
            })
            .is_err());
    }

    #[tokio::test]
    async fn test_lagged_receiver_skips_ahead() {
        let sender = create_event_channel(1);
        let receiver = sender.subscribe();
        for id in ["a", "b"] {
            let _ = sender.send(BlogEvent::Comment {
                mutation: MutationKind::Deleted,
                comment: store::Comment {
                    id: id.into(),
                    text: String::new(),
                    author: "1".into(),
                    post: "1".into(),
                },
            });
        }
        drop(sender);

        let received: Vec<BlogEvent> = events(receiver).collect().await;
        assert_eq!(received.len(), 1);
        match &received[0] {
            BlogEvent::Comment { comment, .. } => assert_eq!(comment.id, "b"),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
