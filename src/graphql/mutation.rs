//! GraphQL Mutation resolvers.
//!
//! Each mutation validates and applies through a single store call, then
//! publishes change events for subscribers.

use async_graphql::{Context, Object, Result, ID};
use std::sync::Arc;

use super::schema::{
    Comment, CreateCommentInput, CreatePostInput, CreateUserInput, Post, UpdateCommentInput,
    UpdatePostInput, UpdateUserInput, User,
};
use super::subscription::{BlogEvent, EventSender, MutationKind};
use crate::store::{self, Store};

/// Root mutation type
pub struct Mutation;

/// Send an event if a channel is registered. No subscribers is not an error.
fn publish(ctx: &Context<'_>, event: BlogEvent) {
    if let Ok(sender) = ctx.data::<EventSender>() {
        let _ = sender.send(event);
    }
}

fn publish_post(ctx: &Context<'_>, mutation: MutationKind, post: &store::Post) {
    publish(
        ctx,
        BlogEvent::Post {
            mutation,
            post: post.clone(),
        },
    );
}

fn publish_comment(ctx: &Context<'_>, mutation: MutationKind, comment: &store::Comment) {
    publish(
        ctx,
        BlogEvent::Comment {
            mutation,
            comment: comment.clone(),
        },
    );
}

#[Object]
impl Mutation {
    /// Register a user. Fails if the email is already in use.
    async fn create_user(&self, ctx: &Context<'_>, data: CreateUserInput) -> Result<User> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.create_user(data.into())?.into())
    }

    /// Change a user's name, email or age
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: UpdateUserInput,
    ) -> Result<User> {
        let store = ctx.data::<Arc<Store>>()?;
        Ok(store.update_user(&id, data.into())?.into())
    }

    /// Delete a user together with their posts and every related comment
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<User> {
        let store = ctx.data::<Arc<Store>>()?;
        let deleted = store.delete_user(&id)?;

        for post in &deleted.posts {
            publish_post(ctx, MutationKind::Deleted, post);
        }
        for comment in &deleted.comments {
            publish_comment(ctx, MutationKind::Deleted, comment);
        }
        Ok(deleted.user.into())
    }

    /// Create a post. The author must exist.
    async fn create_post(&self, ctx: &Context<'_>, data: CreatePostInput) -> Result<Post> {
        let store = ctx.data::<Arc<Store>>()?;
        let post = store.create_post(data.into())?;
        publish_post(ctx, MutationKind::Created, &post);
        Ok(post.into())
    }

    /// Change a post's title, body or published flag
    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: UpdatePostInput,
    ) -> Result<Post> {
        let store = ctx.data::<Arc<Store>>()?;
        let post = store.update_post(&id, data.into())?;
        publish_post(ctx, MutationKind::Updated, &post);
        Ok(post.into())
    }

    /// Delete a post and its comments
    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<Post> {
        let store = ctx.data::<Arc<Store>>()?;
        let deleted = store.delete_post(&id)?;

        publish_post(ctx, MutationKind::Deleted, &deleted.post);
        for comment in &deleted.comments {
            publish_comment(ctx, MutationKind::Deleted, comment);
        }
        Ok(deleted.post.into())
    }

    /// Comment on a published post. Posting the same text twice is rejected.
    async fn create_comment(
        &self,
        ctx: &Context<'_>,
        data: CreateCommentInput,
    ) -> Result<Comment> {
        let store = ctx.data::<Arc<Store>>()?;
        let comment = store.create_comment(data.into())?;
        publish_comment(ctx, MutationKind::Created, &comment);
        Ok(comment.into())
    }

    /// Edit a comment's text
    async fn update_comment(
        &self,
        ctx: &Context<'_>,
        id: ID,
        data: UpdateCommentInput,
    ) -> Result<Comment> {
        let store = ctx.data::<Arc<Store>>()?;
        let changed = data.text.is_some();
        let comment = store.update_comment(&id, data.into())?;
        if changed {
            publish_comment(ctx, MutationKind::Updated, &comment);
        }
        Ok(comment.into())
    }

    async fn delete_comment(&self, ctx: &Context<'_>, id: ID) -> Result<Comment> {
        let store = ctx.data::<Arc<Store>>()?;
        let comment = store.delete_comment(&id)?;
        publish_comment(ctx, MutationKind::Deleted, &comment);
        Ok(comment.into())
    }
}
