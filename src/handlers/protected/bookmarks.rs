// handlers/protected/bookmarks.rs - saved interview questions

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::handlers::{by_id, ById, Success};
use crate::models::{Bookmark, Difficulty};
use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};
use crate::store::Store;

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("list", Procedure::protected().query(list))
        .procedure(
            "add",
            Procedure::protected()
                .input(
                    question_key()
                        .optional("difficulty", FieldKind::one_of(&Difficulty::VALUES))
                        .optional("targetPosition", FieldKind::String)
                        .optional("notes", FieldKind::String),
                )
                .mutation(add),
        )
        .procedure("remove", Procedure::protected().input(by_id()).mutation(remove))
        .procedure("practice", Procedure::protected().input(by_id()).mutation(practice))
        .procedure("isBookmarked", Procedure::protected().input(question_key()).query(is_bookmarked))
        .procedure(
            "updateNotes",
            Procedure::protected()
                .input(by_id().required("notes", FieldKind::String))
                .mutation(update_notes),
        )
        .procedure(
            "updateCategory",
            Procedure::protected()
                .input(by_id().required("category", FieldKind::String))
                .mutation(update_category),
        )
        .procedure(
            "listByCategory",
            Procedure::protected()
                .input(Contract::object().required("category", FieldKind::String))
                .query(list_by_category),
        )
        .procedure("categories", Procedure::protected().query(categories))
        .build()
}

fn question_key() -> Contract {
    Contract::object()
        .required("topic", FieldKind::String)
        .required("question", FieldKind::String)
}

async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<Bookmark>> {
    Ok(ctx.state().bookmarks.list().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddInput {
    topic: String,
    question: String,
    difficulty: Option<Difficulty>,
    target_position: Option<String>,
    notes: Option<String>,
}

async fn add(ctx: Arc<Context>, input: AddInput) -> anyhow::Result<Bookmark> {
    let user = ctx.require_principal()?;
    let mut bookmark = Bookmark::new(user.id, input.topic, input.question);
    bookmark.difficulty = input.difficulty.unwrap_or_default();
    bookmark.target_position = input.target_position;
    bookmark.notes = input.notes;

    let bookmark = ctx.state().bookmarks.insert(bookmark).await;
    tracing::debug!(id = bookmark.id, "Bookmark added");
    Ok(bookmark)
}

/// Removing a missing bookmark still succeeds
async fn remove(ctx: Arc<Context>, input: ById) -> anyhow::Result<Success> {
    ctx.state().bookmarks.delete(input.id).await;
    Ok(Success::ok())
}

async fn practice(ctx: Arc<Context>, input: ById) -> anyhow::Result<Option<Bookmark>> {
    Ok(ctx
        .state()
        .bookmarks
        .update(input.id, |b: &mut Bookmark| b.record_practice())
        .await)
}

#[derive(Debug, Deserialize)]
struct QuestionKey {
    topic: String,
    question: String,
}

#[derive(Debug, Serialize)]
struct Bookmarked {
    bookmarked: bool,
}

async fn is_bookmarked(ctx: Arc<Context>, input: QuestionKey) -> anyhow::Result<Bookmarked> {
    let bookmarked = ctx
        .state()
        .bookmarks
        .any(|b| b.matches(&input.topic, &input.question))
        .await;
    Ok(Bookmarked { bookmarked })
}

#[derive(Debug, Deserialize)]
struct NotesInput {
    id: i64,
    notes: String,
}

async fn update_notes(ctx: Arc<Context>, input: NotesInput) -> anyhow::Result<Option<Bookmark>> {
    let notes = input.notes;
    Ok(ctx
        .state()
        .bookmarks
        .update(input.id, move |b: &mut Bookmark| b.set_notes(notes))
        .await)
}

#[derive(Debug, Deserialize)]
struct CategoryInput {
    id: i64,
    category: String,
}

async fn update_category(ctx: Arc<Context>, input: CategoryInput) -> anyhow::Result<Option<Bookmark>> {
    let category = input.category;
    Ok(ctx
        .state()
        .bookmarks
        .update(input.id, move |b: &mut Bookmark| b.set_category(category))
        .await)
}

#[derive(Debug, Deserialize)]
struct CategoryFilter {
    category: String,
}

async fn list_by_category(ctx: Arc<Context>, input: CategoryFilter) -> anyhow::Result<Vec<Bookmark>> {
    Ok(ctx
        .state()
        .bookmarks
        .filter(|b| b.category == input.category)
        .await)
}

#[derive(Debug, PartialEq, Serialize)]
struct CategoryEntry {
    category: String,
}

/// Distinct categories in first-seen order
async fn categories(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<CategoryEntry>> {
    let mut seen: Vec<String> = Vec::new();
    for bookmark in ctx.state().bookmarks.list().await {
        if !seen.contains(&bookmark.category) {
            seen.push(bookmark.category);
        }
    }
    Ok(seen.into_iter().map(|category| CategoryEntry { category }).collect())
}
