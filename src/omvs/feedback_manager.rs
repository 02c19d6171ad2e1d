//! Feedback Manager OMVS: comments, likes, star ratings, informal tags and
//! note logs that people attach to any element.
//!
//! Attachment operations take an `is_public` flag, sent as the `isPublic`
//! query parameter. Private feedback is only visible to its creator.

use serde::Serialize;
use serde_json::Value;
use chrono::{DateTime, Utc};

use crate::client::ServerClient;
use crate::client::body::{DeleteRequest, GetRequest, NewRelationshipRequest, PageOptions, SearchOptions, UpdateElementRequest};
use crate::client::validate::{validate_guid, validate_name};
use crate::core::error::Result;

use super::ViewService;

const URL_MARKER: &str = "feedback-manager";
const ELEMENTS: &str = "elements";
const COMMENTS: &str = "comments";
const TAGS: &str = "tags";
const NOTE_LOGS: &str = "note-logs";
const NOTES: &str = "notes";

// ── Properties ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentType {
    #[default]
    StandardComment,
    Question,
    Answer,
    Suggestion,
    UsageExperience,
    Requirement,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StarRating {
    NoRecommendation,
    OneStar,
    TwoStars,
    ThreeStars,
    FourStars,
    FiveStars,
}

impl StarRating {
    /// `0..=5` stars; anything above five is capped.
    pub fn from_stars(stars: u8) -> Self {
        match stars {
            0 => Self::NoRecommendation,
            1 => Self::OneStar,
            2 => Self::TwoStars,
            3 => Self::ThreeStars,
            4 => Self::FourStars,
            _ => Self::FiveStars,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "CommentProperties", rename_all = "camelCase")]
pub struct CommentProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,
    pub comment_text: String,
    pub comment_type: CommentType,
}

impl CommentProperties {
    pub fn new(text: impl Into<String>, comment_type: CommentType) -> Self {
        Self { qualified_name: None, comment_text: text.into(), comment_type }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "LikeProperties", rename_all = "camelCase")]
pub struct LikeProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename = "RatingProperties", rename_all = "camelCase")]
pub struct RatingProperties {
    pub star_rating: StarRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "InformalTagProperties", rename_all = "camelCase")]
pub struct InformalTagProperties {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_private_tag: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "NoteLogProperties", rename_all = "camelCase")]
pub struct NoteLogProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(tag = "class", rename = "NoteProperties", rename_all = "camelCase")]
pub struct NoteProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
}

// ── Request bodies ──────────────────────────────────────────────────────────

/// Body for feedback attached to an existing element.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename = "NewAttachmentRequestBody", rename_all = "camelCase")]
pub struct AttachmentRequest<P> {
    pub properties: P,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_time: Option<DateTime<Utc>>,
}

impl<P> AttachmentRequest<P> {
    pub fn new(properties: P) -> Self {
        Self { properties, effective_time: None }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "class", rename = "InformalTagUpdateRequestBody", rename_all = "camelCase")]
struct TagUpdateRequest<'a> {
    description: &'a str,
}

fn visibility(is_public: bool) -> [(&'static str, String); 1] {
    [("isPublic", is_public.to_string())]
}

// ── Manager ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FeedbackManager {
    view: ViewService,
}

impl FeedbackManager {
    pub fn new(client: ServerClient) -> Self {
        Self { view: ViewService::new(client, URL_MARKER) }
    }

    pub fn client(&self) -> &ServerClient {
        self.view.client()
    }

    // ── Comments ──────────────────────────────────────────────────────────

    pub async fn add_comment_to_element(&self, element_guid: &str, comment: CommentProperties, is_public: bool) -> Result<String> {
        validate_guid("element_guid", element_guid)?;
        validate_name("comment_text", &comment.comment_text)?;
        self.view
            .post_for_guid(&[ELEMENTS, element_guid, COMMENTS], &visibility(is_public), &AttachmentRequest::new(comment))
            .await
    }

    pub async fn add_comment_reply(&self, comment_guid: &str, reply: CommentProperties, is_public: bool) -> Result<String> {
        validate_guid("comment_guid", comment_guid)?;
        validate_name("comment_text", &reply.comment_text)?;
        self.view
            .post_for_guid(&[COMMENTS, comment_guid, "replies"], &visibility(is_public), &AttachmentRequest::new(reply))
            .await
    }

    pub async fn update_comment(&self, comment_guid: &str, request: &UpdateElementRequest<CommentProperties>, is_public: bool) -> Result<()> {
        validate_guid("comment_guid", comment_guid)?;
        self.view
            .post_void(&[COMMENTS, comment_guid, "update"], &visibility(is_public), request)
            .await
    }

    pub async fn remove_comment(&self, comment_guid: &str) -> Result<()> {
        validate_guid("comment_guid", comment_guid)?;
        self.view
            .post_void(&[COMMENTS, comment_guid, "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn get_comment(&self, comment_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(COMMENTS, comment_guid, &GetRequest::default()).await
    }

    pub async fn get_attached_comments(&self, element_guid: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .list(&[ELEMENTS, element_guid, COMMENTS, "retrieve"], page, &GetRequest::default())
            .await
    }

    pub async fn find_comments(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(COMMENTS, options).await
    }

    /// Mark `answer_comment_guid` as the accepted answer to a question comment.
    pub async fn setup_accepted_answer(&self, question_comment_guid: &str, answer_comment_guid: &str, is_public: bool) -> Result<()> {
        validate_guid("question_comment_guid", question_comment_guid)?;
        validate_guid("answer_comment_guid", answer_comment_guid)?;
        self.view
            .post_void(
                &[COMMENTS, "questions", question_comment_guid, "answers", answer_comment_guid],
                &visibility(is_public),
                &NewRelationshipRequest::default(),
            )
            .await
    }

    pub async fn clear_accepted_answer(&self, question_comment_guid: &str, answer_comment_guid: &str) -> Result<()> {
        validate_guid("question_comment_guid", question_comment_guid)?;
        validate_guid("answer_comment_guid", answer_comment_guid)?;
        self.view
            .post_void(
                &[COMMENTS, "questions", question_comment_guid, "answers", answer_comment_guid, "remove"],
                &[],
                &DeleteRequest::default(),
            )
            .await
    }

    // ── Likes ─────────────────────────────────────────────────────────────

    pub async fn add_like_to_element(&self, element_guid: &str, like: LikeProperties, is_public: bool) -> Result<()> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .post_void(&[ELEMENTS, element_guid, "likes"], &visibility(is_public), &AttachmentRequest::new(like))
            .await
    }

    /// Remove the calling user's like.
    pub async fn remove_like_from_element(&self, element_guid: &str) -> Result<()> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .post_void(&[ELEMENTS, element_guid, "likes", "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn get_attached_likes(&self, element_guid: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .list(&[ELEMENTS, element_guid, "likes", "retrieve"], page, &GetRequest::default())
            .await
    }

    // ── Ratings ───────────────────────────────────────────────────────────

    /// Add or replace the calling user's rating.
    pub async fn add_rating_to_element(&self, element_guid: &str, rating: RatingProperties, is_public: bool) -> Result<()> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .post_void(&[ELEMENTS, element_guid, "ratings"], &visibility(is_public), &AttachmentRequest::new(rating))
            .await
    }

    pub async fn remove_rating_from_element(&self, element_guid: &str) -> Result<()> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .post_void(&[ELEMENTS, element_guid, "ratings", "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn get_attached_ratings(&self, element_guid: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .list(&[ELEMENTS, element_guid, "ratings", "retrieve"], page, &GetRequest::default())
            .await
    }

    // ── Informal tags ─────────────────────────────────────────────────────

    pub async fn create_informal_tag(&self, tag: InformalTagProperties) -> Result<String> {
        validate_name("display_name", &tag.display_name)?;
        self.view.post_for_guid(&[TAGS], &[], &tag).await
    }

    pub async fn update_tag_description(&self, tag_guid: &str, description: &str) -> Result<()> {
        validate_guid("tag_guid", tag_guid)?;
        self.view
            .post_void(&[TAGS, tag_guid, "update"], &[], &TagUpdateRequest { description })
            .await
    }

    pub async fn delete_tag(&self, tag_guid: &str) -> Result<()> {
        validate_guid("tag_guid", tag_guid)?;
        self.view
            .post_void(&[TAGS, tag_guid, "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn find_tags(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(TAGS, options).await
    }

    pub async fn get_tags_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(TAGS, name, page).await
    }

    pub async fn get_tag(&self, tag_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(TAGS, tag_guid, &GetRequest::default()).await
    }

    pub async fn add_tag_to_element(&self, element_guid: &str, tag_guid: &str, is_public: bool) -> Result<()> {
        validate_guid("element_guid", element_guid)?;
        validate_guid("tag_guid", tag_guid)?;
        self.view
            .post_void(&[ELEMENTS, element_guid, TAGS, tag_guid], &visibility(is_public), &NewRelationshipRequest::default())
            .await
    }

    pub async fn remove_tag_from_element(&self, element_guid: &str, tag_guid: &str) -> Result<()> {
        validate_guid("element_guid", element_guid)?;
        validate_guid("tag_guid", tag_guid)?;
        self.view
            .post_void(&[ELEMENTS, element_guid, TAGS, tag_guid, "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn get_elements_by_tag(&self, tag_guid: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_guid("tag_guid", tag_guid)?;
        self.view
            .list(&[ELEMENTS, "by-tag", tag_guid, "retrieve"], page, &GetRequest::default())
            .await
    }

    // ── Note logs ─────────────────────────────────────────────────────────

    pub async fn create_note_log(&self, element_guid: &str, note_log: NoteLogProperties, is_public: bool) -> Result<String> {
        validate_guid("element_guid", element_guid)?;
        validate_name("qualified_name", &note_log.qualified_name)?;
        self.view
            .post_for_guid(&[ELEMENTS, element_guid, NOTE_LOGS], &visibility(is_public), &AttachmentRequest::new(note_log))
            .await
    }

    pub async fn update_note_log(&self, note_log_guid: &str, request: &UpdateElementRequest<NoteLogProperties>) -> Result<()> {
        self.view.update_element(NOTE_LOGS, note_log_guid, request).await
    }

    pub async fn remove_note_log(&self, note_log_guid: &str) -> Result<()> {
        validate_guid("note_log_guid", note_log_guid)?;
        self.view
            .post_void(&[NOTE_LOGS, note_log_guid, "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn find_note_logs(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(NOTE_LOGS, options).await
    }

    pub async fn get_note_logs_by_name(&self, name: &str, page: PageOptions) -> Result<Vec<Value>> {
        self.view.elements_by_name(NOTE_LOGS, name, page).await
    }

    pub async fn get_note_log_by_guid(&self, note_log_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(NOTE_LOGS, note_log_guid, &GetRequest::default()).await
    }

    pub async fn get_note_logs_for_element(&self, element_guid: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_guid("element_guid", element_guid)?;
        self.view
            .list(&[ELEMENTS, element_guid, NOTE_LOGS, "retrieve"], page, &GetRequest::default())
            .await
    }

    // ── Notes ─────────────────────────────────────────────────────────────

    pub async fn create_note(&self, note_log_guid: &str, note: NoteProperties) -> Result<String> {
        validate_guid("note_log_guid", note_log_guid)?;
        validate_name("text", &note.text)?;
        self.view
            .post_for_guid(&[NOTE_LOGS, note_log_guid, NOTES], &[], &AttachmentRequest::new(note))
            .await
    }

    pub async fn update_note(&self, note_guid: &str, request: &UpdateElementRequest<NoteProperties>) -> Result<()> {
        self.view.update_element(NOTES, note_guid, request).await
    }

    pub async fn remove_note(&self, note_guid: &str) -> Result<()> {
        validate_guid("note_guid", note_guid)?;
        self.view
            .post_void(&[NOTES, note_guid, "remove"], &[], &DeleteRequest::default())
            .await
    }

    pub async fn get_note_by_guid(&self, note_guid: &str) -> Result<Option<Value>> {
        self.view.get_element(NOTES, note_guid, &GetRequest::default()).await
    }

    pub async fn get_notes_for_note_log(&self, note_log_guid: &str, page: PageOptions) -> Result<Vec<Value>> {
        validate_guid("note_log_guid", note_log_guid)?;
        self.view
            .list(&[NOTE_LOGS, note_log_guid, NOTES, "retrieve"], page, &GetRequest::default())
            .await
    }

    pub async fn find_notes(&self, options: &SearchOptions) -> Result<Vec<Value>> {
        self.view.find_elements(NOTES, options).await
    }
}
