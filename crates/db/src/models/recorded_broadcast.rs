//! Recorded broadcast model and DTOs.
//!
//! A recorded broadcast is a lecture video tagged with the curriculum
//! coordinates it belongs to (board, medium, class, subject, book, chapter)
//! plus two poster images. All coordinates are opaque reference ids.

use lms_core::error::CoreError;
use lms_core::pagination::{PageRequest, SortFields};
use lms_core::types::{DbId, Timestamp};
use lms_core::validation::{empty_update, not_blank, reference_id};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Fields accepted by `sortBy` on the recorded broadcast list endpoint.
pub const RECORDED_BROADCAST_SORT_FIELDS: SortFields = &[
    ("id", "id"),
    ("title", "title"),
    ("date", "broadcast_date"),
    ("presenterName", "presenter_name"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `recorded_broadcasts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordedBroadcast {
    #[schema(value_type = i64)]
    pub id: DbId,
    pub board_id: String,
    pub medium_id: String,
    pub class_id: String,
    pub subject_id: String,
    pub book_id: String,
    pub chapter_id: String,
    pub studio: String,
    pub live_streaming_path: String,
    #[serde(rename = "date")]
    pub broadcast_date: String,
    #[serde(rename = "time")]
    pub broadcast_time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub broadcast_type: String,
    pub presenter_name: String,
    pub landscape_image: String,
    pub portrait_image: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

/// Broadcasts of one chapter, as returned by the per-book grouping.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChapterBroadcasts {
    pub chapter_id: String,
    pub recorded_broadcasts: Vec<RecordedBroadcast>,
}

/// Group broadcasts by `chapter_id`, keeping chapters in order of first
/// appearance and broadcasts in their input order.
pub fn group_by_chapter(broadcasts: Vec<RecordedBroadcast>) -> Vec<ChapterBroadcasts> {
    let mut groups: Vec<ChapterBroadcasts> = Vec::new();
    for broadcast in broadcasts {
        match groups
            .iter_mut()
            .find(|g| g.chapter_id == broadcast.chapter_id)
        {
            Some(group) => group.recorded_broadcasts.push(broadcast),
            None => groups.push(ChapterBroadcasts {
                chapter_id: broadcast.chapter_id.clone(),
                recorded_broadcasts: vec![broadcast],
            }),
        }
    }
    groups
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a recorded broadcast.
///
/// The two image URLs are filled by the upload step, never by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateRecordedBroadcast {
    #[validate(custom(function = "reference_id"))]
    pub board_id: String,
    #[validate(custom(function = "reference_id"))]
    pub medium_id: String,
    #[validate(custom(function = "reference_id"))]
    pub class_id: String,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: String,
    #[validate(custom(function = "reference_id"))]
    pub book_id: String,
    #[validate(custom(function = "reference_id"))]
    pub chapter_id: String,
    #[validate(custom(function = "not_blank"))]
    pub studio: String,
    #[validate(custom(function = "not_blank"))]
    pub live_streaming_path: String,
    #[serde(rename = "date")]
    #[validate(custom(function = "not_blank"))]
    pub broadcast_date: String,
    #[serde(rename = "time")]
    #[validate(custom(function = "not_blank"))]
    pub broadcast_time: String,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub broadcast_type: String,
    #[validate(custom(function = "not_blank"))]
    pub presenter_name: String,
    #[serde(skip_deserializing)]
    #[validate(custom(function = "not_blank"))]
    pub landscape_image: String,
    #[serde(skip_deserializing)]
    #[validate(custom(function = "not_blank"))]
    pub portrait_image: String,
}

/// DTO for partially updating a recorded broadcast.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_recorded_broadcast"))]
pub struct UpdateRecordedBroadcast {
    #[validate(custom(function = "reference_id"))]
    pub board_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub medium_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub class_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub book_id: Option<String>,
    #[validate(custom(function = "reference_id"))]
    pub chapter_id: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub studio: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub live_streaming_path: Option<String>,
    #[serde(rename = "date")]
    #[validate(custom(function = "not_blank"))]
    pub broadcast_date: Option<String>,
    #[serde(rename = "time")]
    #[validate(custom(function = "not_blank"))]
    pub broadcast_time: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub title: Option<String>,
    #[serde(rename = "type")]
    #[validate(custom(function = "not_blank"))]
    pub broadcast_type: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub presenter_name: Option<String>,
    #[serde(skip_deserializing)]
    pub landscape_image: Option<String>,
    #[serde(skip_deserializing)]
    pub portrait_image: Option<String>,
}

impl UpdateRecordedBroadcast {
    fn is_empty(&self) -> bool {
        [
            &self.board_id,
            &self.medium_id,
            &self.class_id,
            &self.subject_id,
            &self.book_id,
            &self.chapter_id,
            &self.studio,
            &self.live_streaming_path,
            &self.broadcast_date,
            &self.broadcast_time,
            &self.title,
            &self.broadcast_type,
            &self.presenter_name,
            &self.landscape_image,
            &self.portrait_image,
        ]
        .iter()
        .all(|field| field.is_none())
    }
}

fn validate_update_recorded_broadcast(
    dto: &UpdateRecordedBroadcast,
) -> Result<(), ValidationError> {
    if dto.is_empty() {
        return Err(empty_update());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Lookups and listing
// ---------------------------------------------------------------------------

/// Path parameters for `/filter/{class_id}/{subject_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClassSubjectLookup {
    #[validate(custom(function = "reference_id"))]
    pub class_id: String,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: String,
}

/// Path parameter for `/getrecordedvideo/{book_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookChaptersLookup {
    #[validate(custom(function = "reference_id"))]
    pub book_id: String,
}

/// Six-field composite filter locating a single broadcast.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BroadcastLookup {
    #[validate(custom(function = "reference_id"))]
    pub board_id: String,
    #[validate(custom(function = "reference_id"))]
    pub class_id: String,
    #[validate(custom(function = "reference_id"))]
    pub subject_id: String,
    #[validate(custom(function = "reference_id"))]
    pub medium_id: String,
    #[validate(custom(function = "reference_id"))]
    pub chapter_id: String,
    #[validate(custom(function = "reference_id"))]
    pub book_id: String,
}

/// Exact-match filter for listing recorded broadcasts.
#[derive(Debug, Clone, Default)]
pub struct RecordedBroadcastFilter {
    pub title: Option<String>,
}

/// Query parameters for `GET /recordedbroadcast`.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct RecordedBroadcastListParams {
    pub title: Option<String>,
    pub sort_by: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub limit: Option<i64>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: Option<i64>,
}

impl RecordedBroadcastListParams {
    pub fn filter(&self) -> RecordedBroadcastFilter {
        RecordedBroadcastFilter {
            title: self.title.clone(),
        }
    }

    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(
            self.sort_by.as_deref(),
            self.limit,
            self.page,
            RECORDED_BROADCAST_SORT_FIELDS,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn broadcast(id: DbId, chapter_id: &str) -> RecordedBroadcast {
        let now = Utc::now();
        RecordedBroadcast {
            id,
            board_id: "cbse".into(),
            medium_id: "english".into(),
            class_id: "class-10".into(),
            subject_id: "physics".into(),
            book_id: "book-1".into(),
            chapter_id: chapter_id.into(),
            studio: "studio-a".into(),
            live_streaming_path: "rtmp://example.com/live/stream".into(),
            broadcast_date: "2023-01-01".into(),
            broadcast_time: "12:00 PM".into(),
            title: format!("Lecture {id}"),
            broadcast_type: "lecture".into(),
            presenter_name: "Anil Sharma".into(),
            landscape_image: "https://cdn.example.com/l.jpg".into(),
            portrait_image: "https://cdn.example.com/p.jpg".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn group_by_chapter_keeps_first_appearance_order() {
        let groups = group_by_chapter(vec![
            broadcast(1, "ch-2"),
            broadcast(2, "ch-1"),
            broadcast(3, "ch-2"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].chapter_id, "ch-2");
        let ids: Vec<DbId> = groups[0].recorded_broadcasts.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(groups[1].chapter_id, "ch-1");
    }

    #[test]
    fn group_by_chapter_of_nothing_is_empty() {
        assert!(group_by_chapter(Vec::new()).is_empty());
    }

    #[test]
    fn serializes_renamed_fields() {
        let json = serde_json::to_value(broadcast(9, "ch-1")).unwrap();
        assert_eq!(json["type"], "lecture");
        assert_eq!(json["date"], "2023-01-01");
        assert_eq!(json["time"], "12:00 PM");
        assert_eq!(json["liveStreamingPath"], "rtmp://example.com/live/stream");
        assert!(json.get("broadcastType").is_none());
    }
}
