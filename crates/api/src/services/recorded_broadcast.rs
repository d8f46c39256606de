use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use lms_db::models::recorded_broadcast::{
    group_by_chapter, BroadcastLookup, ChapterBroadcasts, CreateRecordedBroadcast,
    RecordedBroadcast, RecordedBroadcastFilter, UpdateRecordedBroadcast,
};
use lms_db::repositories::RecordedBroadcastRepo;
use lms_db::DbPool;

use super::{found, ServiceResult};

pub const RECORDED_BROADCAST: &str = "recorded broadcast";

pub struct RecordedBroadcastService<'a> {
    pool: &'a DbPool,
}

impl<'a> RecordedBroadcastService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateRecordedBroadcast) -> ServiceResult<RecordedBroadcast> {
        Ok(RecordedBroadcastRepo::create(self.pool, input).await?)
    }

    pub async fn list(
        &self,
        filter: &RecordedBroadcastFilter,
        page: &PageRequest,
    ) -> ServiceResult<Page<RecordedBroadcast>> {
        Ok(RecordedBroadcastRepo::list(self.pool, filter, page).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> ServiceResult<Option<RecordedBroadcast>> {
        Ok(RecordedBroadcastRepo::find_by_id(self.pool, id).await?)
    }

    pub async fn list_by_class_subject(
        &self,
        class_id: &str,
        subject_id: &str,
    ) -> ServiceResult<Vec<RecordedBroadcast>> {
        Ok(RecordedBroadcastRepo::list_by_class_subject(self.pool, class_id, subject_id).await?)
    }

    /// Broadcasts of a book grouped by chapter, chapters in order of first
    /// appearance.
    pub async fn chapters_for_book(&self, book_id: &str) -> ServiceResult<Vec<ChapterBroadcasts>> {
        let rows = RecordedBroadcastRepo::list_by_book(self.pool, book_id).await?;
        Ok(group_by_chapter(rows))
    }

    pub async fn find_by_composite(
        &self,
        lookup: &BroadcastLookup,
    ) -> ServiceResult<Option<RecordedBroadcast>> {
        Ok(RecordedBroadcastRepo::find_by_lookup(self.pool, lookup).await?)
    }

    pub async fn update(
        &self,
        id: DbId,
        input: &UpdateRecordedBroadcast,
    ) -> ServiceResult<RecordedBroadcast> {
        found(
            RecordedBroadcastRepo::update(self.pool, id, input).await?,
            RECORDED_BROADCAST,
            id,
        )
    }

    pub async fn delete(&self, id: DbId) -> ServiceResult<RecordedBroadcast> {
        found(
            RecordedBroadcastRepo::delete(self.pool, id).await?,
            RECORDED_BROADCAST,
            id,
        )
    }
}
