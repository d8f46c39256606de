use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use lms_db::models::presentator::{
    CreatePresentator, Presentator, PresentatorFilter, UpdatePresentator,
};
use lms_db::repositories::PresentatorRepo;
use lms_db::DbPool;

use super::{found, ServiceResult};

pub const PRESENTATOR: &str = "presentator";

pub struct PresentatorService<'a> {
    pool: &'a DbPool,
}

impl<'a> PresentatorService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreatePresentator) -> ServiceResult<Presentator> {
        Ok(PresentatorRepo::create(self.pool, input).await?)
    }

    pub async fn list(
        &self,
        filter: &PresentatorFilter,
        page: &PageRequest,
    ) -> ServiceResult<Page<Presentator>> {
        Ok(PresentatorRepo::list(self.pool, filter, page).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> ServiceResult<Option<Presentator>> {
        Ok(PresentatorRepo::find_by_id(self.pool, id).await?)
    }

    pub async fn update(&self, id: DbId, input: &UpdatePresentator) -> ServiceResult<Presentator> {
        found(PresentatorRepo::update(self.pool, id, input).await?, PRESENTATOR, id)
    }

    pub async fn delete(&self, id: DbId) -> ServiceResult<Presentator> {
        found(PresentatorRepo::delete(self.pool, id).await?, PRESENTATOR, id)
    }
}
