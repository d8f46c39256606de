use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use lms_db::models::leaving_cert::{
    CreateLeavingCert, LeavingCert, LeavingCertFilter, UpdateLeavingCert,
};
use lms_db::repositories::LeavingCertRepo;
use lms_db::DbPool;

use super::{found, ServiceResult};

pub const LEAVING_CERT: &str = "leaving certificate";

pub struct LeavingCertService<'a> {
    pool: &'a DbPool,
}

impl<'a> LeavingCertService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateLeavingCert) -> ServiceResult<LeavingCert> {
        Ok(LeavingCertRepo::create(self.pool, input).await?)
    }

    pub async fn list(
        &self,
        filter: &LeavingCertFilter,
        page: &PageRequest,
    ) -> ServiceResult<Page<LeavingCert>> {
        Ok(LeavingCertRepo::list(self.pool, filter, page).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> ServiceResult<Option<LeavingCert>> {
        Ok(LeavingCertRepo::find_by_id(self.pool, id).await?)
    }

    pub async fn update(&self, id: DbId, input: &UpdateLeavingCert) -> ServiceResult<LeavingCert> {
        found(LeavingCertRepo::update(self.pool, id, input).await?, LEAVING_CERT, id)
    }

    pub async fn delete(&self, id: DbId) -> ServiceResult<LeavingCert> {
        found(LeavingCertRepo::delete(self.pool, id).await?, LEAVING_CERT, id)
    }
}
