//! Page-by-page retrieval and classification.
//!
//! Pages are fetched strictly in order, one at a time. The first page with no
//! patients ends pagination.

use crate::api::AssessmentApi;
use crate::error::AssessResult;
use crate::patient::PatientRecord;
use crate::scoring::classify::Classification;

pub struct PatientPager<'a, A> {
    api: &'a A,
    next_page: u32,
    finished: bool,
}

impl<'a, A: AssessmentApi> PatientPager<'a, A> {
    pub fn new(api: &'a A) -> Self {
        PatientPager {
            api,
            next_page: 1,
            finished: false,
        }
    }

    /// Number of pages that returned patients so far.
    pub fn pages_fetched(&self) -> u32 {
        self.next_page - 1
    }

    /// Fetches the next page. Returns `Ok(None)` once a page comes back
    /// empty, and on every call after that without touching the API.
    pub async fn next_page(&mut self) -> AssessResult<Option<Vec<PatientRecord>>> {
        if self.finished {
            return Ok(None);
        }

        let page = self.api.fetch_page(self.next_page).await?;
        let info = page.page_info();
        let patients = page.into_patients();

        if patients.is_empty() {
            tracing::info!(page = self.next_page, "empty page, pagination complete");
            self.finished = true;
            return Ok(None);
        }

        match info.and_then(|i| i.total_pages) {
            Some(total_pages) => tracing::info!(
                page = self.next_page,
                total_pages,
                patients = patients.len(),
                "fetched page"
            ),
            None => tracing::info!(page = self.next_page, patients = patients.len(), "fetched page"),
        }

        self.next_page += 1;
        Ok(Some(patients))
    }
}

pub async fn fetch_all_patients<A: AssessmentApi>(api: &A) -> AssessResult<Vec<PatientRecord>> {
    let mut pager = PatientPager::new(api);
    let mut patients = Vec::new();
    while let Some(page) = pager.next_page().await? {
        patients.extend(page);
    }
    Ok(patients)
}

/// Fetches every page and classifies each one as it arrives.
///
/// Any fetch error aborts the run; nothing partial is returned.
pub async fn run_assessment<A: AssessmentApi>(api: &A) -> AssessResult<Classification> {
    let mut pager = PatientPager::new(api);
    let mut classification = Classification::new();
    let mut records = 0usize;

    while let Some(page) = pager.next_page().await? {
        records += page.len();
        classification = classification.with_page(&page);
    }

    tracing::info!(
        pages = pager.pages_fetched(),
        records,
        high_risk = classification.high_risk_patients.len(),
        fever = classification.fever_patients.len(),
        data_quality_issues = classification.data_quality_issues.len(),
        "assessment complete"
    );
    Ok(classification)
}
