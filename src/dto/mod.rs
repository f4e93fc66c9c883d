pub mod application_dto;
pub mod job_dto;

/// Resolves `page`/`per_page` query values into a clamped (page, per_page, offset).
pub fn paginate(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page, (page - 1) * per_page)
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    ((total as f64) / (per_page as f64)).ceil() as i64
}
