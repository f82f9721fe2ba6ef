/// Compute effective page size with precedence: local arg -> config -> 1.
#[must_use]
pub fn effective_page_size(local: Option<usize>, configured: usize) -> usize {
    local.unwrap_or(configured).max(1)
}
