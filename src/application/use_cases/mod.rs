pub mod connection_details;
pub mod draft_editor;
pub mod endpoint_draft;
pub mod line_diff;
pub mod session;
pub mod spec_detail;
pub mod spec_draft;
pub mod test_cases;
pub mod traffic;
pub mod translation;

#[cfg(test)]
pub mod fake_api;
