use serde::Deserialize;

/// Lifecycle state of a merge request as reported by GitLab.
///
/// A state outside this set fails the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    Opened,
    Closed,
    Merged,
    Locked,
}

/// One record from `GET /merge_requests`, reduced to the fields the notes
/// are built from. Unknown fields in the payload are ignored; missing
/// required fields reject the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub title: String,
    #[allow(dead_code)]
    pub description: Option<String>,
    pub user_notes_count: u32,
    pub source_branch: String,
    #[allow(dead_code)]
    pub state: MergeRequestState,
    pub web_url: String,
    pub detailed_merge_status: String,
    pub project_id: u64,
    pub draft: bool,
}
