use crate::gitlab::merge_request::MergeRequest;

/// Render one merge request as a markdown block quote:
///
/// ```text
/// >{title} \n {footer} \n\n
/// ```
///
/// where the footer joins link, branch, comment count and merge status with
/// `" | "`. The trailing spaces before each newline are markdown line breaks
/// and part of the format. The title goes in verbatim; markdown characters
/// in it are not escaped.
pub fn note_block(mr: &MergeRequest) -> String {
    let footer = [
        format!("[View]({})", mr.web_url),
        format!("`{}`", mr.source_branch),
        format!("💭 {}", mr.user_notes_count),
        format!("({})", mr.detailed_merge_status),
    ];
    format!(">{} \n {} \n\n", mr.title, footer.join(" | "))
}
