use super::GeneratedFile;
use std::path::Path;

/// Tag placed in front of every embedded annotation.
pub const TODO_MARKER: &str = "TODO(flowcast)";

/// Returns the line-comment leader for a file, chosen by its extension.
pub fn comment_leader(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    match extension {
        "py" | "toml" | "txt" | "yaml" | "yml" | "ini" | "cfg" | "env" | "example" | "sh" => {
            Some("#")
        }
        "md" => Some(">"),
        "rs" | "js" | "ts" => Some("//"),
        _ => None,
    }
}

/// The extension of a file whose annotations have no comment syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct UnsupportedExtension(pub(super) String);

/// Renders the final file content: annotation block (if any), then the body
/// with exactly one trailing newline.
pub(super) fn render_content(target: &Path, file: &GeneratedFile) -> Result<String, UnsupportedExtension> {
    let body = file.content().trim_end_matches('\n');
    if file.todos().is_empty() {
        return Ok(format!("{}\n", body));
    }

    let leader = comment_leader(target).ok_or_else(|| {
        UnsupportedExtension(
            target
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_else(|| "<none>".to_string()),
        )
    })?;

    let mut rendered = String::with_capacity(body.len() + 64 * file.todos().len());
    for todo in file.todos() {
        rendered.push_str(&format!("{} {}: {}\n", leader, TODO_MARKER, todo));
    }
    rendered.push('\n');
    rendered.push_str(body);
    rendered.push('\n');
    Ok(rendered)
}
