use anyhow::{Context, Result};
use minutes_core::Prompts;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Reads the prompt overrides in `dir_path`: one entry per `.md` file, keyed by
/// file stem, in name order. Files that are empty or whitespace-only are
/// skipped with a warning so they cannot blank out a built-in prompt.
pub fn load_prompts(dir_path: &Path) -> Result<BTreeMap<String, String>> {
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read prompts directory: {}", dir_path.display()))?;

    let mut prompts = BTreeMap::new();
    for entry in entries {
        let path = entry?.path();
        let is_markdown = path.extension().is_some_and(|ext| ext == "md");
        if !path.is_file() || !is_markdown {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("Prompt file name is not valid UTF-8: {}", path.display()))?
            .to_string();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;

        if content.trim().is_empty() {
            tracing::warn!("Skipping empty prompt file: {}", path.display());
            continue;
        }
        prompts.insert(key, content);
    }

    Ok(prompts)
}

/// Builds the prompt set for this process: the built-in texts, with
/// `interview.md`, `minutes.md` and `minutes_request.md` from `dir` replacing
/// them when present.
pub fn resolve_prompts(dir: Option<&Path>) -> Result<Prompts> {
    let mut prompts = Prompts::default();
    let Some(dir) = dir else {
        return Ok(prompts);
    };

    for (key, content) in load_prompts(dir)? {
        match key.as_str() {
            "interview" => prompts.interview = content,
            "minutes" => prompts.minutes = content,
            "minutes_request" => {
                if !content.contains("{interview_history}") {
                    tracing::warn!(
                        "minutes_request.md has no {{interview_history}} placeholder; the transcript will not be sent"
                    );
                }
                prompts.minutes_request = content;
            }
            other => tracing::warn!("Ignoring unknown prompt file: {other}.md"),
        }
    }

    Ok(prompts)
}
