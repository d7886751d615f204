//! Summary prompt builder
//!
//! Renders grouped news into the Markdown prompt handed to the downstream
//! completion API. The API client itself lives outside this workspace;
//! this module only shapes its input.

use chrono::{DateTime, Utc};

use radar_core::NewsGroup;

const MAX_GROUPS: usize = 10;
const MAX_HEADLINES_PER_GROUP: usize = 3;

/// Build the daily-summary prompt from keyword groups
///
/// At most ten groups, three headlines each, source name and optional URL
/// per line.
pub fn build_summary_prompt(groups: &[NewsGroup], generated_at: DateTime<Utc>) -> String {
    let mut prompt = String::from(
        "Generate a daily digest from the trending news below. \
         Summarize each keyword group in one or two sentences, \
         then list the related links.\n\n",
    );
    prompt.push_str(&format!(
        "Generated at: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));

    for group in groups.iter().take(MAX_GROUPS) {
        prompt.push_str(&format!("## {} ({} items)\n", group.key, group.count));
        for item in group.items.iter().take(MAX_HEADLINES_PER_GROUP) {
            prompt.push_str(&format!("- {} ({})", item.title, item.source_name));
            if let Some(url) = &item.url {
                prompt.push_str(&format!(" {url}"));
            }
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("Keep the digest concise and lead with what matters.\n");
    prompt
}
