use crate::message::Message;

/// Flattens an interview history into the `Q:`/`A:` text fed to minutes generation.
///
/// Messages are taken two at a time: the even-indexed one is the question and the
/// following one its answer. A trailing message without a partner (left behind by
/// a failed turn) is dropped rather than treated as an error.
pub fn format_transcript(turns: &[Message]) -> String {
    turns
        .chunks_exact(2)
        .map(|pair| format!("Q: {}\nA: {}\n\n", pair[0].content(), pair[1].content()))
        .collect()
}
