//! Card HTML fragments.
//!
//! Two layouts are in use. Compact templates render a single `.q` line
//! whose `?` is replaced by the bolded answer on the back. Worked-answer
//! templates render a `#question` block and append an `#answer` block on
//! the back.

use crate::template::Side;

/// Compact layout: `<div class="q">{prompt} = ?</div>` on the front and
/// `<div class="q">{prompt} = <b>{answer}</b></div>` on the back.
#[must_use]
pub fn inline_card(side: Side, prompt: &str, answer: &str) -> String {
    match side {
        Side::Front => format!(r#"<div class="q">{prompt} = ?</div>"#),
        Side::Back => format!(r#"<div class="q">{prompt} = <b>{answer}</b></div>"#),
    }
}

/// Worked-answer layout: the question block, followed on the back by a
/// rule and the answer block.
#[must_use]
pub fn question_card(side: Side, question: &str, answer: &str) -> String {
    let front = format!(r#"<div id="question">{question}</div>"#);
    match side {
        Side::Front => front,
        Side::Back => format!(r#"{front}<hr><div id="answer">{answer}</div>"#),
    }
}
