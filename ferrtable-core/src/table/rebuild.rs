use snafu::OptionExt;
use tracing::*;

use crate::{
    analysis::bbox::Bbox,
    consts::{BOLD_CLOSE, BOLD_OPEN},
    error::{FerrtableError, MissingTextSnafu},
    layout::element::{RecognizedText, TableHtml, TableStructure, is_cell_close},
    table::matcher::{MatchMap, match_cells},
};

/// Matches text boxes to cells and interleaves the recognized texts into the
/// structure tokens.
///
/// `text_boxes` and `texts` must be in the same (reading) order. The
/// structure is expected to hold one cell box per cell-closing token; a
/// mismatch is logged and otherwise left to the caller.
pub fn rebuild_table(
    structure: &TableStructure,
    text_boxes: &[Bbox],
    texts: &[RecognizedText],
) -> Result<TableHtml, FerrtableError> {
    let closing = structure.cell_close_count();
    if closing != structure.cells.len() {
        warn!(
            "structure has {} cell-closing tokens but {} cell boxes",
            closing,
            structure.cells.len()
        );
    }

    let matched = match_cells(text_boxes, &structure.cells)?;

    rebuild_html(&structure.tokens, &matched, texts)
}

/// Re-emits the structure tokens with the matched texts injected before each
/// cell-closing token.
///
/// A cell with one text gets it verbatim. A cell with several has each
/// fragment cleaned up and space-separated, and is wrapped in a single bold
/// pair when any fragment carries a bold marker.
pub fn rebuild_html(
    tokens: &[String],
    matched: &MatchMap,
    texts: &[RecognizedText],
) -> Result<TableHtml, FerrtableError> {
    let mut out = Vec::with_capacity(tokens.len() + texts.len());
    let mut ordinal = 0;

    for token in tokens {
        if !is_cell_close(token) {
            out.push(token.clone());
            continue;
        }

        if let Some(indices) = matched.get(ordinal) {
            let contents = indices
                .iter()
                .map(|&index| {
                    texts
                        .get(index)
                        .map(|t| t.text.as_str())
                        .context(MissingTextSnafu {
                            index,
                            available: texts.len(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            push_cell_contents(&mut out, &contents);
        }

        out.push(token.clone());
        ordinal += 1;
    }

    if ordinal < matched.cell_count() {
        debug!(
            "{} of {} matched cells have no cell-closing token",
            matched.cell_count() - ordinal,
            matched.cell_count()
        );
    }

    Ok(TableHtml {
        html: out.concat(),
        tokens: out,
    })
}

fn push_cell_contents(out: &mut Vec<String>, contents: &[&str]) {
    if let [single] = contents {
        out.push(single.to_string());
        return;
    }

    let bold = contents.iter().any(|c| c.contains(BOLD_OPEN));
    if bold {
        out.push(BOLD_OPEN.to_string());
    }

    let last = contents.len() - 1;
    for (i, content) in contents.iter().enumerate() {
        let Some(fragment) = clean_fragment(content) else {
            continue;
        };

        let mut fragment = fragment.to_string();
        if i != last && !fragment.ends_with(' ') {
            fragment.push(' ');
        }
        out.push(fragment);
    }

    if bold {
        out.push(BOLD_CLOSE.to_string());
    }
}

/// Strips one leading space and the bold markers from a fragment of a
/// multi-text cell. `None` when nothing is left.
fn clean_fragment(content: &str) -> Option<&str> {
    if content.is_empty() {
        return None;
    }

    let content = content.strip_prefix(' ').unwrap_or(content);
    let content = content.strip_prefix(BOLD_OPEN).unwrap_or(content);
    let content = content.strip_suffix(BOLD_CLOSE).unwrap_or(content);

    (!content.is_empty()).then_some(content)
}
