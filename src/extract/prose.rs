//! Prose-paragraph fallback extraction.
//!
//! Last resort when no structured extractor produced anything for a file
//! match: take the blank-line-delimited paragraph around the match, or search
//! outward (left neighbor before right at equal distance) for nearby prose
//! that looks explanatory. Paragraphs that read like a catalog dump (many
//! other configuration keys) are rejected.

use super::normalize::{count_other_config_tokens, normalize_text};
use super::{ExtractorKind, FileView, MatchContext, RawCandidate, looks_like_heading};

/// How many paragraphs away from the match we are willing to look.
const MAX_PARAGRAPH_RADIUS: usize = 6;
/// A paragraph mentioning more than this many other keys is a catalog dump.
const MAX_OTHER_KEY_MENTIONS: usize = 6;

/// Words that make a nearby paragraph look like configuration discussion
/// rather than incidental narrative.
const EXPLANATORY_MARKERS: &[&str] = &[
    "environment variable",
    "set ",
    "controls",
    "configure",
    "enables",
    "disable",
    "used to",
    "specifies",
];

/// Extract the explanatory paragraph nearest to the match line, if any.
pub fn prose_paragraph(view: &FileView, ctx: &MatchContext<'_>) -> Vec<RawCandidate> {
    let lines = &view.lines;
    let mask = &view.code_mask;

    let paragraphs = split_paragraphs(lines);
    if paragraphs.is_empty() {
        return Vec::new();
    }

    let pidx = paragraphs
        .iter()
        .position(|&(s, e)| s <= ctx.match_line && ctx.match_line <= e)
        .unwrap_or(0);

    let last = paragraphs.len() - 1;
    let max_radius = pidx.max(last - pidx).min(MAX_PARAGRAPH_RADIUS);

    for radius in 0..=max_radius {
        let candidates: Vec<usize> = if radius == 0 {
            vec![pidx]
        } else {
            // Left neighbor before right neighbor at equal distance.
            [pidx.checked_sub(radius), pidx.checked_add(radius)]
                .into_iter()
                .flatten()
                .filter(|&i| i <= last)
                .collect()
        };

        for idx in candidates {
            let (s, e) = paragraphs[idx];
            if mask[s..=e].iter().any(|&m| m) {
                continue;
            }
            let text = lines[s..=e].join("\n");
            let text = text.trim();
            if text.is_empty() || looks_like_heading(text.lines().next().unwrap_or("")) {
                continue;
            }
            // The match paragraph itself must repeat the term; adjacent prose
            // (a match inside code context) must at least look explanatory.
            if radius == 0 && !ctx.matcher.is_match(text) {
                continue;
            }
            if radius > 0 && !is_explanatory(text) {
                continue;
            }
            let desc = normalize_text(text);
            if desc.is_empty() || count_other_config_tokens(&desc, ctx.key) > MAX_OTHER_KEY_MENTIONS {
                continue;
            }
            return vec![RawCandidate {
                text: desc,
                line: s + 1,
                kind: ExtractorKind::Prose,
            }];
        }
    }
    Vec::new()
}

/// Blank-line-delimited paragraphs as (start, end) inclusive line indexes.
fn split_paragraphs(lines: &[String]) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        if i >= lines.len() {
            break;
        }
        let start = i;
        while i < lines.len() && !lines[i].trim().is_empty() {
            i += 1;
        }
        out.push((start, i - 1));
    }
    out
}

fn is_explanatory(text: &str) -> bool {
    let lowered = text.to_lowercase();
    EXPLANATORY_MARKERS.iter().any(|m| lowered.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::DocFormat;
    use crate::matcher::TermMatcher;

    fn fixture(terms: &[&str]) -> (Vec<String>, TermMatcher) {
        let terms: Vec<String> = terms.iter().map(ToString::to_string).collect();
        let matcher = TermMatcher::new(&terms).unwrap();
        (terms, matcher)
    }

    #[test]
    fn match_paragraph_containing_the_term_is_taken() {
        let src = "# Setup\n\nThe `DD_AGENT_HOST` variable controls where traces are sent\nwhen the agent runs on another host.\n";
        let (terms, matcher) = fixture(&["DD_AGENT_HOST"]);
        let ctx = MatchContext {
            key: "DD_AGENT_HOST",
            terms: &terms,
            matcher: &matcher,
            match_line: 2,
        };
        let found = prose_paragraph(&FileView::new(DocFormat::Markdown, src), &ctx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 3);
        assert!(found[0].text.starts_with("The DD_AGENT_HOST variable controls"));
    }

    #[test]
    fn match_inside_code_falls_back_to_adjacent_explanatory_prose() {
        let src = "Set this environment variable to change where traces are sent.\n\n```sh\nexport DD_AGENT_HOST=agent.local\n```\n";
        let (terms, matcher) = fixture(&["DD_AGENT_HOST"]);
        let ctx = MatchContext {
            key: "DD_AGENT_HOST",
            terms: &terms,
            matcher: &matcher,
            match_line: 3,
        };
        let found = prose_paragraph(&FileView::new(DocFormat::Markdown, src), &ctx);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn left_neighbor_is_preferred_over_right_at_equal_distance() {
        let src = "This variable controls the left-hand explanation of the feature.\n\n```sh\nexport DD_AGENT_HOST=x\n```\n\nThis variable controls the right-hand explanation of the feature.\n";
        let (terms, matcher) = fixture(&["DD_AGENT_HOST"]);
        let ctx = MatchContext {
            key: "DD_AGENT_HOST",
            terms: &terms,
            matcher: &matcher,
            match_line: 3,
        };
        let found = prose_paragraph(&FileView::new(DocFormat::Markdown, src), &ctx);
        assert_eq!(found.len(), 1);
        assert!(found[0].text.contains("left-hand"));
    }

    #[test]
    fn catalog_dump_paragraphs_are_rejected() {
        let src = "`DD_AGENT_HOST` with DD_A_X DD_B_X DD_C_X DD_D_X DD_E_X DD_F_X DD_G_X configure everything.\n";
        let (terms, matcher) = fixture(&["DD_AGENT_HOST"]);
        let ctx = MatchContext {
            key: "DD_AGENT_HOST",
            terms: &terms,
            matcher: &matcher,
            match_line: 0,
        };
        assert!(prose_paragraph(&FileView::new(DocFormat::Markdown, src), &ctx).is_empty());
    }
}
