//! Keyword vocabulary and section affinities for each criterion.

use visascreen_core::model::Criterion;

/// Section headers recognized when segmenting a CV, in match priority order.
pub const SECTION_HEADERS: &[&str] = &[
    "education",
    "experience",
    "employment",
    "work experience",
    "skills",
    "publications",
    "awards",
    "honors",
    "achievements",
    "projects",
    "research",
    "leadership",
    "professional activities",
    "languages",
    "certifications",
    "memberships",
    "affiliations",
    "volunteering",
    "references",
    "personal",
];

/// Keywords whose presence in a sentence suggests the criterion.
pub fn keywords(criterion: Criterion) -> &'static [&'static str] {
    match criterion {
        Criterion::Awards => &[
            "award", "prize", "recognition", "honor", "medal", "trophy", "distinction",
            "finalist", "winner", "granted", "received", "presented with", "honored",
            "recognized", "acclaimed", "commended", "achievement",
        ],
        Criterion::Membership => &[
            "member", "association", "society", "organization", "committee", "group",
            "council", "board", "fellow", "consortium", "chapter", "admitted to",
            "invited to", "selected for", "elected to", "exclusive", "prestigious",
            "selective", "by invitation",
        ],
        Criterion::Press => &[
            "featured in", "published in", "mentioned in", "highlighted in", "profiled in",
            "covered by", "cited in", "interviewed by", "press", "media", "news", "article",
            "magazine", "newspaper", "blog", "website", "podcast", "radio", "tv",
        ],
        Criterion::Judging => &[
            "judge", "jury", "reviewer", "evaluator", "panelist", "selection committee",
            "assessment", "evaluation", "review", "judging", "examined", "critiqued",
            "assessed", "selected", "reviewed", "evaluated",
        ],
        Criterion::OriginalContribution => &[
            "pioneered", "invented", "developed", "discovered", "established", "founded",
            "created", "designed", "implemented", "built", "launched", "innovation",
            "breakthrough", "novel", "original", "first", "innovative", "groundbreaking",
            "revolutionary", "transformative", "leading-edge", "cutting-edge", "patent",
        ],
        Criterion::ScholarlyArticles => &[
            "author", "published", "journal", "paper", "article", "publication", "conference",
            "proceedings", "research", "scholar", "academic", "peer-reviewed", "cited",
            "bibliography", "preprint", "manuscript", "co-author", "first author",
        ],
        Criterion::CriticalEmployment => &[
            "key role", "critical role", "essential role", "leading role", "crucial position",
            "vital member", "pivotal", "led", "directed", "managed", "oversaw", "headed",
            "spearheaded", "senior", "executive", "director", "chief", "vp", "c-level",
            "distinguished", "renowned", "eminent", "prominent", "prestigious company",
        ],
        Criterion::HighRemuneration => &[
            "salary", "compensation", "remuneration", "income", "earnings", "wage", "pay",
            "stipend", "bonus", "stock options", "equity", "benefits", "package", "high",
            "substantial", "significant", "above average", "competitive", "premium", "top",
        ],
    }
}

/// Criteria a section header is known to carry evidence for.
pub fn section_criteria(section: &str) -> &'static [Criterion] {
    match section.to_lowercase().as_str() {
        "awards" | "honors" => &[Criterion::Awards],
        "achievements" => &[Criterion::Awards, Criterion::OriginalContribution],
        "publications" => &[Criterion::ScholarlyArticles, Criterion::Press],
        "memberships" | "affiliations" => &[Criterion::Membership],
        "professional activities" => &[Criterion::Judging, Criterion::Membership],
        "research" => &[Criterion::OriginalContribution, Criterion::ScholarlyArticles],
        "projects" => &[Criterion::OriginalContribution],
        "experience" | "employment" | "work experience" => {
            &[Criterion::CriticalEmployment, Criterion::HighRemuneration]
        }
        _ => &[],
    }
}

/// Whether `phrase` occurs in `text` on word boundaries, ignoring case.
///
/// `text` must already be lowercase.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return false;
    }

    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut from = 0;
    while let Some(pos) = text[from..].find(&phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word(c));
        let after_ok = text[end..].chars().next().map_or(true, |c| !is_word(c));
        if before_ok && after_ok {
            return true;
        }
        // Advance by one character to retry overlapping positions.
        from = start + text[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Number of distinct keywords for `criterion` found in `sentence`.
pub fn keyword_hits(criterion: Criterion, sentence: &str) -> usize {
    let lowered = sentence.to_lowercase();
    keywords(criterion)
        .iter()
        .filter(|k| contains_phrase(&lowered, k))
        .count()
}
