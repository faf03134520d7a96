//! Legacy filter translation into engine query syntax.
//!
//! Older search pages linked to the results page with a family of
//! query-string filter parameters (`allq`, `exctq`, `fqocct`, ...). Those
//! links still arrive, so the connector translates them once at session
//! bootstrap into the engine's basic syntax (implicit terms, `OR`, quoted
//! phrases, `NOT (...)`) and field-qualified syntax (`@field=value`,
//! `@field>value`, `@field==(a,b)`).
//!
//! Translation is a pure function over the parsed URL parameters. Every
//! unrecognized key or value degrades to "no contribution"; no branch
//! errors. Each parameter contributes to exactly one of the two output
//! strings — `fqocct` moves the free-text contribution into a
//! field-qualified clause and clears the free text.

use crate::params::ParamMap;

/// Query-string keys whose presence triggers legacy translation.
///
/// `sort` is recognized once translation runs but does not trigger it on
/// its own.
pub const LEGACY_TRIGGER_KEYS: &[&str] = &[
    "allq", "exctq", "anyq", "noneq", "fqupdate", "dmn", "fqocct", "elctn_cat", "filetype",
    "site",
];

/// The two query-syntax strings a set of legacy filters translates to,
/// plus the sort request that rides along with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedQuery {
    /// Basic-syntax query for the search box.
    pub free_text: String,
    /// Field-qualified query dispatched as the advanced query expression.
    /// Empty when no filter produced a field clause.
    pub advanced: String,
    /// Whether a date-descending sort criterion should be registered.
    pub sort_by_date: bool,
}

/// Whether any trigger key is present with a non-empty value.
pub fn has_legacy_filters(params: &ParamMap) -> bool {
    LEGACY_TRIGGER_KEYS
        .iter()
        .any(|key| params.non_empty(key).is_some())
}

/// Translate legacy filter parameters into engine query syntax.
///
/// Returns `None` when no trigger key is present — the caller must not
/// submit anything in that case. Otherwise applies the legacy rules in
/// their fixed order (later rules can reassign earlier free-text
/// contributions):
///
/// 1. `allq` sets the base free-text string.
/// 2. `exctq`, `anyq`, `noneq` accumulate phrase / any-of / negated
///    clauses, which are joined and appended to the base.
/// 3. `fqocct` of `title_t` / `url_t` moves the whole free-text string
///    into `@title=` / `@uri=` and clears it.
/// 4. `fqupdate`, `dmn`, `elctn_cat`, `filetype`, `site` append
///    field-qualified clauses for their recognized values.
///
/// # Examples
///
/// ```
/// use gc_search_connector::{translate_legacy_filters, ParamMap};
///
/// let params = ParamMap::parse("allq=ottawa+weather&dmn=example.ca");
/// let query = translate_legacy_filters(&params).expect("filters present");
/// assert_eq!(query.free_text, "ottawa weather");
/// assert_eq!(query.advanced, "@hostname=\"example.ca\"");
/// ```
pub fn translate_legacy_filters(params: &ParamMap) -> Option<TranslatedQuery> {
    if !has_legacy_filters(params) {
        return None;
    }

    let mut free_text = params.non_empty("allq").map(spaced).unwrap_or_default();

    let mut clauses: Vec<String> = Vec::new();
    if let Some(value) = params.non_empty("exctq") {
        clauses.push(format!("\"{}\"", spaced(value)));
    }
    if let Some(value) = params.non_empty("anyq") {
        clauses.push(spaced(value).replace(' ', " OR "));
    }
    if let Some(value) = params.non_empty("noneq") {
        clauses.push(format!("NOT ({})", spaced(value).replace(' ', ") NOT(")));
    }
    free_text = join_clauses(free_text, clauses);

    let mut advanced: Vec<String> = Vec::new();
    match params.non_empty("fqocct") {
        Some("title_t") => {
            advanced.push(format!("@title={free_text}"));
            free_text.clear();
        }
        Some("url_t") => {
            advanced.push(format!("@uri={free_text}"));
            free_text.clear();
        }
        _ => {}
    }

    if let Some(value) = params.non_empty("fqupdate") {
        if let Some(clause) = date_window_clause(&value.to_lowercase()) {
            advanced.push(clause.to_string());
        }
    }
    if let Some(value) = params.non_empty("dmn") {
        advanced.push(format!("@hostname=\"{value}\""));
    }
    if let Some(value) = params.non_empty("elctn_cat") {
        if let Some(clause) = election_category_clause(&value.to_lowercase()) {
            advanced.push(clause.to_string());
        }
    }
    if let Some(value) = params.non_empty("filetype") {
        if let Some(clause) = filetype_clause(&value.to_lowercase()) {
            advanced.push(clause.to_string());
        }
    }
    if let Some(value) = params.non_empty("site") {
        let site = value.to_lowercase().replace('*', "");
        advanced.push(format!("@canadagazettesite=={site}"));
    }

    Some(TranslatedQuery {
        free_text,
        advanced: advanced.join(" "),
        sort_by_date: params.non_empty("sort").is_some(),
    })
}

/// Legacy values arrive with `+` standing in for spaces.
fn spaced(value: &str) -> String {
    value.replace('+', " ")
}

/// Append accumulated clauses to the base free-text string.
///
/// A single clause with no base text stands alone; otherwise each clause
/// is parenthesised and the run is appended after a space.
fn join_clauses(base: String, clauses: Vec<String>) -> String {
    if clauses.is_empty() {
        return base;
    }
    if base.is_empty() && clauses.len() == 1 {
        return clauses.into_iter().next().unwrap_or_default();
    }
    let joined = format!("({})", clauses.join(")("));
    if base.is_empty() {
        joined
    } else {
        format!("{base} {joined}")
    }
}

fn date_window_clause(fqupdate: &str) -> Option<&'static str> {
    match fqupdate {
        "datemodified_dt:[now-1day to now]" => Some("@date>today-1d"),
        "datemodified_dt:[now-7days to now]" => Some("@date>today-7d"),
        "datemodified_dt:[now-1month to now]" => Some("@date>today-30d"),
        "datemodified_dt:[now-1year to now]" => Some("@date>today-365d"),
        _ => None,
    }
}

fn election_category_clause(category: &str) -> Option<&'static str> {
    match category {
        "his" => Some(r#"@uri="dir=his""#),
        "comp" => Some(r#"@uri="compendium""#),
        "ogi" => Some(r#"@uri="dir=gui""#),
        "officer_manuals" => Some(r#"@uri="dir=pub""#),
        "research" => Some(r#"@uri="dir=rec""#),
        "press_release" => Some(r#"@uri="dir=pre""#),
        "legislation" => Some(r#"@uri="dir=loi""#),
        "charg" => Some(r#"@uri="section=charg""#),
        "ca" => Some(r#"@uri="dir=ca""#),
        "un" => Some(r#"@uri="dir=un""#),
        "pre" => Some(r#"@uri="dir=pre-com""#),
        "spe" => Some(r#"@uri="dir=spe-com""#),
        "rep" => Some(r#"@uri="section=rep""#),
        _ => None,
    }
}

fn filetype_clause(filetype: &str) -> Option<&'static str> {
    match filetype {
        "application/pdf" => Some("@filetype==(pdf)"),
        "ps" => Some("@filetype==(ps)"),
        "application/msword" => Some("@filetype==(doc,docx)"),
        "application/vnd.ms-excel" => Some("@filetype==(xls,xlsx)"),
        "application/vnd.ms-powerpoint" => Some("@filetype==(ppt,pptx)"),
        "application/rtf" => Some("@filetype==(rtf)"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(raw: &str) -> TranslatedQuery {
        translate_legacy_filters(&ParamMap::parse(raw)).expect("filters present")
    }

    #[test]
    fn no_recognized_keys_is_a_no_op() {
        let params = ParamMap::parse("page=2&utm_source=newsletter");
        assert!(translate_legacy_filters(&params).is_none());
    }

    #[test]
    fn empty_valued_keys_do_not_trigger() {
        let params = ParamMap::parse("allq=&exctq=");
        assert!(translate_legacy_filters(&params).is_none());
    }

    #[test]
    fn sort_alone_does_not_trigger() {
        let params = ParamMap::parse("sort=date");
        assert!(translate_legacy_filters(&params).is_none());
    }

    #[test]
    fn allq_sets_free_text_with_spaces() {
        let query = translate("allq=ottawa+weather");
        assert_eq!(query.free_text, "ottawa weather");
        assert!(query.advanced.is_empty());
        assert!(!query.sort_by_date);
    }

    #[test]
    fn exctq_alone_is_a_bare_quoted_phrase() {
        let query = translate("exctq=open+government");
        assert_eq!(query.free_text, "\"open government\"");
    }

    #[test]
    fn anyq_joins_terms_with_or() {
        let query = translate("anyq=tax+benefit+credit");
        assert_eq!(query.free_text, "tax OR benefit OR credit");
    }

    #[test]
    fn noneq_negates_each_term() {
        let query = translate("noneq=cats+dogs");
        assert_eq!(query.free_text, "NOT (cats) NOT(dogs)");
    }

    #[test]
    fn clauses_append_to_base_text_parenthesised() {
        let query = translate("allq=budget&exctq=open+government");
        assert_eq!(query.free_text, "budget (\"open government\")");
    }

    #[test]
    fn multiple_clauses_join_back_to_back() {
        let query = translate("exctq=open+government&anyq=tax+benefit");
        assert_eq!(query.free_text, "(\"open government\")(tax OR benefit)");
    }

    #[test]
    fn all_clause_kinds_keep_their_order() {
        let query = translate("allq=base&exctq=a+b&anyq=c+d&noneq=e+f");
        assert_eq!(
            query.free_text,
            "base (\"a b\")(c OR d)(NOT (e) NOT(f))"
        );
    }

    #[test]
    fn fqocct_title_moves_free_text_into_advanced() {
        let query = translate("fqocct=title_t&allq=budget");
        assert_eq!(query.advanced, "@title=budget");
        assert!(query.free_text.is_empty());
    }

    #[test]
    fn fqocct_url_targets_uri_field() {
        let query = translate("fqocct=url_t&allq=budget");
        assert_eq!(query.advanced, "@uri=budget");
        assert!(query.free_text.is_empty());
    }

    #[test]
    fn fqocct_with_no_text_still_emits_field_prefix() {
        let query = translate("fqocct=title_t&dmn=example.ca");
        assert_eq!(query.advanced, "@title= @hostname=\"example.ca\"");
        assert!(query.free_text.is_empty());
    }

    #[test]
    fn unrecognized_fqocct_leaves_free_text_untouched() {
        let query = translate("fqocct=foo_t&allq=budget");
        assert_eq!(query.free_text, "budget");
        assert!(query.advanced.is_empty());
    }

    #[test]
    fn fqupdate_day_window() {
        let query = translate("fqupdate=datemodified_dt:[now-1day+to+now]");
        assert_eq!(query.advanced, "@date>today-1d");
    }

    #[test]
    fn fqupdate_week_window() {
        let query = translate("fqupdate=datemodified_dt%3A%5Bnow-7days+to+now%5D");
        assert_eq!(query.advanced, "@date>today-7d");
    }

    #[test]
    fn fqupdate_month_and_year_windows() {
        assert_eq!(
            translate("fqupdate=datemodified_dt:[now-1month+to+now]").advanced,
            "@date>today-30d"
        );
        assert_eq!(
            translate("fqupdate=datemodified_dt:[now-1year+to+now]").advanced,
            "@date>today-365d"
        );
    }

    #[test]
    fn fqupdate_matches_case_insensitively() {
        let query = translate("fqupdate=DateModified_dt:[NOW-1day+TO+now]");
        assert_eq!(query.advanced, "@date>today-1d");
    }

    #[test]
    fn unrecognized_fqupdate_is_ignored() {
        let query = translate("fqupdate=datemodified_dt:[now-2days+to+now]&allq=tax");
        assert!(query.advanced.is_empty());
        assert_eq!(query.free_text, "tax");
    }

    #[test]
    fn dmn_appends_quoted_hostname() {
        let query = translate("dmn=example.ca");
        assert_eq!(query.advanced, "@hostname=\"example.ca\"");
    }

    #[test]
    fn sort_rides_along_with_other_filters() {
        let query = translate("allq=tax&sort=date");
        assert!(query.sort_by_date);
    }

    #[test]
    fn election_categories_map_to_uri_clauses() {
        assert_eq!(translate("elctn_cat=his").advanced, "@uri=\"dir=his\"");
        assert_eq!(translate("elctn_cat=comp").advanced, "@uri=\"compendium\"");
        assert_eq!(translate("elctn_cat=ogi").advanced, "@uri=\"dir=gui\"");
        assert_eq!(
            translate("elctn_cat=officer_manuals").advanced,
            "@uri=\"dir=pub\""
        );
        assert_eq!(translate("elctn_cat=research").advanced, "@uri=\"dir=rec\"");
        assert_eq!(
            translate("elctn_cat=press_release").advanced,
            "@uri=\"dir=pre\""
        );
        assert_eq!(
            translate("elctn_cat=legislation").advanced,
            "@uri=\"dir=loi\""
        );
        assert_eq!(
            translate("elctn_cat=charg").advanced,
            "@uri=\"section=charg\""
        );
        assert_eq!(translate("elctn_cat=ca").advanced, "@uri=\"dir=ca\"");
        assert_eq!(translate("elctn_cat=un").advanced, "@uri=\"dir=un\"");
        assert_eq!(translate("elctn_cat=pre").advanced, "@uri=\"dir=pre-com\"");
        assert_eq!(translate("elctn_cat=spe").advanced, "@uri=\"dir=spe-com\"");
        assert_eq!(translate("elctn_cat=rep").advanced, "@uri=\"section=rep\"");
    }

    #[test]
    fn election_category_matches_case_insensitively() {
        assert_eq!(translate("elctn_cat=HIS").advanced, "@uri=\"dir=his\"");
    }

    #[test]
    fn unrecognized_election_category_is_ignored() {
        let query = translate("elctn_cat=unknown&allq=vote");
        assert!(query.advanced.is_empty());
    }

    #[test]
    fn filetypes_map_to_extension_sets() {
        assert_eq!(
            translate("filetype=application/pdf").advanced,
            "@filetype==(pdf)"
        );
        assert_eq!(translate("filetype=ps").advanced, "@filetype==(ps)");
        assert_eq!(
            translate("filetype=application/msword").advanced,
            "@filetype==(doc,docx)"
        );
        assert_eq!(
            translate("filetype=application/vnd.ms-excel").advanced,
            "@filetype==(xls,xlsx)"
        );
        assert_eq!(
            translate("filetype=application/vnd.ms-powerpoint").advanced,
            "@filetype==(ppt,pptx)"
        );
        assert_eq!(
            translate("filetype=application/rtf").advanced,
            "@filetype==(rtf)"
        );
    }

    #[test]
    fn filetype_matches_case_insensitively() {
        let query = translate("filetype=Application%2FPDF");
        assert_eq!(query.advanced, "@filetype==(pdf)");
    }

    #[test]
    fn unrecognized_filetype_is_ignored() {
        let query = translate("filetype=image/png&allq=logo");
        assert!(query.advanced.is_empty());
    }

    #[test]
    fn site_strips_all_wildcards_and_lowercases() {
        let query = translate("site=*.Gazette.GC.ca*");
        assert_eq!(query.advanced, "@canadagazettesite==.gazette.gc.ca");
    }

    #[test]
    fn advanced_clauses_join_in_rule_order() {
        let query = translate(
            "allq=budget&fqocct=title_t&fqupdate=datemodified_dt:[now-7days+to+now]&dmn=example.ca&filetype=application/pdf",
        );
        assert_eq!(
            query.advanced,
            "@title=budget @date>today-7d @hostname=\"example.ca\" @filetype==(pdf)"
        );
        assert!(query.free_text.is_empty());
    }

    #[test]
    fn translation_is_pure() {
        let params = ParamMap::parse("allq=tax&dmn=example.ca&sort=date");
        let first = translate_legacy_filters(&params);
        let second = translate_legacy_filters(&params);
        assert_eq!(first, second);
    }
}
