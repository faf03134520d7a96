//! Built-in page markup.
//!
//! A search page may carry its own template elements for any part of the
//! results UI; whatever it omits falls back to these built-in fragments
//! in the page language. The fragments use the same `%[token]`
//! placeholders as page-supplied templates, so the rendering path does
//! not care where a template came from.

use crate::config::Lang;
use crate::template::Template;

/// The full set of markup templates a results page renders from.
#[derive(Debug, Clone)]
pub struct PageMarkup {
    /// One search result.
    pub result: Template,
    /// Shown when a query matches nothing.
    pub no_result: Template,
    /// Shown when the engine reports an error.
    pub result_error: Template,
    /// Results-count heading echoing the query back.
    pub query_summary: Template,
    /// Results-count heading without the query.
    pub no_query_summary: Template,
    /// The "did you mean" correction prompt.
    pub did_you_mean: Template,
    /// Pager previous-page button.
    pub previous_page: Template,
    /// Pager numbered-page button.
    pub page: Template,
    /// Pager next-page button.
    pub next_page: Template,
    /// Pager list container.
    pub pager_container: Template,
}

impl PageMarkup {
    /// The built-in markup for a page language.
    pub fn for_lang(lang: Lang) -> Self {
        match lang {
            Lang::En => Self::english(),
            Lang::Fr => Self::french(),
        }
    }

    /// Which results-count heading a summary renders with.
    ///
    /// The query is echoed back only when there is one to show and the
    /// page is not the advanced-search form, whose generated query
    /// expression is not presentable.
    pub fn summary_template(&self, query: &str, is_advanced_search: bool) -> &Template {
        if !query.is_empty() && !is_advanced_search {
            &self.query_summary
        } else {
            &self.no_query_summary
        }
    }

    fn english() -> Self {
        Self {
            result: Template::new(
                r#"<h3><a class="result-link" href="%[result.clickUri]" data-dtm-srchlnknm="%[index]">%[result.title]</a></h3>
<ul class="context-labels"><li>%[result.raw.author]</li></ul>
<ol class="location"><li>%[result.breadcrumb]</li></ol>
<p><time datetime="%[short-date-en]" class="text-muted">%[long-date-en]</time> - %[highlightedExcerpt]</p>"#,
            ),
            no_result: Template::new(
                r#"<section class="alert alert-warning">
	<h2>No results</h2>
	<p>No pages were found that match your search terms.</p>
	<p>Suggestions:</p>
	<ul>
		<li>Make sure all search terms are spelled correctly</li>
		<li>Try different search terms</li>
		<li>Try more general search terms</li>
		<li>Consult the&nbsp;<a href="/en/sr/st.html">search tips</a></li>
		<li>Try the&nbsp;<a href="/en/sr/srb/sra.html">advanced search</a></li>
	</ul>
</section>"#,
            ),
            result_error: Template::new(SEARCH_ISSUES_HTML),
            query_summary: Template::new(
                r#"<h2><span class="wb-inv">Search results - </span><span role="status">%[numberOfResults] search results for "%[query]"</span></h2>"#,
            ),
            no_query_summary: Template::new("<h2>%[numberOfResults] search results</h2>"),
            did_you_mean: Template::new(
                r#"<p class="h5 mrgn-lft-md">Did you mean <button class="btn-link p-0">%[correctedQuery]</button> ?</p>"#,
            ),
            previous_page: Template::new(
                r#"<button class="page-button previous-page-button">Previous<span class="wb-inv">: Previous page of search results</span></button>"#,
            ),
            page: Template::new(
                r#"<button class="page-button">%[page]<span class="wb-inv">: Page %[page] of search results</span></button>"#,
            ),
            next_page: Template::new(
                r#"<button class="page-button next-page-button">Next<span class="wb-inv">: Next page of search results</span></button>"#,
            ),
            pager_container: Template::new(
                r#"<div class="text-center">
	<p class="wb-inv">Search results pages</p>
	<ul id="pager" class="pagination mrgn-bttm-0"></ul>
</div>"#,
            ),
        }
    }

    fn french() -> Self {
        Self {
            result: Template::new(
                r#"<h3><a class="result-link" href="%[result.clickUri]" data-dtm-srchlnknm="%[index]">%[result.title]</a></h3>
<ul class="context-labels"><li>%[result.raw.author]</li></ul>
<ol class="location"><li>%[result.breadcrumb]</li></ol>
<p><time datetime="%[short-date-fr]" class="text-muted">%[long-date-fr]</time> - %[highlightedExcerpt]</p>"#,
            ),
            no_result: Template::new(
                r#"<section class="alert alert-warning">
	<h2>Aucun résultat</h2>
	<p>Aucun résultat ne correspond à vos critères de recherche.</p>
	<p>Suggestions&nbsp;:</p>
	<ul>
		<li>Assurez-vous que tous vos termes de recherches sont bien orthographiés </li>
		<li>Utilisez de différents termes de recherche </li>
		<li>Utilisez des termes de recherche plus généraux </li>
		<li>Consultez les&nbsp;<a href="/fr/sr/tr.html"> trucs de recherche </a></li>
		<li>Essayez la <a href="/fr/sr/srb/sra.html">recherche avancée</a></li>
	</ul>
</section>"#,
            ),
            // The service-issues notice has never been localised.
            result_error: Template::new(SEARCH_ISSUES_HTML),
            query_summary: Template::new(
                r#"<h2><span class="wb-inv">Résultats de recherche - </span><span role="status">%[numberOfResults] résultats de recherche pour "%[query]"</span></h2>"#,
            ),
            no_query_summary: Template::new("<h2>%[numberOfResults] résultats de recherche</h2>"),
            did_you_mean: Template::new(
                r#"<p class="did-you-mean">Rechercher plutôt <button class="btn-link p-0">%[correctedQuery]</button> ?</p>"#,
            ),
            previous_page: Template::new(
                r#"<button class="page-button previous-page-button">Précédente<span class="wb-inv">: Page précédente des résultats de recherche</span></button>"#,
            ),
            page: Template::new(
                r#"<button class="page-button">%[page]<span class="wb-inv">: Page %[page] des résultats de recherche</span></button>"#,
            ),
            next_page: Template::new(
                r#"<button class="page-button next-page-button">Suivante<span class="wb-inv">: Page suivante des résultats de recherche</span></button>"#,
            ),
            pager_container: Template::new(
                r#"<div class="text-center">
	<p class="wb-inv">Pagination des résultats de recherche</p>
	<ul id="pager" class="pagination mrgn-bttm-0"></ul>
</div>"#,
            ),
        }
    }
}

const SEARCH_ISSUES_HTML: &str = r#"<section class="alert alert-warning">
	<h2>The Canada.ca Search is currently experiencing issues</h2>
	<p>A resolution for the restoration is presently being worked. We apologize for any inconvenience.</p>
</section>"#;

/// Responsive visibility classes for a numbered pager button.
///
/// Pages beyond the current page's immediate neighbours collapse on
/// phone-sized viewports; two or more steps away they collapse on
/// tablets as well. The current page itself is marked active.
pub fn pager_item_classes(page: u64, current_page: u64) -> Vec<&'static str> {
    let mut classes = Vec::new();
    let distance = page.abs_diff(current_page);
    if distance > 1 {
        classes.push("hidden-xs");
        classes.push("hidden-sm");
        if distance > 2 {
            classes.push("hidden-md");
        }
    }
    if page == current_page {
        classes.push("active");
    }
    classes
}
