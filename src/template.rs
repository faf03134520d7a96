//! Typed `%[token]` template rendering.
//!
//! Page templates carry `%[token]` placeholders. Rendering is a single
//! left-to-right scan substituting each placeholder from a typed view
//! model; output never depends on the order replacements are chained in.
//! Tokens the view does not know pass through verbatim.

use chrono::{DateTime, Utc};

use crate::config::Lang;
use crate::dates::{long_date_format, short_date_format};

/// A compiled-enough template: the raw source with `%[token]`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Render against a view, replacing every `%[token]` occurrence the
    /// view resolves. Unknown tokens and unterminated placeholders are
    /// kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use gc_search_connector::template::{Template, TemplateView};
    ///
    /// struct Greeting;
    /// impl TemplateView for Greeting {
    ///     fn resolve(&self, token: &str) -> Option<String> {
    ///         (token == "name").then(|| "world".to_string())
    ///     }
    /// }
    ///
    /// let template = Template::new("hello %[name]");
    /// assert_eq!(template.render(&Greeting), "hello world");
    /// ```
    pub fn render(&self, view: &impl TemplateView) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();

        while let Some(start) = rest.find("%[") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find(']') {
                Some(end) => {
                    let token = &after[..end];
                    match view.resolve(token) {
                        Some(value) => out.push_str(&value),
                        None => {
                            out.push_str("%[");
                            out.push_str(token);
                            out.push(']');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// A view model that can resolve template tokens.
pub trait TemplateView {
    /// The substitution for `token`, or `None` to leave it in place.
    fn resolve(&self, token: &str) -> Option<String>;
}

/// Drop URIs whose protocol could script the page (`javascript:` and
/// friends). Absolute `http(s)`/`mailto`/`tel` URIs and relative paths
/// pass through; anything else renders as an empty string.
pub fn filter_protocol(uri: &str) -> &str {
    const SAFE_SCHEMES: [&str; 4] = ["https:", "http:", "mailto:", "tel:"];
    let is_absolute = SAFE_SCHEMES.iter().any(|scheme| {
        uri.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    let is_relative = uri.starts_with('/') || uri.starts_with("./") || uri.starts_with("../");
    if is_absolute || is_relative {
        uri
    } else {
        ""
    }
}

/// Author display text for a result.
///
/// Multi-valued authors join with `;`. Context-search pages render the
/// separators as `, `; the dedicated results pages turn every separator
/// into a list-item boundary so each author gets its own `<li>`.
pub fn author_display(authors: &[String], is_context_search: bool) -> String {
    let joined = authors.join(";");
    if is_context_search {
        joined.replace(';', ", ")
    } else {
        joined.replace(',', ";").replace(';', "</li> <li>")
    }
}

/// One rendered search result.
#[derive(Debug, Clone)]
pub struct ResultView {
    /// 1-based position of this result on the page.
    pub position: usize,
    /// Destination of the result link; sanitised at render time.
    pub click_uri: String,
    pub title: String,
    /// Display form of the authors, see [`author_display`].
    pub author: String,
    /// Navigation label from the index, when the document carries one.
    /// The breadcrumb token falls back to the printable URI without it.
    pub nav_label: Option<String>,
    pub printable_uri: String,
    /// GMT modification date from the engine.
    pub date: DateTime<Utc>,
    /// Excerpt with highlight markup already applied.
    pub highlighted_excerpt: String,
}

impl TemplateView for ResultView {
    fn resolve(&self, token: &str) -> Option<String> {
        match token {
            "index" => Some(self.position.to_string()),
            "result.clickUri" => Some(filter_protocol(&self.click_uri).to_string()),
            "result.title" => Some(self.title.clone()),
            "result.raw.author" => Some(self.author.clone()),
            "result.breadcrumb" => Some(
                self.nav_label
                    .clone()
                    .unwrap_or_else(|| self.printable_uri.clone()),
            ),
            "result.printableUri" => Some(self.printable_uri.clone()),
            "short-date-en" | "short-date-fr" => Some(short_date_format(self.date)),
            "long-date-en" => Some(long_date_format(self.date, Lang::En)),
            "long-date-fr" => Some(long_date_format(self.date, Lang::Fr)),
            "highlightedExcerpt" => Some(self.highlighted_excerpt.clone()),
            _ => None,
        }
    }
}

/// The results-count heading.
#[derive(Debug, Clone)]
pub struct QuerySummaryView {
    pub number_of_results: u64,
    pub query: String,
    pub duration_seconds: f64,
    pub lang: Lang,
}

impl TemplateView for QuerySummaryView {
    fn resolve(&self, token: &str) -> Option<String> {
        match token {
            "numberOfResults" => Some(format_count(self.number_of_results, self.lang)),
            "query" => Some(self.query.clone()),
            "queryDurationInSeconds" => Some(format_duration(self.duration_seconds, self.lang)),
            _ => None,
        }
    }
}

/// The "did you mean" correction prompt.
#[derive(Debug, Clone)]
pub struct DidYouMeanView {
    pub corrected_query: String,
}

impl TemplateView for DidYouMeanView {
    fn resolve(&self, token: &str) -> Option<String> {
        (token == "correctedQuery").then(|| self.corrected_query.clone())
    }
}

/// A single pager button.
#[derive(Debug, Clone, Copy)]
pub struct PageView {
    pub page: u64,
}

impl TemplateView for PageView {
    fn resolve(&self, token: &str) -> Option<String> {
        (token == "page").then(|| self.page.to_string())
    }
}

/// Locale-formatted integer: `12,345` in English, `12 345` (no-break
/// space) in French.
fn format_count(value: u64, lang: Lang) -> String {
    let digits = value.to_string();
    let separator = match lang {
        Lang::En => ',',
        Lang::Fr => '\u{a0}',
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, digit) in digits.chars().enumerate() {
        let remaining = digits.len() - offset;
        if offset > 0 && remaining % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Locale-formatted duration with two fraction digits.
fn format_duration(seconds: f64, lang: Lang) -> String {
    let formatted = format!("{seconds:.2}");
    match lang {
        Lang::En => formatted,
        Lang::Fr => formatted.replace('.', ","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result_view() -> ResultView {
        ResultView {
            position: 3,
            click_uri: "https://www.canada.ca/en/services/benefits.html".into(),
            title: "Benefits".into(),
            author: "Service Canada".into(),
            nav_label: Some("Canada.ca &gt; Benefits".into()),
            printable_uri: "https://www.canada.ca/en/services/benefits.html".into(),
            date: Utc
                .with_ymd_and_hms(2024, 5, 21, 9, 30, 0)
                .single()
                .expect("valid date"),
            highlighted_excerpt: "All about <strong>benefits</strong>".into(),
        }
    }

    #[test]
    fn renders_result_template() {
        let template = Template::new(
            r#"<h3><a class="result-link" href="%[result.clickUri]" data-pos="%[index]">%[result.title]</a></h3>"#,
        );
        let html = template.render(&result_view());
        assert_eq!(
            html,
            r#"<h3><a class="result-link" href="https://www.canada.ca/en/services/benefits.html" data-pos="3">Benefits</a></h3>"#
        );
    }

    #[test]
    fn breadcrumb_uses_nav_label_when_present() {
        let template = Template::new("%[result.breadcrumb]");
        assert_eq!(template.render(&result_view()), "Canada.ca &gt; Benefits");
    }

    #[test]
    fn breadcrumb_falls_back_to_printable_uri() {
        let mut view = result_view();
        view.nav_label = None;
        let template = Template::new("%[result.breadcrumb]");
        assert_eq!(
            template.render(&view),
            "https://www.canada.ca/en/services/benefits.html"
        );
    }

    #[test]
    fn renders_dates_for_both_locales() {
        let template = Template::new("%[short-date-en] / %[long-date-en] / %[long-date-fr]");
        assert_eq!(
            template.render(&result_view()),
            "2024-05-21 / May 21, 2024 / 21 mai 2024"
        );
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let template = Template::new("%[result.title] %[not.a.token]");
        assert_eq!(template.render(&result_view()), "Benefits %[not.a.token]");
    }

    #[test]
    fn unterminated_placeholder_is_kept() {
        let template = Template::new("%[result.title] and %[broken");
        assert_eq!(template.render(&result_view()), "Benefits and %[broken");
    }

    #[test]
    fn repeated_tokens_are_all_replaced() {
        let template = Template::new("page %[page] of results, go to %[page]");
        assert_eq!(
            template.render(&PageView { page: 4 }),
            "page 4 of results, go to 4"
        );
    }

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let template = Template::new("<p>No results</p>");
        assert_eq!(template.render(&result_view()), "<p>No results</p>");
    }

    #[test]
    fn javascript_click_uri_renders_empty() {
        let mut view = result_view();
        view.click_uri = "javascript:alert(1)".into();
        let template = Template::new(r#"<a href="%[result.clickUri]">x</a>"#);
        assert_eq!(template.render(&view), r#"<a href="">x</a>"#);
    }

    #[test]
    fn filter_protocol_accepts_safe_uris() {
        assert_eq!(
            filter_protocol("https://www.canada.ca/en.html"),
            "https://www.canada.ca/en.html"
        );
        assert_eq!(filter_protocol("HTTP://example.ca"), "HTTP://example.ca");
        assert_eq!(filter_protocol("mailto:info@canada.ca"), "mailto:info@canada.ca");
        assert_eq!(filter_protocol("tel:+18006226232"), "tel:+18006226232");
        assert_eq!(filter_protocol("/en/sr/srb.html"), "/en/sr/srb.html");
        assert_eq!(filter_protocol("./relative.html"), "./relative.html");
        assert_eq!(filter_protocol("../up.html"), "../up.html");
    }

    #[test]
    fn filter_protocol_blocks_scripting_uris() {
        assert_eq!(filter_protocol("javascript:alert(1)"), "");
        assert_eq!(filter_protocol("JAVASCRIPT:alert(1)"), "");
        assert_eq!(filter_protocol("data:text/html,<script>"), "");
        assert_eq!(filter_protocol("vbscript:x"), "");
        assert_eq!(filter_protocol(""), "");
    }

    #[test]
    fn author_display_context_search_joins_with_commas() {
        let authors = vec!["Service Canada".to_string(), "CRA".to_string()];
        assert_eq!(author_display(&authors, true), "Service Canada, CRA");
    }

    #[test]
    fn author_display_results_page_splits_list_items() {
        let authors = vec!["Service Canada".to_string(), "CRA".to_string()];
        assert_eq!(
            author_display(&authors, false),
            "Service Canada</li> <li>CRA"
        );
    }

    #[test]
    fn author_display_normalises_comma_separated_single_value() {
        let authors = vec!["Service Canada,CRA".to_string()];
        assert_eq!(
            author_display(&authors, false),
            "Service Canada</li> <li>CRA"
        );
    }

    #[test]
    fn query_summary_formats_counts_per_locale() {
        let template = Template::new("%[numberOfResults] results for \"%[query]\"");
        let view = QuerySummaryView {
            number_of_results: 1234567,
            query: "tax".into(),
            duration_seconds: 0.52,
            lang: Lang::En,
        };
        assert_eq!(template.render(&view), "1,234,567 results for \"tax\"");

        let french = QuerySummaryView {
            lang: Lang::Fr,
            ..view
        };
        assert_eq!(
            Template::new("%[numberOfResults]").render(&french),
            "1\u{a0}234\u{a0}567"
        );
    }

    #[test]
    fn query_summary_formats_duration_per_locale() {
        let view = QuerySummaryView {
            number_of_results: 10,
            query: "tax".into(),
            duration_seconds: 0.5,
            lang: Lang::Fr,
        };
        assert_eq!(
            Template::new("%[queryDurationInSeconds]").render(&view),
            "0,50"
        );
    }

    #[test]
    fn small_counts_have_no_separator() {
        let view = QuerySummaryView {
            number_of_results: 999,
            query: String::new(),
            duration_seconds: 0.0,
            lang: Lang::En,
        };
        assert_eq!(Template::new("%[numberOfResults]").render(&view), "999");
    }

    #[test]
    fn did_you_mean_renders_correction() {
        let template = Template::new("Did you mean <button>%[correctedQuery]</button>?");
        let view = DidYouMeanView {
            corrected_query: "pension".into(),
        };
        assert_eq!(
            template.render(&view),
            "Did you mean <button>pension</button>?"
        );
    }
}
