//! IMDB-backed page provider and extractor.
//!
//! The provider fetches pages over HTTP; the extractor pulls filmographies
//! and cast lists out of them with CSS selectors. The search core only sees
//! the trait contracts, so this whole module is swappable.

use async_trait::async_trait;
use futures::future::try_join_all;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ProviderResult, TransportError};
use crate::search::ConcurrencyGate;
use crate::traits::{Document, Extractor, PageProvider};
use crate::types::ids::{PersonId, PersonRecord, WorkId, WorkRecord};

const SITE_ROOT: &str = "https://imdb.com/";
const CREDITS_SUFFIX: &str = "fullcredits/";

/// Resolve a page-relative reference to a canonical absolute identifier.
///
/// Work references gain the full-credits suffix so a work id always denotes
/// its cast listing rather than the title page itself.
pub fn normalize_reference(raw: &str) -> ProviderResult<String> {
    let base = Url::parse(SITE_ROOT).expect("site root parses");
    let resolved = base.join(raw).map_err(|_| TransportError::InvalidReference {
        reference: raw.to_string(),
    })?;
    let mut id = resolved.to_string();
    if id.contains("/title/") && !id.ends_with(CREDITS_SUFFIX) {
        if !id.ends_with('/') {
            id.push('/');
        }
        id.push_str(CREDITS_SUFFIX);
    }
    Ok(id)
}

/// The title page behind a cast-listing id.
fn title_page(id: &WorkId) -> String {
    id.as_str()
        .strip_suffix(CREDITS_SUFFIX)
        .unwrap_or(id.as_str())
        .to_string()
}

/// Fetches pages over HTTP.
pub struct HttpPageProvider {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpPageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPageProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "costar/0.1".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl PageProvider for HttpPageProvider {
    async fn fetch_and_parse(&self, id: &str) -> ProviderResult<Document> {
        debug!(url = %id, "fetch starting");
        let response = self
            .client
            .get(id)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %id, error = %e, "HTTP request failed");
                TransportError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %id, status = status.as_u16(), "non-success response");
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: id.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Http(Box::new(e)))?;

        Ok(Document::new(id, body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// CSS-selector extraction over IMDB pages.
pub struct ImdbExtractor {
    cast_link: Selector,
    photo_img: Selector,
    filmo_row: Selector,
    row_link: Selector,
    header_name: Selector,
    synopsis: Selector,
}

impl Default for ImdbExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImdbExtractor {
    pub fn new() -> Self {
        let parse = |css: &str| Selector::parse(css).expect("static selector parses");
        Self {
            cast_link: parse("table.cast_list td.primary_photo a"),
            photo_img: parse("img"),
            filmo_row: parse(r#"div[id^="actor-"], div[id^="actress-"]"#),
            row_link: parse("a"),
            header_name: parse("h1 span"),
            synopsis: parse("div.summary_text"),
        }
    }

    /// Display name from a person page's profile header.
    pub fn person_name(&self, doc: &Document) -> Option<String> {
        let html = Html::parse_document(&doc.body);
        let name = html
            .select(&self.header_name)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Synopsis text from a title page, if the page carries one.
    pub fn work_synopsis(&self, doc: &Document) -> Option<String> {
        let html = Html::parse_document(&doc.body);
        let text = html
            .select(&self.synopsis)
            .next()?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Text immediately before a filmography row's line break.
///
/// Non-feature rows carry a marker like "(Video Game)" there; released
/// features have only whitespace. A missing marker means no special status.
fn status_marker(row: ElementRef) -> String {
    for child in row.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if el.value().name() == "br" {
                return child
                    .prev_sibling()
                    .and_then(|prev| prev.value().as_text().map(|t| t.trim().to_string()))
                    .unwrap_or_default();
            }
        }
    }
    String::new()
}

impl Extractor for ImdbExtractor {
    fn works_from_person(&self, doc: &Document, limit: Option<usize>) -> Vec<WorkRecord> {
        let html = Html::parse_document(&doc.body);
        let limit = limit.unwrap_or(usize::MAX);
        let mut works = Vec::new();
        for row in html.select(&self.filmo_row) {
            // A limit of zero yields an empty filmography, same as the
            // cast extractor's reading of a zero limit.
            if works.len() == limit {
                debug!(limit, "work limit reached");
                break;
            }
            let links: Vec<ElementRef> = row.select(&self.row_link).collect();
            // Credits with secondary status carry an extra link and a
            // textual marker before the line break; released features
            // have exactly one link and neither.
            if links.len() != 1 || !status_marker(row).is_empty() {
                continue;
            }
            let Some(href) = links[0].value().attr("href") else {
                continue;
            };
            let Ok(id) = normalize_reference(href) else {
                continue;
            };
            let title = links[0].text().collect::<String>().trim().to_string();
            debug!(title = %title, id = %id, "found work");
            works.push(WorkRecord {
                title,
                id: WorkId::new(id),
            });
        }
        works
    }

    fn cast_from_work(&self, doc: &Document, limit: Option<usize>) -> Vec<PersonRecord> {
        let html = Html::parse_document(&doc.body);
        let limit = limit.unwrap_or(usize::MAX);
        let mut cast = Vec::new();
        for link in html.select(&self.cast_link).take(limit) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let Ok(id) = normalize_reference(href) else {
                continue;
            };
            let name = link
                .select(&self.photo_img)
                .next()
                .and_then(|img| img.value().attr("title"))
                .unwrap_or_default()
                .to_string();
            debug!(name = %name, "found cast member");
            cast.push(PersonRecord {
                name,
                id: PersonId::new(id),
            });
        }
        cast
    }
}

/// Concatenated synopses of everything on a person's filmography.
///
/// Title pages are fetched concurrently behind a gate of `chunk_size`
/// permits; works without a synopsis are skipped.
pub async fn filmography_synopses<P: PageProvider>(
    provider: &P,
    extractor: &ImdbExtractor,
    person: &PersonId,
    chunk_size: usize,
) -> ProviderResult<String> {
    let doc = provider.fetch_and_parse(person.as_str()).await?;
    let works = extractor.works_from_person(&doc, None);
    debug!(works = works.len(), person = %person, "fetching synopses");

    let gate = ConcurrencyGate::new(chunk_size.max(1));
    let fetches = works.iter().map(|work| {
        let url = title_page(&work.id);
        let gate = &gate;
        async move {
            let _permit = gate.admit().await;
            provider.fetch_and_parse(&url).await
        }
    });
    let docs = try_join_all(fetches).await?;

    let synopses: Vec<String> = docs
        .iter()
        .filter_map(|doc| extractor.work_synopsis(doc))
        .collect();
    Ok(synopses.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILMOGRAPHY: &str = r##"
        <html><body>
        <h1><span>Keanu Reeves</span></h1>
        <div id="actor-tt0133093" class="filmo-row">
            <b><a href="/title/tt0133093/">The Matrix</a></b>
            <br/>
        </div>
        <div id="actor-tt0111161" class="filmo-row">
            <b><a href="/title/tt0111161/">Some Game</a></b>
            (Video Game)
            <br/>
        </div>
        <div id="actress-tt0222222" class="filmo-row">
            <b><a href="/title/tt0222222/">Announced Thing</a></b>
            <a href="#">(announced)</a>
            <br/>
        </div>
        <div id="actor-tt0333333" class="filmo-row">
            <b><a href="/title/tt0333333/">Second Feature</a></b>
            <br/>
        </div>
        </body></html>
    "##;

    const CAST: &str = r#"
        <html><body>
        <table class="cast_list">
            <tr><td class="primary_photo">
                <a href="/name/nm0000206/"><img title="Keanu Reeves" src=""/></a>
            </td></tr>
            <tr><td class="primary_photo">
                <a href="/name/nm0000210/"><img title="Carrie-Anne Moss" src=""/></a>
            </td></tr>
            <tr><td class="primary_photo">
                <a href="/name/nm0000401/"><img title="Laurence Fishburne" src=""/></a>
            </td></tr>
        </table>
        </body></html>
    "#;

    #[test]
    fn relative_person_reference_resolves_to_site_root() {
        let id = normalize_reference("/name/nm0000206/").unwrap();
        assert_eq!(id, "https://imdb.com/name/nm0000206/");
    }

    #[test]
    fn work_reference_gains_the_credits_suffix() {
        let id = normalize_reference("/title/tt0133093/").unwrap();
        assert_eq!(id, "https://imdb.com/title/tt0133093/fullcredits/");
    }

    #[test]
    fn already_suffixed_reference_is_left_alone() {
        let id = normalize_reference("https://imdb.com/title/tt0133093/fullcredits/").unwrap();
        assert_eq!(id, "https://imdb.com/title/tt0133093/fullcredits/");
    }

    #[test]
    fn filmography_excludes_secondary_status_rows() {
        let extractor = ImdbExtractor::new();
        let doc = Document::new("https://imdb.com/name/nm0000206/", FILMOGRAPHY);
        let works = extractor.works_from_person(&doc, None);
        let titles: Vec<&str> = works.iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, vec!["The Matrix", "Second Feature"]);
        assert_eq!(
            works[0].id,
            WorkId::new("https://imdb.com/title/tt0133093/fullcredits/")
        );
    }

    #[test]
    fn filmography_respects_the_work_limit() {
        let extractor = ImdbExtractor::new();
        let doc = Document::new("https://imdb.com/name/nm0000206/", FILMOGRAPHY);
        let works = extractor.works_from_person(&doc, Some(1));
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].title, "The Matrix");
    }

    #[test]
    fn zero_limit_means_empty_for_both_extractors() {
        let extractor = ImdbExtractor::new();
        let person_doc = Document::new("https://imdb.com/name/nm0000206/", FILMOGRAPHY);
        assert!(extractor.works_from_person(&person_doc, Some(0)).is_empty());
        let work_doc = Document::new("https://imdb.com/title/tt0133093/fullcredits/", CAST);
        assert!(extractor.cast_from_work(&work_doc, Some(0)).is_empty());
    }

    #[test]
    fn cast_is_extracted_in_order_with_names() {
        let extractor = ImdbExtractor::new();
        let doc = Document::new("https://imdb.com/title/tt0133093/fullcredits/", CAST);
        let cast = extractor.cast_from_work(&doc, None);
        assert_eq!(cast.len(), 3);
        assert_eq!(cast[0].name, "Keanu Reeves");
        assert_eq!(
            cast[0].id,
            PersonId::new("https://imdb.com/name/nm0000206/")
        );
    }

    #[test]
    fn cast_limit_truncates() {
        let extractor = ImdbExtractor::new();
        let doc = Document::new("https://imdb.com/title/tt0133093/fullcredits/", CAST);
        let cast = extractor.cast_from_work(&doc, Some(2));
        assert_eq!(cast.len(), 2);
    }

    #[test]
    fn person_name_comes_from_the_header() {
        let extractor = ImdbExtractor::new();
        let doc = Document::new("https://imdb.com/name/nm0000206/", FILMOGRAPHY);
        assert_eq!(extractor.person_name(&doc), Some("Keanu Reeves".to_string()));
    }

    #[test]
    fn missing_synopsis_is_none_not_an_error() {
        let extractor = ImdbExtractor::new();
        let doc = Document::new("https://imdb.com/title/tt0133093/", "<html></html>");
        assert!(extractor.work_synopsis(&doc).is_none());

        let with_synopsis = Document::new(
            "https://imdb.com/title/tt0133093/",
            r#"<div class="summary_text"> A hacker learns the truth. </div>"#,
        );
        assert_eq!(
            extractor.work_synopsis(&with_synopsis),
            Some("A hacker learns the truth.".to_string())
        );
    }
}
