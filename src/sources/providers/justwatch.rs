//! Streaming availability, read from the JustWatch panel Letterboxd embeds
//! on each film page.

use async_trait::async_trait;
use marquee_common::{Error, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::sources::http::HttpClient;
use crate::sources::provider::{Availability, AvailabilitySource, Modality};

/// Availability source backed by Letterboxd's JustWatch panel.
pub struct JustWatchProvider {
    http: HttpClient,
    base_url: String,
}

impl JustWatchProvider {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn panel_url(&self, slug: &str) -> String {
        format!(
            "{}/csi/film/{slug}/justwatch/?esiAllowUser=true&esiAllowCountry=true",
            self.base_url
        )
    }
}

/// Film slug from a Letterboxd film URL (`.../film/<slug>/...`).
fn film_slug(review_url: &str) -> Option<&str> {
    let (_, rest) = review_url.split_once("/film/")?;
    let slug = rest.split('/').next()?;
    (!slug.is_empty()).then_some(slug)
}

fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the panel: one `.service` block per provider, each carrying its
/// offer links (`Stream`, `Rent`, `Buy`).
fn parse_availability(html: &str) -> Availability {
    let mut availability = Availability::default();
    let document = Html::parse_fragment(html);
    let (Ok(service_sel), Ok(name_sel), Ok(option_sel)) = (
        Selector::parse(".service"),
        Selector::parse(".name, .title"),
        Selector::parse(".options .extended, .options a, .option"),
    ) else {
        return availability;
    };

    for service in document.select(&service_sel) {
        let Some(name) = service.select(&name_sel).next().map(text_of) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let mut seen: Vec<Modality> = Vec::new();
        for option in service.select(&option_sel) {
            let label = text_of(option);
            let Some(modality) = label.split_whitespace().find_map(Modality::from_label) else {
                continue;
            };
            if !seen.contains(&modality) {
                seen.push(modality);
                availability.add(modality, name.clone());
            }
        }
    }

    availability
}

#[async_trait]
impl AvailabilitySource for JustWatchProvider {
    fn name(&self) -> &'static str {
        "justwatch"
    }

    async fn fetch_availability(&self, review_url: &str) -> Result<Availability> {
        let slug = film_slug(review_url)
            .ok_or_else(|| Error::not_found(format!("no film page in '{review_url}'")))?;
        let url = self.panel_url(slug);
        debug!(url = %url, "JustWatch panel");
        let page = self.http.get_page(&url).await?;
        Ok(parse_availability(&page.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: &str = r#"<section class="services">
<p class="service -netflix">
  <a class="label"><span class="title"><span class="name">Netflix basic with Ads</span></span></a>
  <span class="options"><a class="link"><span class="extended">Stream</span></a></span>
</p>
<p class="service -itunes">
  <a class="label"><span class="title"><span class="name">Apple TV</span></span></a>
  <span class="options">
    <a class="link"><span class="extended">Rent</span></a>
    <a class="link"><span class="extended">Buy</span></a>
  </span>
</p>
<p class="service -empty"><span class="options"><a>Stream</a></span></p>
</section>"#;

    #[test]
    fn panel_services_by_modality() {
        let availability = parse_availability(PANEL);
        assert_eq!(
            availability.services(Modality::Stream),
            ["Netflix basic with Ads"]
        );
        assert_eq!(availability.services(Modality::Rent), ["Apple TV"]);
        assert_eq!(availability.services(Modality::Buy), ["Apple TV"]);
    }

    #[test]
    fn empty_panel_has_no_offers() {
        assert!(parse_availability("<p>Not streaming.</p>").offers.is_empty());
    }

    #[test]
    fn slug_from_film_url() {
        assert_eq!(film_slug("https://letterboxd.com/film/the-thing/"), Some("the-thing"));
        assert_eq!(film_slug("https://letterboxd.com/film/heat-1995"), Some("heat-1995"));
        assert_eq!(film_slug("https://letterboxd.com/imdb/tt1/"), None);
        assert_eq!(film_slug(""), None);
    }
}
