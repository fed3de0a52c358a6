//! Letterboxd list download.
//!
//! Turns a (possibly paginated) list into the slug-per-line file that the
//! `run` command reads.

use std::path::Path;

use marquee_common::Result;
use tracing::info;

use crate::sources::providers::LetterboxdProvider;

/// URL of page `page` (1-based) of the list at `url`.
pub fn page_url(url: &str, page: u32) -> String {
    if page <= 1 {
        url.to_string()
    } else {
        format!("{}/page/{page}/", url.trim_end_matches('/'))
    }
}

/// Collect film slugs from the first `pages` pages of a list. A slug that
/// shows up on more than one page is kept once, at its first position.
pub async fn download_list(
    letterboxd: &LetterboxdProvider,
    url: &str,
    pages: u32,
) -> Result<Vec<String>> {
    let mut slugs: Vec<String> = Vec::new();
    for page in 1..=pages.max(1) {
        let page_url = page_url(url, page);
        let found = letterboxd.fetch_list_page(&page_url).await?;
        info!(url = %page_url, films = found.len(), "Fetched list page");
        for slug in found {
            if slugs.contains(&slug) {
                continue;
            }
            println!("{slug}");
            slugs.push(slug);
        }
    }
    Ok(slugs)
}

/// Write one slug per line.
pub fn write_list(path: &Path, slugs: &[String]) -> Result<()> {
    let mut text = slugs.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_is_the_list_itself() {
        let url = "https://letterboxd.com/someone/list/horror/";
        assert_eq!(page_url(url, 1), url);
        assert_eq!(
            page_url(url, 3),
            "https://letterboxd.com/someone/list/horror/page/3/"
        );
        assert_eq!(
            page_url("https://letterboxd.com/someone/list/horror", 2),
            "https://letterboxd.com/someone/list/horror/page/2/"
        );
    }

    #[test]
    fn list_file_has_one_slug_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movie_list.txt");
        write_list(&path, &["alien".to_string(), "the-thing".to_string()]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "alien\nthe-thing\n");
    }
}
