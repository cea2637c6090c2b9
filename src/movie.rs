use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Genre {
    pub name: String,
}

/// One entry of the service's `results` array.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Option<Vec<String>>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<MovieRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListName {
    Watchlist,
    Watched,
}

impl ListName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListName::Watchlist => "watchlist",
            ListName::Watched => "watched",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListName::Watchlist => "Watchlist",
            ListName::Watched => "Watched",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "watchlist" => Ok(ListName::Watchlist),
            "watched" => Ok(ListName::Watched),
            other => Err(anyhow::anyhow!(
                "list name must be 'watchlist' or 'watched', got '{}'",
                other
            )),
        }
    }
}

pub fn genre_names(movie: &MovieRecord) -> String {
    movie
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn cast_names(movie: &MovieRecord) -> String {
    movie
        .cast
        .as_ref()
        .map(|c| c.join(", "))
        .unwrap_or_default()
}

/// Text shown in the details pane for a looked-up movie.
pub fn render_details(movie: &MovieRecord) -> String {
    let director = movie.director.as_deref().unwrap_or("N/A");
    format!(
        "Title: {}\nRelease Date: {}\nDirector: {}\nCast: {}\nGenres: {}\nOverview: {}\n",
        movie.title,
        movie.release_date,
        director,
        cast_names(movie),
        genre_names(movie),
        movie.overview
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fight_club() -> MovieRecord {
        serde_json::from_str(
            r#"{"id":550,"title":"Fight Club","release_date":"1999-10-15","genres":[{"name":"Drama"}],"overview":"A ..."}"#,
        )
        .unwrap()
    }

    #[test]
    fn renders_missing_director_as_na() {
        let text = render_details(&fight_club());
        assert!(text.contains("Title: Fight Club\n"));
        assert!(text.contains("Director: N/A\n"));
        assert!(text.contains("Genres: Drama\n"));
        assert!(text.contains("Cast: \n"));
        assert!(text.contains("Release Date: 1999-10-15\n"));
    }

    #[test]
    fn joins_cast_and_genres_with_commas() {
        let mut movie = fight_club();
        movie.director = Some("David Fincher".to_string());
        movie.cast = Some(vec!["Edward Norton".to_string(), "Brad Pitt".to_string()]);
        movie.genres.push(Genre {
            name: "Thriller".to_string(),
        });

        let text = render_details(&movie);
        assert!(text.contains("Director: David Fincher\n"));
        assert!(text.contains("Cast: Edward Norton, Brad Pitt\n"));
        assert!(text.contains("Genres: Drama, Thriller\n"));
    }

    #[test]
    fn tolerates_missing_optional_fields_and_extra_keys() {
        let movie: MovieRecord =
            serde_json::from_str(r#"{"id":1,"title":"Bare","popularity":9.1}"#).unwrap();
        assert_eq!(movie.release_date, "");
        assert!(movie.genres.is_empty());
        assert_eq!(movie.cast, None);
    }

    #[test]
    fn parses_list_names() {
        assert_eq!("Watchlist".parse::<ListName>().unwrap(), ListName::Watchlist);
        assert_eq!(" watched ".parse::<ListName>().unwrap(), ListName::Watched);
        assert!("favorites".parse::<ListName>().is_err());
        assert_eq!(ListName::Watched.to_string(), "watched");
    }
}
