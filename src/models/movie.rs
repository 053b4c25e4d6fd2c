use serde::{Deserialize, Serialize};

/// Movie summary as returned by catalog list endpoints
/// (search, trending, now playing, recommendations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Paged list wrapper used by every TMDB list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Full movie record from `/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Cast and crew from `/movie/{id}/credits`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Names of crew members credited as director
    pub fn directors(&self) -> Vec<&str> {
        self.crew
            .iter()
            .filter(|member| member.job.as_deref() == Some("Director"))
            .map(|member| member.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paged_movie_deserialization() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 603, "title": "The Matrix", "poster_path": "/matrix.jpg", "vote_average": 8.2, "adult": false},
                {"id": 604, "title": "The Matrix Reloaded"}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;

        let paged: Paged<Movie> = serde_json::from_str(json).unwrap();
        assert_eq!(paged.results.len(), 2);
        assert_eq!(paged.results[0].poster_path.as_deref(), Some("/matrix.jpg"));
        assert_eq!(paged.results[1].overview, None);
    }

    #[test]
    fn test_credits_directors() {
        let json = r#"{
            "id": 603,
            "cast": [{"id": 6384, "name": "Keanu Reeves", "character": "Neo"}],
            "crew": [
                {"id": 9339, "name": "Lilly Wachowski", "job": "Director", "department": "Directing"},
                {"id": 9340, "name": "Lana Wachowski", "job": "Director", "department": "Directing"},
                {"id": 1, "name": "Someone Else", "job": "Editor"}
            ]
        }"#;

        let credits: Credits = serde_json::from_str(json).unwrap();
        assert_eq!(credits.cast[0].character.as_deref(), Some("Neo"));
        assert_eq!(
            credits.directors(),
            vec!["Lilly Wachowski", "Lana Wachowski"]
        );
    }
}
