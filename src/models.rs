use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Video {
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub key: Option<String>,
}

/// `{ "results": [...] }` envelope shared by list, search and video endpoints.
#[derive(Debug, Deserialize)]
pub struct Results<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_results_decode_as_empty() {
        let parsed: Results<MovieSummary> = serde_json::from_value(json!({ "page": 1 })).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn detail_flattens_summary_fields() {
        let detail: MovieDetail = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/p.jpg",
            "backdrop_path": null,
            "release_date": "1999-03-30",
            "overview": "Neo.",
            "vote_average": 8.2,
            "runtime": 136,
            "genres": [{ "id": 28, "name": "Action" }]
        }))
        .unwrap();
        assert_eq!(detail.summary.id, 603);
        assert_eq!(detail.summary.title, "The Matrix");
        assert_eq!(detail.runtime, Some(136));
        assert_eq!(detail.genres[0].name, "Action");
    }

    #[test]
    fn video_type_is_renamed() {
        let video: Video = serde_json::from_value(json!({
            "site": "YouTube",
            "type": "Trailer",
            "key": "abc"
        }))
        .unwrap();
        assert_eq!(video.video_type, "Trailer");
        assert_eq!(video.key.as_deref(), Some("abc"));
    }
}
