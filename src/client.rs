use crate::movie::{ListName, MovieRecord, SearchResponse};
use crate::service::ServiceRunner;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Process(String),
    #[error("Movie service returned malformed output: {0}")]
    MalformedOutput(String),
    #[error("No movies found for '{0}'")]
    NoResults(String),
    #[error("Could not launch movie service: {0}")]
    Launch(String),
}

impl ClientError {
    pub fn is_input(&self) -> bool {
        matches!(self, ClientError::Input(_))
    }
}

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a movie name.";
const DEFAULT_ADDED_MESSAGE: &str = "Movie list updated";

#[derive(Clone)]
pub struct MovieClient {
    runner: Arc<dyn ServiceRunner>,
    placeholder_list: Vec<String>,
}

impl MovieClient {
    pub fn new(runner: Arc<dyn ServiceRunner>, placeholder_list: Vec<String>) -> Self {
        Self {
            runner,
            placeholder_list,
        }
    }

    /// Looks a movie up by title or id and returns the first match.
    pub async fn search(&self, query: &str) -> Result<MovieRecord, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ClientError::Input(EMPTY_QUERY_MESSAGE.to_string()));
        }

        info!("Searching movie service for '{}'", query);
        let output = self
            .runner
            .run(&[query.to_string()])
            .await
            .map_err(|e| ClientError::Launch(format!("{:#}", e)))?;

        if !output.success {
            let text = output.failure_text();
            warn!("Search for '{}' failed: {}", query, text);
            return Err(ClientError::Process(text));
        }

        let response: SearchResponse = serde_json::from_str(output.stdout.trim())
            .map_err(|e| ClientError::MalformedOutput(e.to_string()))?;
        let movie = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::NoResults(query.to_string()))?;
        info!("Matched '{}' -> '{}' ({})", query, movie.title, movie.id);
        Ok(movie)
    }

    /// Asks the service to add `movie_id` to `list` for `user_id`; returns its confirmation text.
    pub async fn add_to_list(
        &self,
        user_id: i64,
        movie_id: i64,
        list: ListName,
    ) -> Result<String, ClientError> {
        info!("Adding movie {} to {} for user {}", movie_id, list, user_id);
        let args = [
            user_id.to_string(),
            movie_id.to_string(),
            list.as_str().to_string(),
        ];
        let output = self
            .runner
            .run(&args)
            .await
            .map_err(|e| ClientError::Launch(format!("{:#}", e)))?;

        if !output.success {
            let text = output.failure_text();
            warn!("Adding movie {} to {} failed: {}", movie_id, list, text);
            return Err(ClientError::Process(text));
        }

        let message = output.stdout.trim();
        if message.is_empty() {
            Ok(DEFAULT_ADDED_MESSAGE.to_string())
        } else {
            Ok(message.to_string())
        }
    }

    /// Entries for the list view. Not read back from the service.
    pub fn refresh_list(&self) -> Vec<String> {
        self.placeholder_list.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceOutput;
    use std::sync::Mutex;

    struct FakeRunner {
        output: ServiceOutput,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeRunner {
        fn new(success: bool, stdout: &str, stderr: &str) -> Arc<Self> {
            Arc::new(Self {
                output: ServiceOutput {
                    success,
                    code: Some(if success { 0 } else { 1 }),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ServiceRunner for FakeRunner {
        async fn run(&self, args: &[String]) -> anyhow::Result<ServiceOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            Ok(self.output.clone())
        }
    }

    struct BrokenRunner;

    #[async_trait::async_trait]
    impl ServiceRunner for BrokenRunner {
        async fn run(&self, _args: &[String]) -> anyhow::Result<ServiceOutput> {
            Err(anyhow::anyhow!("No such file or directory"))
        }
    }

    fn client(runner: Arc<FakeRunner>) -> MovieClient {
        MovieClient::new(runner, vec!["Movie 1".to_string(), "Movie 2".to_string()])
    }

    #[tokio::test]
    async fn empty_query_never_invokes_service() {
        let runner = FakeRunner::new(true, "{}", "");
        let err = client(runner.clone()).search("   ").await.unwrap_err();
        assert_eq!(err, ClientError::Input(EMPTY_QUERY_MESSAGE.to_string()));
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn returns_first_result_unmodified() {
        let runner = FakeRunner::new(
            true,
            r#"{"results":[{"id":550,"title":"Fight Club","release_date":"1999-10-15","director":"David Fincher","cast":["Brad Pitt"],"genres":[{"name":"Drama"}],"overview":"A ..."},{"id":1,"title":"Other"}]}"#,
            "",
        );
        let movie = client(runner.clone()).search("Fight Club").await.unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.release_date, "1999-10-15");
        assert_eq!(movie.director.as_deref(), Some("David Fincher"));
        assert_eq!(movie.cast, Some(vec!["Brad Pitt".to_string()]));
        assert_eq!(movie.overview, "A ...");
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            &[vec!["Fight Club".to_string()]]
        );
    }

    #[tokio::test]
    async fn padded_query_is_trimmed_before_invocation() {
        let runner = FakeRunner::new(true, r#"{"results":[{"id":550,"title":"Fight Club"}]}"#, "");
        client(runner.clone()).search("  Fight Club\n").await.unwrap();
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            &[vec!["Fight Club".to_string()]]
        );
    }

    #[tokio::test]
    async fn non_zero_exit_surfaces_stderr() {
        let runner = FakeRunner::new(false, "", "Error in MovieService: 401\n");
        let err = client(runner).search("Fight Club").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Process("Error in MovieService: 401".to_string())
        );
    }

    #[tokio::test]
    async fn malformed_json_is_reported_not_swallowed() {
        let runner = FakeRunner::new(true, "not json", "");
        let err = client(runner).search("Fight Club").await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn empty_results_are_an_error() {
        let runner = FakeRunner::new(true, r#"{"results":[]}"#, "");
        let err = client(runner).search("zzzz").await.unwrap_err();
        assert_eq!(err, ClientError::NoResults("zzzz".to_string()));
        assert_eq!(err.to_string(), "No movies found for 'zzzz'");
    }

    #[tokio::test]
    async fn add_to_list_passes_positional_args() {
        let runner = FakeRunner::new(true, "Movie added to watched successfully\n", "");
        let message = client(runner.clone())
            .add_to_list(1, 550, ListName::Watched)
            .await
            .unwrap();
        assert_eq!(message, "Movie added to watched successfully");
        assert_eq!(
            runner.calls.lock().unwrap().as_slice(),
            &[vec!["1".to_string(), "550".to_string(), "watched".to_string()]]
        );
    }

    #[tokio::test]
    async fn add_to_list_with_silent_success_uses_default_message() {
        let runner = FakeRunner::new(true, "", "");
        let message = client(runner)
            .add_to_list(1, 550, ListName::Watchlist)
            .await
            .unwrap();
        assert_eq!(message, DEFAULT_ADDED_MESSAGE);
    }

    #[tokio::test]
    async fn add_to_list_failure_surfaces_stderr() {
        let runner = FakeRunner::new(false, "", "Failed to initialize ScalarDB");
        let err = client(runner)
            .add_to_list(1, 550, ListName::Watchlist)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::Process("Failed to initialize ScalarDB".to_string())
        );
    }

    #[tokio::test]
    async fn launch_failure_is_reported() {
        let client = MovieClient::new(Arc::new(BrokenRunner), Vec::new());
        let err = client.search("Fight Club").await.unwrap_err();
        assert!(matches!(err, ClientError::Launch(ref m) if m.contains("No such file")));
    }

    #[test]
    fn refresh_list_returns_placeholders() {
        let runner = FakeRunner::new(true, "", "");
        assert_eq!(
            client(runner).refresh_list(),
            vec!["Movie 1".to_string(), "Movie 2".to_string()]
        );
    }
}
