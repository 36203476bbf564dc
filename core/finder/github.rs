use super::FinderResult;
use crate::error::{AppError, Result};
use crate::filter::FilterChain;
use crate::http::HttpClient;
use crate::item::{ContentLoader, FileItem, ItemKind};
use crate::source::GithubSource;
use crate::tree::{FileTreeBuilder, TreeViewConfig};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = "ctxgen";

/// One entry of a contents-listing response.
#[derive(Debug, Clone, Deserialize)]
struct GithubEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GithubFileContent {
    #[serde(default)]
    content: Option<String>,
}

/// Finds files in a GitHub repository through the contents API, with the
/// same contract as the local finder. Directory traversal is breadth-first
/// over an explicit queue, so arbitrarily deep trees cannot exhaust the
/// call stack.
pub struct GithubFinder {
    client: Arc<dyn HttpClient>,
}

impl GithubFinder {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    pub fn find(&self, source: &GithubSource) -> Result<FinderResult> {
        let (owner, repo) = source.parse_repository()?;
        let token = source.resolved_token();

        let mut queue: VecDeque<String> = if source.source_paths.is_empty() {
            VecDeque::from([String::new()])
        } else {
            source.source_paths.iter().cloned().collect()
        };

        let mut discovered: Vec<GithubEntry> = Vec::new();
        while let Some(path) = queue.pop_front() {
            let entries = self.list_contents(&owner, &repo, &path, &source.branch, token.as_deref())?;
            for entry in entries {
                match entry.kind.as_str() {
                    "dir" => queue.push_back(entry.path),
                    "file" => discovered.push(entry),
                    other => {
                        log::debug!("Skipping {} entry: {}", other, entry.path);
                    }
                }
            }
        }
        log::info!(
            "Discovered {} file(s) in {}/{}@{}",
            discovered.len(),
            owner,
            repo,
            source.branch
        );

        let items = discovered
            .into_iter()
            .map(|entry| self.into_item(entry, &owner, &repo, &source.branch, token.as_deref()))
            .collect();

        let chain = FilterChain::for_source(source)?;
        let files = chain.apply(items)?;

        let tree_view = FileTreeBuilder::new(TreeViewConfig::default()).build_tree(&files)?;
        Ok(FinderResult::new(files, tree_view))
    }

    fn into_item(
        &self,
        entry: GithubEntry,
        owner: &str,
        repo: &str,
        branch: &str,
        token: Option<&str>,
    ) -> FileItem {
        let url = contents_url(owner, repo, &entry.path, branch);
        let client = Arc::clone(&self.client);
        let token = token.map(str::to_string);
        let path_for_error = entry.path.clone();
        let loader: ContentLoader = Arc::new(move || {
            fetch_file_content(client.as_ref(), &url, token.as_deref(), &path_for_error)
        });

        FileItem::new(
            PathBuf::from(&entry.path),
            format!("{}/{}/{}", owner, repo, entry.path),
            ItemKind::File,
            loader,
        )
        .with_metadata(entry.size, None)
    }

    /// List one repository path. A single-file response (a JSON object, not
    /// an array) is treated as a one-item listing.
    fn list_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
        token: Option<&str>,
    ) -> Result<Vec<GithubEntry>> {
        let url = contents_url(owner, repo, path, branch);
        let body = send_request(self.client.as_ref(), &url, token)?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if value.is_array() {
            Ok(serde_json::from_value(value)?)
        } else {
            let entry: GithubEntry = serde_json::from_value(value)?;
            Ok(vec![entry])
        }
    }
}

fn contents_url(owner: &str, repo: &str, path: &str, branch: &str) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}?ref={}",
        API_BASE_URL, owner, repo, path, branch
    )
}

fn request_headers(token: Option<&str>) -> Vec<(String, String)> {
    let mut headers = vec![
        ("Accept".to_string(), ACCEPT_HEADER.to_string()),
        ("User-Agent".to_string(), USER_AGENT.to_string()),
    ];
    if let Some(token) = token {
        headers.push(("Authorization".to_string(), format!("token {}", token)));
    }
    headers
}

fn send_request(client: &dyn HttpClient, url: &str, token: Option<&str>) -> Result<String> {
    let response = client.get(url, &request_headers(token))?;
    if !response.is_success() {
        return Err(AppError::GithubApi(format!(
            "request failed with status code {}: {}",
            response.status, url
        )));
    }
    Ok(response.body)
}

/// Fetch and decode one file's content. The API returns the payload base64
/// encoded, possibly with embedded newlines.
fn fetch_file_content(
    client: &dyn HttpClient,
    url: &str,
    token: Option<&str>,
    path: &str,
) -> Result<String> {
    let body = send_request(client, url, token)?;
    let file: GithubFileContent = serde_json::from_str(&body)?;
    let Some(encoded) = file.content else {
        return Err(AppError::GithubApi(format!(
            "could not get content for file: {}",
            path
        )));
    };
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}
