//! reqwest-backed implementation of the remote store traits.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use rh_config::ApiConfig;
use rh_core::entities::{Paper, PaperDraft, Registration, User, Workspace, WorkspaceDraft};
use rh_core::{PaperId, WorkspaceId};
use serde_json::json;

use crate::error::ClientError;
use crate::http::{check_response, decode_json};
use crate::session::Session;
use crate::store::{AiBackend, PaperCatalog, PdfUpload, SearchQuery, WorkspaceStore};
use crate::wire::{
    self, ChatResponse, ExtractResponse, HealthResponse, ReviewResponse, TokenResponse, WirePaper,
    WirePaperList, WireUser, WireWorkspace,
};

/// HTTP client for the ResearchHub API.
///
/// Cloning is cheap: the connection pool and the session are shared.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpRemoteStore {
    /// Create a client with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn new(base_url: &str, session: Session) -> Result<Self, ClientError> {
        Self::from_config(
            &ApiConfig {
                base_url: base_url.to_string(),
                ..ApiConfig::default()
            },
            session,
        )
    }

    /// Create a client from the `[api]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn from_config(config: &ApiConfig, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            session,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token when the session holds one.
    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(%method, path, "remote call");
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ── Auth ───────────────────────────────────────────────────────

    /// Exchange credentials for an access token.
    ///
    /// The token is stored in this client's session; persisting it is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for bad credentials and the
    /// usual transport/parse errors otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let body = format!(
            "username={}&password={}",
            urlencoding::encode(email.trim()),
            urlencoding::encode(password)
        );
        let resp = self
            .request(reqwest::Method::POST, "/auth/login")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        let token: TokenResponse = decode_json(check_response(resp).await?).await?;
        if token.access_token.trim().is_empty() {
            return Err(ClientError::Parse("login returned an empty token".to_string()));
        }
        if let Some(kind) = token
            .token_type
            .as_deref()
            .filter(|kind| !kind.eq_ignore_ascii_case("bearer"))
        {
            tracing::warn!(token_type = kind, "unexpected token type");
        }
        self.session.set_token(token.access_token.clone());
        Ok(token.access_token)
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] if the registration is
    /// incomplete, or the server's `detail` message as [`ClientError::Api`].
    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        registration.validate()?;
        let resp = self
            .request(reqwest::Method::POST, "/auth/register")
            .json(registration)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    /// The signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] without a session token.
    pub async fn current_user(&self) -> Result<User, ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let resp = self.request(reqwest::Method::GET, "/auth/me").send().await?;
        let user: WireUser = decode_json(check_response(resp).await?).await?;
        Ok(user.into())
    }

    /// `GET /health`, returning the reported status.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the server is unreachable or unhealthy.
    pub async fn health(&self) -> Result<String, ClientError> {
        let resp = self.request(reqwest::Method::GET, "/health").send().await?;
        let health: HealthResponse = decode_json(check_response(resp).await?).await?;
        Ok(health.status)
    }
}

fn workspace_path(id: &WorkspaceId) -> String {
    format!("/workspaces/{}", urlencoding::encode(id.as_str()))
}

// ── Workspaces ─────────────────────────────────────────────────────

#[async_trait]
impl WorkspaceStore for HttpRemoteStore {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ClientError> {
        let resp = self.request(reqwest::Method::GET, "/workspaces").send().await?;
        let raw: Vec<serde_json::Value> = decode_json(check_response(resp).await?).await?;
        Ok(wire::lenient_entries::<WireWorkspace, Workspace>(
            raw,
            "workspace",
        ))
    }

    async fn create_workspace(&self, draft: &WorkspaceDraft) -> Result<Workspace, ClientError> {
        draft.validate()?;
        let resp = self
            .request(reqwest::Method::POST, "/workspaces")
            .json(draft)
            .send()
            .await?;
        let wire: WireWorkspace = decode_json(check_response(resp).await?).await?;
        let mut workspace = Workspace::try_from(wire)?;
        // Servers that don't store tags don't echo them.
        if workspace.tags.is_empty() {
            workspace.tags.clone_from(&draft.tags);
        }
        Ok(workspace)
    }

    async fn delete_workspace(&self, id: &WorkspaceId) -> Result<(), ClientError> {
        let resp = self
            .request(reqwest::Method::DELETE, &workspace_path(id))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn list_workspace_papers(&self, id: &WorkspaceId) -> Result<Vec<Paper>, ClientError> {
        let path = format!("{}/papers", workspace_path(id));
        let resp = self.request(reqwest::Method::GET, &path).send().await?;
        let list: WirePaperList = decode_json(check_response(resp).await?).await?;
        Ok(list.into_papers())
    }

    async fn add_paper(
        &self,
        workspace: &WorkspaceId,
        draft: &PaperDraft,
    ) -> Result<Paper, ClientError> {
        draft.validate()?;
        let path = format!("{}/papers", workspace_path(workspace));
        let resp = self
            .request(reqwest::Method::POST, &path)
            .json(draft)
            .send()
            .await?;
        let body: serde_json::Value = decode_json(check_response(resp).await?).await?;
        Ok(wire::added_paper(&body, draft))
    }

    async fn remove_paper(
        &self,
        workspace: &WorkspaceId,
        paper: &PaperId,
    ) -> Result<(), ClientError> {
        let path = format!(
            "{}/papers/{}",
            workspace_path(workspace),
            urlencoding::encode(paper.as_str())
        );
        let resp = self.request(reqwest::Method::DELETE, &path).send().await?;
        check_response(resp).await?;
        Ok(())
    }
}

// ── Papers ─────────────────────────────────────────────────────────

#[async_trait]
impl PaperCatalog for HttpRemoteStore {
    async fn search_papers(&self, query: &SearchQuery) -> Result<Vec<Paper>, ClientError> {
        let path = format!("/papers/search?{}", query.to_query_string());
        let resp = self.request(reqwest::Method::GET, &path).send().await?;
        let list: WirePaperList = decode_json(check_response(resp).await?).await?;
        Ok(list.into_papers())
    }

    async fn get_paper(&self, id: &PaperId) -> Result<Paper, ClientError> {
        let path = format!("/papers/{}", urlencoding::encode(id.as_str()));
        let resp = self.request(reqwest::Method::GET, &path).send().await?;
        let wire: WirePaper = decode_json(check_response(resp).await?).await?;
        Paper::try_from(wire)
    }

    async fn extract_pdf(&self, upload: PdfUpload) -> Result<String, ClientError> {
        if !self.session.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        let part = reqwest::multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let resp = self
            .request(reqwest::Method::POST, "/papers/extract-pdf")
            .multipart(form)
            .send()
            .await?;
        let extracted: ExtractResponse = decode_json(check_response(resp).await?).await?;
        Ok(extracted.text)
    }
}

// ── AI ─────────────────────────────────────────────────────────────

#[async_trait]
impl AiBackend for HttpRemoteStore {
    async fn chat(&self, context: &str, question: &str) -> Result<String, ClientError> {
        let resp = self
            .request(reqwest::Method::POST, "/ai/chat")
            .json(&json!({ "context": context, "question": question }))
            .send()
            .await?;
        let chat: ChatResponse = decode_json(check_response(resp).await?).await?;
        Ok(chat.answer)
    }

    async fn literature_review(&self, paper_ids: &[PaperId]) -> Result<String, ClientError> {
        if paper_ids.is_empty() {
            return Err(ClientError::Validation(
                "literature review needs at least one paper".to_string(),
            ));
        }
        let resp = self
            .request(reqwest::Method::POST, "/ai/literature-review")
            .json(&json!({ "paper_ids": paper_ids }))
            .send()
            .await?;
        let review: ReviewResponse = decode_json(check_response(resp).await?).await?;
        Ok(review.literature_review)
    }
}
