//! MCPセッション管理

use super::ClientCapabilities;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// セッション状態
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: String,
    pub client_capabilities: Option<ClientCapabilities>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub initialized: bool,
}

impl SessionState {
    /// 新しいセッションを作成
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_capabilities: None,
            created_at: now,
            last_activity: now,
            initialized: false,
        }
    }

    /// アクティビティを更新
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// セッションマネージャー
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, SessionState>>>,
}

impl SessionManager {
    /// 新しいセッションマネージャーを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// セッションを作成
    pub async fn create_session(&self) -> SessionState {
        let session = SessionState::new();
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session.id.clone(), session.clone());
        session
    }

    /// セッションを取得
    pub async fn get_session(&self, session_id: &str) -> Option<SessionState> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned()
    }

    /// アクティビティを更新（存在しなければfalse）
    pub async fn touch(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.touch();
                true
            }
            None => false,
        }
    }

    /// 初期化済みとしてマーク
    pub async fn mark_initialized(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                session.initialized = true;
                session.touch();
                true
            }
            None => false,
        }
    }

    /// クライアント機能を記録
    pub async fn set_capabilities(&self, session_id: &str, capabilities: Option<ClientCapabilities>) {
        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get_mut(session_id) {
            session.client_capabilities = capabilities;
        }
    }

    /// セッションを削除
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id).is_some()
    }

    /// セッション数
    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// 期限切れセッションをクリーンアップし、削除数を返す
    pub async fn cleanup_expired(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        let now = Utc::now();
        sessions.retain(|_, session| {
            (now - session.last_activity)
                .to_std()
                .map_or(true, |idle| idle < max_idle)
        });
        before - sessions.len()
    }
}
