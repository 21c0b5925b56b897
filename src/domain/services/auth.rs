#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::Error;
use tokio::sync::mpsc;

use crate::domain::models::texts;
use crate::domain::models::AuthSession;
use crate::domain::models::AuthUser;
use crate::domain::models::Event;
use crate::domain::models::IdentityBox;
use crate::domain::models::LocalizedContent;
use crate::domain::models::Notice;

fn notify_failure(tx: &mpsc::UnboundedSender<Event>, title: LocalizedContent, err: &Error) {
    Notice::error(title)
        .with_description(LocalizedContent::uniform(&err.to_string()))
        .send(tx);
}

/// Email and password authentication. Failures never escape: they are
/// logged, surfaced as a notice, and turned into a neutral value.
pub struct Auth {
    identity: IdentityBox,
}

impl Auth {
    pub fn new(identity: IdentityBox) -> Auth {
        return Auth { identity };
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Option<AuthUser> {
        match self.identity.sign_up(email, password).await {
            Ok(user) => return Some(user),
            Err(err) => {
                tracing::error!(error = ?err, "sign up failed");
                notify_failure(tx, texts::sign_up_failed(), &err);
                return None;
            }
        }
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        tx: &mpsc::UnboundedSender<Event>,
    ) -> Option<AuthUser> {
        match self.identity.sign_in(email, password).await {
            Ok(session) => return Some(session.user),
            Err(err) => {
                tracing::error!(error = ?err, "sign in failed");
                notify_failure(tx, texts::sign_in_failed(), &err);
                return None;
            }
        }
    }

    pub async fn sign_out(&self, tx: &mpsc::UnboundedSender<Event>) -> bool {
        if let Err(err) = self.identity.sign_out().await {
            tracing::error!(error = ?err, "sign out failed");
            notify_failure(tx, texts::sign_out_failed(), &err);
            return false;
        }

        return true;
    }

    pub async fn current_session(&self) -> Option<AuthSession> {
        match self.identity.session().await {
            Ok(session) => return session,
            Err(err) => {
                tracing::error!(error = ?err, "failed to read session");
                return None;
            }
        }
    }

    pub async fn current_user(&self) -> Option<AuthUser> {
        match self.identity.user().await {
            Ok(user) => return user,
            Err(err) => {
                tracing::error!(error = ?err, "failed to read user");
                return None;
            }
        }
    }
}
